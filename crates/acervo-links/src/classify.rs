use acervo_core::HostClassification;

const HOST_A_MARKERS: [&str; 4] = ["youtube.com", "youtu.be", "youtube-nocookie.com", "/watch?v="];
const HOST_B_MARKERS: [&str; 1] = ["vimeo.com"];

/// Tags a URL with the strategy used to check it.
///
/// Pure substring matching, case-insensitive. Host A markers are tested
/// before host B, so a URL carrying both resolves to
/// [`HostClassification::VideoHostA`].
pub fn classify(url: &str) -> HostClassification {
    let normalized = url.to_lowercase();
    if HOST_A_MARKERS.iter().any(|marker| normalized.contains(marker)) {
        HostClassification::VideoHostA
    } else if HOST_B_MARKERS.iter().any(|marker| normalized.contains(marker)) {
        HostClassification::VideoHostB
    } else {
        HostClassification::Generic
    }
}
