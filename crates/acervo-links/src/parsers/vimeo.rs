use regex::Regex;

pub fn parse_vimeo_video_id(input: &str) -> Option<String> {
    let regex = Regex::new(r"(?i)vimeo\.com/(?:[^?#]*?/)?(\d+)(?:[/?#]|$)").ok()?;
    let captures = regex.captures(input)?;
    captures.get(1).map(|m| m.as_str().to_string())
}

pub fn vimeo_embed_url(video_id: &str) -> String {
    format!("https://player.vimeo.com/video/{video_id}")
}
