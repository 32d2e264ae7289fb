use regex::Regex;

const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

pub fn parse_youtube_video_id(input: &str) -> Option<String> {
    let regex = Regex::new(concat!(
        r"(?i)(?:youtube(?:-nocookie)?\.com/",
        r"(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/|v/)|youtu\.be/)",
        r"([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    ))
    .ok()?;
    let captures = regex.captures(input)?;
    captures.get(1).map(|m| m.as_str().to_string())
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("{THUMBNAIL_BASE}/{video_id}/mqdefault.jpg")
}

pub fn youtube_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}
