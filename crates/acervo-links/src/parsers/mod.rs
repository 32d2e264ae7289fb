mod vimeo;
mod youtube;

pub use vimeo::{parse_vimeo_video_id, vimeo_embed_url};
pub use youtube::{parse_youtube_video_id, youtube_thumbnail_url, youtube_watch_url};
