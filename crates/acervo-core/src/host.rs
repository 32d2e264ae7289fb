use std::fmt;

use serde::{Deserialize, Serialize};

/// Which resolution strategy applies to a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostClassification {
    /// YouTube-style video host.
    VideoHostA,
    /// Vimeo-style video host.
    VideoHostB,
    Generic,
}

impl HostClassification {
    pub fn is_video(self) -> bool {
        !matches!(self, Self::Generic)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::VideoHostA => "YouTube",
            Self::VideoHostB => "Vimeo",
            Self::Generic => "Link",
        }
    }
}

impl fmt::Display for HostClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
