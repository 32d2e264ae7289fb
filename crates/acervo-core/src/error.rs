use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcervoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type AcervoResult<T> = Result<T, AcervoError>;

impl AcervoError {
    /// The message carried by the error, without its kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(detail)
            | Self::Config(detail)
            | Self::Network(detail)
            | Self::Api(detail)
            | Self::Parse(detail) => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AcervoError;

    #[test]
    fn display_includes_kind_and_detail_excludes_it() {
        let err = AcervoError::Network("dns lookup failed".to_string());
        assert_eq!(err.to_string(), "network error: dns lookup failed");
        assert_eq!(err.detail(), "dns lookup failed");
    }
}
