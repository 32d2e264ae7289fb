mod error;
mod host;
mod result;

pub use error::{AcervoError, AcervoResult};
pub use host::HostClassification;
pub use result::{LinkReport, ValidationResult, VideoMetadata};

pub fn validate_url(url: &str) -> AcervoResult<()> {
    url::Url::parse(url).map_err(|err| AcervoError::InvalidInput(format!("invalid url: {err}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::AcervoError;

    #[test]
    fn test_validate_url_valid() {
        assert!(validate_url("https://example.com/article").is_ok());
        assert!(validate_url("http://vimeo.com/76979871").is_ok());
    }

    #[test]
    fn test_validate_url_invalid() {
        let result = validate_url("not-a-url");
        assert!(matches!(result, Err(AcervoError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_url_error_message() {
        match validate_url("://no-scheme") {
            Err(AcervoError::InvalidInput(msg)) => assert!(msg.contains("invalid url")),
            _ => panic!("Expected InvalidInput error"),
        }
    }
}
