use std::sync::Arc;

use acervo_core::{AcervoResult, HostClassification, LinkReport, ValidationResult};

use crate::classify::classify;
use crate::fetcher::{FetchRequest, FetchResponse, Fetcher};
use crate::parsers::{
    parse_vimeo_video_id, parse_youtube_video_id, vimeo_embed_url, youtube_thumbnail_url,
};

pub const MSG_NOT_PROVIDED: &str = "URL not provided";
pub const MSG_INVALID_ID: &str = "invalid video identifier";

/// Checks whether links are reachable.
///
/// Never fails: every outcome, including transport errors, is folded into a
/// [`ValidationResult`]. Each call issues at most one request.
#[derive(Clone)]
pub struct LinkValidator {
    fetcher: Arc<dyn Fetcher>,
}

impl LinkValidator {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn validate(&self, url: &str) -> ValidationResult {
        let url = url.trim();
        if url.is_empty() {
            return ValidationResult::invalid(MSG_NOT_PROVIDED);
        }

        match classify(url) {
            HostClassification::VideoHostA => self.validate_youtube(url).await,
            HostClassification::VideoHostB => self.validate_vimeo(url).await,
            HostClassification::Generic => self.validate_generic(url).await,
        }
    }

    /// Validates each URL in turn, one request at a time.
    ///
    /// The output has one entry per input, in input order.
    pub async fn validate_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<LinkReport> {
        let mut reports = Vec::with_capacity(urls.len());
        for url in urls {
            let url = url.as_ref();
            let result = self.validate(url).await;
            reports.push(LinkReport {
                url: url.to_string(),
                result,
            });
        }
        reports
    }

    async fn validate_youtube(&self, url: &str) -> ValidationResult {
        let Some(video_id) = parse_youtube_video_id(url) else {
            return ValidationResult::invalid(MSG_INVALID_ID);
        };
        let thumbnail = youtube_thumbnail_url(&video_id);
        let response = self.fetcher.fetch(FetchRequest::head(thumbnail.clone())).await;
        match video_outcome(response) {
            Ok(status) => {
                ValidationResult::valid(status, "video available").with_thumbnail(thumbnail)
            }
            Err(failed) => failed,
        }
    }

    async fn validate_vimeo(&self, url: &str) -> ValidationResult {
        let Some(video_id) = parse_vimeo_video_id(url) else {
            return ValidationResult::invalid(MSG_INVALID_ID);
        };
        let response = self
            .fetcher
            .fetch(FetchRequest::probe(vimeo_embed_url(&video_id)))
            .await;
        match video_outcome(response) {
            Ok(status) => ValidationResult::valid(status, "video available"),
            Err(failed) => failed,
        }
    }

    async fn validate_generic(&self, url: &str) -> ValidationResult {
        match self.fetcher.fetch(FetchRequest::head(url)).await {
            Ok(response) if response.is_success() || response.is_redirection() => {
                ValidationResult::valid(
                    response.status,
                    format!("link available (HTTP {})", response.status),
                )
            }
            Ok(response) => ValidationResult::rejected(
                response.status,
                format!("link unavailable (HTTP {})", response.status),
            ),
            Err(err) => connection_error(err.detail()),
        }
    }
}

/// `Ok(status)` when the provider answered with success, otherwise the
/// ready-made negative result.
fn video_outcome(response: AcervoResult<FetchResponse>) -> Result<u16, ValidationResult> {
    match response {
        Ok(response) if response.is_success() => Ok(response.status),
        Ok(response) => Err(ValidationResult::rejected(
            response.status,
            format!("video unavailable (HTTP {})", response.status),
        )),
        Err(err) => Err(connection_error(err.detail())),
    }
}

fn connection_error(detail: &str) -> ValidationResult {
    ValidationResult::invalid(format!("connection error: {detail}"))
}
