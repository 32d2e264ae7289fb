use std::sync::Arc;

use acervo_core::{AcervoError, HostClassification, ValidationResult, VideoMetadata};

use crate::api::oembed::{OEmbedClient, OEmbedProvider};
use crate::classify::classify;
use crate::fetcher::Fetcher;
use crate::parsers::{parse_youtube_video_id, youtube_thumbnail_url, youtube_watch_url};
use crate::validator::LinkValidator;

/// Metadata together with the provider failures absorbed along the way.
#[derive(Debug, Default)]
pub struct MetadataOutcome {
    pub metadata: VideoMetadata,
    pub failures: Vec<AcervoError>,
}

/// Pre-fills authoring fields for recognized video links.
#[derive(Clone)]
pub struct MetadataResolver {
    validator: LinkValidator,
    oembed: OEmbedClient,
}

impl MetadataResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            validator: LinkValidator::new(fetcher.clone()),
            oembed: OEmbedClient::new(fetcher),
        }
    }

    pub async fn resolve(&self, url: &str) -> VideoMetadata {
        self.resolve_outcome(url).await.metadata
    }

    /// Checks availability, then resolves metadata.
    ///
    /// Unrecognized hosts return an empty outcome before any request is made.
    pub async fn resolve_outcome(&self, url: &str) -> MetadataOutcome {
        if !classify(url).is_video() {
            return MetadataOutcome::default();
        }
        let validation = self.validator.validate(url).await;
        self.resolve_checked(url, &validation).await
    }

    /// Resolves metadata using an availability check the caller already ran.
    pub async fn resolve_checked(
        &self,
        url: &str,
        validation: &ValidationResult,
    ) -> MetadataOutcome {
        if !validation.is_valid {
            return MetadataOutcome::default();
        }
        match classify(url) {
            HostClassification::VideoHostA => self.resolve_youtube(url, validation).await,
            HostClassification::VideoHostB => self.resolve_vimeo(url, validation).await,
            HostClassification::Generic => MetadataOutcome::default(),
        }
    }

    async fn resolve_youtube(&self, url: &str, validation: &ValidationResult) -> MetadataOutcome {
        let Some(video_id) = parse_youtube_video_id(url) else {
            return MetadataOutcome::default();
        };

        let mut outcome = MetadataOutcome::default();
        outcome.metadata.thumbnail = validation
            .thumbnail
            .clone()
            .or_else(|| Some(youtube_thumbnail_url(&video_id)));

        match self
            .oembed
            .fetch(OEmbedProvider::YouTube, &youtube_watch_url(&video_id))
            .await
        {
            Ok(response) => outcome.metadata.title = non_blank(response.title),
            Err(err) => outcome.failures.push(err),
        }
        outcome
    }

    async fn resolve_vimeo(&self, url: &str, validation: &ValidationResult) -> MetadataOutcome {
        let mut outcome = MetadataOutcome::default();
        outcome.metadata.thumbnail = validation.thumbnail.clone();

        match self.oembed.fetch(OEmbedProvider::Vimeo, url.trim()).await {
            Ok(response) => {
                outcome.metadata.title = non_blank(response.title);
                outcome.metadata.description = non_blank(response.description);
                if outcome.metadata.thumbnail.is_none() {
                    outcome.metadata.thumbnail = non_blank(response.thumbnail_url);
                }
            }
            Err(err) => outcome.failures.push(err),
        }
        outcome
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
