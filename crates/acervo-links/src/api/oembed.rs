use std::sync::Arc;

use acervo_core::{AcervoError, AcervoResult};
use serde::Deserialize;
use url::Url;

use crate::fetcher::{FetchRequest, Fetcher};

const YOUTUBE_ENDPOINT: &str = "https://www.youtube.com/oembed";
const VIMEO_ENDPOINT: &str = "https://vimeo.com/api/oembed.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OEmbedProvider {
    YouTube,
    Vimeo,
}

impl OEmbedProvider {
    fn name(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Vimeo => "vimeo",
        }
    }

    pub fn endpoint_url(self, content_url: &str) -> AcervoResult<Url> {
        let url = match self {
            Self::YouTube => Url::parse_with_params(
                YOUTUBE_ENDPOINT,
                &[("url", content_url), ("format", "json")],
            ),
            Self::Vimeo => Url::parse_with_params(VIMEO_ENDPOINT, &[("url", content_url)]),
        };
        url.map_err(|err| AcervoError::InvalidInput(format!("invalid oembed url: {err}")))
    }
}

#[derive(Clone)]
pub struct OEmbedClient {
    fetcher: Arc<dyn Fetcher>,
}

impl OEmbedClient {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn fetch(
        &self,
        provider: OEmbedProvider,
        content_url: &str,
    ) -> AcervoResult<OEmbedResponse> {
        let endpoint = provider.endpoint_url(content_url)?;
        let response = self.fetcher.fetch(FetchRequest::body(endpoint)).await?;

        if !response.is_success() {
            return Err(AcervoError::Api(format!(
                "{} oembed error: status={}",
                provider.name(),
                response.status
            )));
        }

        let body = response.body.unwrap_or_default();
        serde_json::from_str::<OEmbedResponse>(&body).map_err(|err| {
            AcervoError::Parse(format!(
                "{} oembed response parse failed: {err}",
                provider.name()
            ))
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OEmbedResponse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchMode, FetchResponse, MockFetcher};

    fn json(status: u16, body: &str) -> FetchResponse {
        FetchResponse {
            status,
            body: Some(body.to_string()),
        }
    }

    #[test]
    fn youtube_endpoint_encodes_watch_url() {
        let url = OEmbedProvider::YouTube
            .endpoint_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        assert_eq!(url.path(), "/oembed");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "url".to_string(),
                    "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()
                ),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn vimeo_endpoint_keys_by_full_url() {
        let url = OEmbedProvider::Vimeo
            .endpoint_url("https://vimeo.com/76979871")
            .unwrap();
        assert!(url.as_str().starts_with("https://vimeo.com/api/oembed.json?url="));
    }

    #[tokio::test]
    async fn parses_vimeo_payload() {
        let mut mock = MockFetcher::new();
        mock.expect_fetch()
            .withf(|req| req.mode == FetchMode::Body && req.url.starts_with(VIMEO_ENDPOINT))
            .times(1)
            .returning(|_| {
                Ok(json(
                    200,
                    concat!(
                        r#"{"type":"video","title":"The New Vimeo Player","description":"Lorem","#,
                        r#""thumbnail_url":"https://i.vimeocdn.com/video/452001751-640.jpg","#,
                        r#""author_name":"Vimeo"}"#,
                    ),
                ))
            });

        let client = OEmbedClient::new(Arc::new(mock));
        let response = client
            .fetch(OEmbedProvider::Vimeo, "https://vimeo.com/76979871")
            .await
            .unwrap();
        assert_eq!(response.title.as_deref(), Some("The New Vimeo Player"));
        assert_eq!(response.description.as_deref(), Some("Lorem"));
        assert_eq!(
            response.thumbnail_url.as_deref(),
            Some("https://i.vimeocdn.com/video/452001751-640.jpg")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let mut mock = MockFetcher::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_| Ok(json(401, "Unauthorized")));

        let client = OEmbedClient::new(Arc::new(mock));
        let result = client
            .fetch(OEmbedProvider::YouTube, "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await;
        match result {
            Err(AcervoError::Api(msg)) => assert!(msg.contains("status=401")),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let mut mock = MockFetcher::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_| Ok(json(200, "<html>")));

        let client = OEmbedClient::new(Arc::new(mock));
        let result = client
            .fetch(OEmbedProvider::Vimeo, "https://vimeo.com/76979871")
            .await;
        assert!(matches!(result, Err(AcervoError::Parse(_))));
    }
}
