use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{JournalError, Result};
use crate::comment::CommentProvider;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const COMMENT_PATH: &str = "api/comment";

#[derive(Serialize)]
struct CommentRequest<'a> {
    #[serde(rename = "goodThing")]
    good_thing: &'a str,
}

#[derive(Deserialize)]
struct CommentResponse {
    comment: Option<String>,
    error: Option<String>,
}

/// Talks to the comment proxy. The proxy holds the model credentials;
/// this client only sends item text and reads back a comment.
pub struct HttpCommentProvider {
    client: Client,
    url: Url,
}

impl HttpCommentProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent("goodthings/0.1.0")
            .build()?;

        Self::with_client(endpoint, client)
    }

    pub(crate) fn with_client(endpoint: &str, client: Client) -> Result<Self> {
        let mut base = Url::parse(endpoint)?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let url = base.join(COMMENT_PATH)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    fn parse_response(status: StatusCode, body: &[u8]) -> Result<String> {
        let parsed = serde_json::from_slice::<CommentResponse>(body);

        if !status.is_success() {
            let detail = parsed
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(JournalError::Provider(format!(
                "Comment request failed with {}: {}",
                status, detail
            )));
        }

        let parsed = parsed
            .map_err(|e| JournalError::Provider(format!("Malformed comment response: {}", e)))?;

        match parsed.comment {
            Some(comment) if !comment.trim().is_empty() => Ok(comment),
            _ => Err(JournalError::Provider(
                parsed
                    .error
                    .unwrap_or_else(|| "Response did not contain a comment".to_string()),
            )),
        }
    }
}

#[async_trait]
impl CommentProvider for HttpCommentProvider {
    async fn comment_for_item(&self, text: &str) -> Result<String> {
        let body = serde_json::to_vec(&CommentRequest { good_thing: text })
            .map_err(|e| JournalError::Provider(e.to_string()))?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!("Comment provider responded {} ({} bytes)", status, bytes.len());

        Self::parse_response(status, &bytes)
    }
}
