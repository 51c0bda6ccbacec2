use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::NotionConfig;

use super::api::DocumentApi;
use super::error::NotionError;
use super::models::{ChildrenPage, ContentNode};

const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch Notion page";

/// HTTP client for the document API.
///
/// Credentials, base URL, version and timeout come from the `NotionConfig`
/// handed to `new`; nothing is read from the environment here.
#[derive(Clone)]
pub struct NotionClient {
    http: Client,
    base_url: Url,
    page_size: u32,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self, NotionError> {
        let token = config.token.as_deref().ok_or(NotionError::NotConfigured)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| NotionError::NotConfigured)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            HeaderName::from_static("notion-version"),
            HeaderValue::from_str(&config.version)
                .map_err(|_| NotionError::Decode(format!("invalid Notion-Version '{}'", config.version)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: parse_base_url(&config.base_url)?,
            page_size: config.page_size.clamp(1, NotionConfig::MAX_PAGE_SIZE),
        })
    }

    /// `{base}/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn children_url(&self, id: &str, cursor: Option<&str>) -> Url {
        let mut url = self.endpoint(&["blocks", id, "children"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page_size", &self.page_size.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("start_cursor", cursor);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, NotionError> {
        debug!(%url, "notion request");
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NotionError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DocumentApi for NotionClient {
    async fn retrieve_node(&self, id: &str) -> Result<ContentNode, NotionError> {
        self.get_json(self.endpoint(&["pages", id])).await
    }

    async fn list_children(&self, id: &str, cursor: Option<&str>) -> Result<ChildrenPage, NotionError> {
        self.get_json(self.children_url(id, cursor)).await
    }
}

fn parse_base_url(raw: &str) -> Result<Url, NotionError> {
    let url = Url::parse(raw).map_err(|_| NotionError::InvalidBaseUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(NotionError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

/// Turn a non-success response into an error carrying the upstream status and
/// the `message` field of its JSON body when there is one.
async fn upstream_error(response: Response) -> NotionError {
    let status = response.status().as_u16();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    NotionError::Upstream { status, message }
}
