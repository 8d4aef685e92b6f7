// src/catalogue/source.rs
use crate::catalogue::model::CatalogueItem;
use crate::core::api_key::ApiKey;
use crate::core::error::FetchError;
use serde::Deserialize;

/// Remote provider of the full catalogue.
#[async_trait::async_trait]
pub trait CatalogueSource: Send + Sync {
    /// `locator` names the remote table/view; its format belongs to the provider.
    async fn fetch(&self, locator: &str) -> Result<Vec<CatalogueItem>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct CatalogueResponse {
    #[serde(default)]
    items: Vec<CatalogueItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Talks to the catalogue function over HTTP: `GET <endpoint>?source=<locator>`.
#[derive(Debug, Clone)]
pub struct HttpCatalogueSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl HttpCatalogueSource {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, api_key)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl CatalogueSource for HttpCatalogueSource {
    async fn fetch(&self, locator: &str) -> Result<Vec<CatalogueItem>, FetchError> {
        if self.endpoint.is_empty() {
            return Err(FetchError::new(None, "no catalogue endpoint configured"));
        }

        let mut request = self.client.get(&self.endpoint).query(&[("source", locator)]);
        if let Some(key) = self.api_key.bearer() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::new(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(Some(status.as_u16()), error_detail(&body, status)));
        }

        let payload: CatalogueResponse = response
            .json()
            .await
            .map_err(|e| FetchError::new(None, format!("invalid catalogue payload: {}", e)))?;

        log::debug!("Catalogue source returned {} items", payload.items.len());
        Ok(payload.items)
    }
}

/// Prefers the provider's own error text over the bare status line.
fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        for candidate in [parsed.message, parsed.error] {
            if !candidate.trim().is_empty() {
                return candidate.trim().to_string();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() || body.len() > 200 {
        status.to_string()
    } else {
        body.to_string()
    }
}
