// src/translate/service.rs
use crate::core::api_key::ApiKey;
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};

/// Batch translator. The answer is positionally aligned with `texts`.
#[async_trait::async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    texts: &'a [String],
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<String>,
}

/// `POST <endpoint>` with `{ texts, target_lang }`, answered by `{ translations }`.
#[derive(Debug, Clone)]
pub struct HttpTranslationService {
    client: reqwest::Client,
    endpoint: String,
    api_key: ApiKey,
}

impl HttpTranslationService {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl TranslationService for HttpTranslationService {
    async fn translate(&self, texts: &[String], target_lang: &str) -> Result<Vec<String>> {
        if self.endpoint.is_empty() {
            return Err(AppError::Translation(
                "no translation endpoint configured".to_string(),
            ));
        }

        let mut request = self.client.post(&self.endpoint).json(&TranslateRequest {
            texts,
            target_lang,
        });
        if let Some(key) = self.api_key.bearer() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Translation(format!(
                "translation service answered {}",
                status
            )));
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Translation(format!("invalid translation payload: {}", e)))?;

        check_alignment(texts.len(), payload.translations)
    }
}

pub(crate) fn check_alignment(expected: usize, translations: Vec<String>) -> Result<Vec<String>> {
    if translations.len() != expected {
        return Err(AppError::Translation(format!(
            "expected {} translations, got {}",
            expected,
            translations.len()
        )));
    }
    Ok(translations)
}
