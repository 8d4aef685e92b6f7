// src/core/api_key.rs
use std::fmt;

/// Bearer credential for the catalogue or translation function.
/// `Debug` never shows the secret.
#[derive(Clone, Default)]
pub struct ApiKey {
    secret: Option<String>,
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secret {
            None => f.write_str("ApiKey(<none>)"),
            Some(_) => f.write_str("ApiKey(***)"),
        }
    }
}

impl ApiKey {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Blank values mean "no key".
    pub fn new(value: &str) -> Self {
        match value.trim() {
            "" => Self::empty(),
            secret => Self {
                secret: Some(secret.to_string()),
            },
        }
    }

    /// A non-empty `env_var` wins over the file value.
    pub fn resolve(toml_value: &str, env_var: &str) -> Self {
        std::env::var(env_var)
            .ok()
            .map(|value| Self::new(&value))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| Self::new(toml_value))
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_none()
    }

    pub fn bearer(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}
