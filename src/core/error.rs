use std::io;

/// Failure reported by the catalogue data source.
///
/// `status` carries the HTTP-like status code when the provider answered at
/// all; transport failures leave it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub status: Option<u16>,
    pub detail: String,
}

impl FetchError {
    pub fn new(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(Some(401), detail)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Message shown in the alert region when the primary fetch fails.
    pub fn user_message(&self) -> String {
        if self.is_unauthorized() {
            "Authentication with the catalogue source failed. Check the catalogue API key."
                .to_string()
        } else if self.detail.trim().is_empty() {
            "Unable to load the catalogue.".to_string()
        } else {
            format!("Unable to load the catalogue: {}", self.detail.trim())
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "HTTP {}: {}", code, self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Config(String),
    Storage(String),
    Fetch(FetchError),
    Translation(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "IO Error: {}", err),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Fetch(err) => write!(f, "Fetch Error: {}", err),
            AppError::Translation(msg) => write!(f, "Translation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
pub type Result<T> = std::result::Result<T, AppError>;
