// src/core/prelude.rs

// Core essentials
pub use crate::core::config::Config;
pub use crate::core::error::{AppError, FetchError, Result};

// Standard library essentials
pub use std::collections::HashMap;
pub use std::sync::Arc;
pub use std::time::Duration;
