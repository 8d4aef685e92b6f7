// src/core/mod.rs
pub mod api_key;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod helpers;
pub mod prelude;
