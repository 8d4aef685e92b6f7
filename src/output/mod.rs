// src/output/mod.rs
pub mod display;
pub mod logging;
