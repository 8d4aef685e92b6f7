// src/cache/mod.rs
pub mod catalogue;
pub mod translation;

pub use catalogue::CatalogueCache;
pub use translation::TranslationCache;
