// src/catalogue/mod.rs
pub mod controller;
pub mod filter;
pub mod model;
pub mod reveal;
pub mod source;

pub use controller::{
    AssetFailureHandle, CatalogueController, CatalogueState, ControllerDeps, ControllerSettings,
};
pub use filter::FilterState;
pub use model::{CacheEntry, CatalogueItem, PricingPlan};
pub use reveal::{Reveal, SentinelObserver};
pub use source::{CatalogueSource, HttpCatalogueSource};
