//! Storefront Homepage
//!
//! Assembles the storefront homepage from independently stored banners and
//! products.
//!
//! ## Features
//! - Banner carousels for the hero, single, dual and triple slots
//! - Product grids grouped by collection handle
//! - Collection mapping and tag fallbacks from configuration
//! - Absolute media URLs anchored to the public origin
//! - Static uploads served from the same origin

pub mod config;
pub mod domain;
pub mod homepage;
pub mod routes;
pub mod store;
pub mod uploads;

use thiserror::Error;

pub use config::{AppConfig, ConfigError, CorsOrigins, HomepageConfig};
pub use homepage::HomepageAggregator;
pub use routes::{router, AppState};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum HomepageError {
    #[error("Product catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Banner store unavailable: {0}")]
    BannerStoreUnavailable(String),
}

pub type Result<T> = std::result::Result<T, HomepageError>;
