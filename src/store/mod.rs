//! Read-side collaborators of the homepage: the banner store and the product catalog.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use crate::domain::aggregates::{Banner, BannerSlot, Product};

pub use memory::{InMemoryBannerStore, InMemoryCatalog};
pub use postgres::{PgBannerStore, PgProductCatalog};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub collection_id: Option<String>,
    pub tag: Option<String>,
}

impl ProductFilter {
    pub fn collection(id: impl Into<String>) -> Self { Self { collection_id: Some(id.into()), tag: None } }
    pub fn tag(tag: impl Into<String>) -> Self { Self { collection_id: None, tag: Some(tag.into()) } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductOrder { #[default] CreatedAtDesc, CreatedAtAsc }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListOptions {
    pub take: usize,
    pub order: ProductOrder,
    pub with_collection: bool,
}

impl ListOptions {
    pub fn take(take: usize) -> Self { Self { take, ..Self::default() } }
    pub fn with_collection(mut self) -> Self { self.with_collection = true; self }
}

impl Default for ListOptions {
    fn default() -> Self { Self { take: 20, order: ProductOrder::CreatedAtDesc, with_collection: false } }
}

#[async_trait]
pub trait BannerStore: Send + Sync {
    /// Active banners of `slot`, display order ascending, at most `limit`.
    async fn list_active_banners(&self, slot: BannerSlot, limit: usize) -> StoreResult<Vec<Banner>>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Published products matching `filter`.
    async fn list_published_products(&self, filter: &ProductFilter, options: ListOptions) -> StoreResult<Vec<Product>>;

    /// `Ok(None)` when the product no longer exists.
    async fn retrieve_product(&self, id: &str) -> StoreResult<Option<Product>>;

    async fn resolve_collection_by_handle(&self, handle: &str) -> StoreResult<Option<String>>;
}
