//! In-memory stores for local development and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::domain::aggregates::{Banner, BannerSlot, CollectionRef, Product};
use super::{BannerStore, ListOptions, ProductCatalog, ProductFilter, ProductOrder, StoreResult};

#[derive(Debug, Default)]
pub struct InMemoryBannerStore {
    banners: RwLock<Vec<Banner>>,
}

impl InMemoryBannerStore {
    pub fn new() -> Self { Self::default() }

    pub async fn insert(&self, banner: Banner) -> String {
        let id = banner.id.clone();
        self.banners.write().await.push(banner);
        id
    }
}

#[async_trait]
impl BannerStore for InMemoryBannerStore {
    async fn list_active_banners(&self, slot: BannerSlot, limit: usize) -> StoreResult<Vec<Banner>> {
        let mut rows: Vec<Banner> = self.banners.read().await.iter()
            .filter(|b| b.is_active && b.position == slot)
            .cloned()
            .collect();
        // stable, so equal display orders keep insertion order
        rows.sort_by_key(|b| b.display_order);
        rows.truncate(limit);
        Ok(rows)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    collections: RwLock<Vec<CollectionRef>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self { Self::default() }

    pub async fn add_collection(&self, handle: &str, title: &str) -> CollectionRef {
        let collection = CollectionRef::new(handle, title);
        self.collections.write().await.push(collection.clone());
        collection
    }

    pub async fn insert(&self, product: Product) -> String {
        let id = product.id.clone();
        self.products.write().await.push(product);
        id
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_published_products(&self, filter: &ProductFilter, options: ListOptions) -> StoreResult<Vec<Product>> {
        let mut rows: Vec<Product> = self.products.read().await.iter()
            .filter(|p| p.is_published())
            .filter(|p| filter.collection_id.as_deref().map_or(true, |id| p.collection_key() == Some(id)))
            .filter(|p| filter.tag.as_deref().map_or(true, |tag| p.has_tag(tag)))
            .cloned()
            .collect();
        match options.order {
            ProductOrder::CreatedAtDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductOrder::CreatedAtAsc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        rows.truncate(options.take);
        if !options.with_collection {
            rows.iter_mut().for_each(|p| p.collection = None);
        }
        Ok(rows)
    }

    async fn retrieve_product(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.products.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn resolve_collection_by_handle(&self, handle: &str) -> StoreResult<Option<String>> {
        Ok(self.collections.read().await.iter().find(|c| c.handle == handle).map(|c| c.id.clone()))
    }
}
