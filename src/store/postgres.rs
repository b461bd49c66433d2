//! Postgres-backed stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use crate::domain::aggregates::{Banner, BannerSlot, CollectionRef, Product, ProductStatus};
use super::{BannerStore, ListOptions, ProductCatalog, ProductFilter, ProductOrder, StoreError, StoreResult};

#[derive(Debug, sqlx::FromRow)]
struct BannerRow { id: String, title: Option<String>, link: Option<String>, position: String, image_url: String, is_active: bool, display_order: i32 }

impl TryFrom<BannerRow> for Banner {
    type Error = StoreError;
    fn try_from(r: BannerRow) -> Result<Self, Self::Error> {
        let position: BannerSlot = r.position.parse().map_err(|e| StoreError::Decode(format!("banner {}: {}", r.id, e)))?;
        Ok(Banner { id: r.id, title: r.title, link: r.link, position, image_url: r.image_url, is_active: r.is_active, display_order: r.display_order })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String, title: String, handle: Option<String>, status: String, thumbnail: Option<String>,
    tags: Vec<String>, created_at: DateTime<Utc>,
    collection_id: Option<String>, collection_handle: Option<String>, collection_title: Option<String>,
}

impl ProductRow {
    fn into_product(self, with_collection: bool) -> Product {
        let collection = match (with_collection, &self.collection_id, self.collection_handle) {
            (true, Some(id), Some(handle)) => Some(CollectionRef { id: id.clone(), handle, title: self.collection_title }),
            _ => None,
        };
        Product {
            status: self.status.parse().unwrap_or_else(|e| {
                tracing::warn!(product_id = %self.id, "{}", e);
                ProductStatus::Draft
            }),
            id: self.id, title: self.title, handle: self.handle, thumbnail: self.thumbnail,
            collection_id: self.collection_id, collection, tags: self.tags, created_at: self.created_at,
        }
    }
}

const PRODUCT_SELECT: &str = "SELECT p.id, p.title, p.handle, p.status, p.thumbnail, p.tags, p.created_at, \
    c.id AS collection_id, c.handle AS collection_handle, c.title AS collection_title \
    FROM products p LEFT JOIN product_collections c ON c.id = p.collection_id AND c.deleted_at IS NULL \
    WHERE p.deleted_at IS NULL";

#[derive(Clone)]
pub struct PgBannerStore { pool: PgPool }

impl PgBannerStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl BannerStore for PgBannerStore {
    async fn list_active_banners(&self, slot: BannerSlot, limit: usize) -> StoreResult<Vec<Banner>> {
        let rows = sqlx::query_as::<_, BannerRow>("SELECT id, title, link, position, image_url, is_active, display_order FROM banners WHERE is_active = TRUE AND position = $1 ORDER BY display_order ASC, created_at ASC LIMIT $2")
            .bind(slot.as_str()).bind(limit as i64).fetch_all(&self.pool).await?;
        rows.into_iter().map(Banner::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PgProductCatalog { pool: PgPool }

impl PgProductCatalog {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
    async fn list_published_products(&self, filter: &ProductFilter, options: ListOptions) -> StoreResult<Vec<Product>> {
        let mut qb = QueryBuilder::<Postgres>::new(PRODUCT_SELECT);
        qb.push(" AND p.status = ").push_bind(ProductStatus::Published.as_str());
        if let Some(id) = &filter.collection_id { qb.push(" AND p.collection_id = ").push_bind(id.clone()); }
        if let Some(tag) = &filter.tag { qb.push(" AND ").push_bind(tag.clone()).push(" = ANY(p.tags)"); }
        qb.push(match options.order {
            ProductOrder::CreatedAtDesc => " ORDER BY p.created_at DESC",
            ProductOrder::CreatedAtAsc => " ORDER BY p.created_at ASC",
        });
        qb.push(" LIMIT ").push_bind(options.take as i64);
        let rows = qb.build_query_as::<ProductRow>().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|r| r.into_product(options.with_collection)).collect())
    }

    async fn retrieve_product(&self, id: &str) -> StoreResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{} AND p.id = $1", PRODUCT_SELECT))
            .bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| r.into_product(true)))
    }

    async fn resolve_collection_by_handle(&self, handle: &str) -> StoreResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM product_collections WHERE handle = $1 AND deleted_at IS NULL LIMIT 1")
            .bind(handle).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| r.0))
    }
}
