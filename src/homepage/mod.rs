//! Homepage aggregation.
//!
//! Banners come straight from the banner store, one query per slot. Product
//! grids are carved out of a single bulk catalog read by collection handle;
//! a grid left empty by that partition is looked up on its own through the
//! configured or default collection handles, then by tag. Unless disabled,
//! every product is re-retrieved by id before it is served.

pub mod resolver;
pub mod sections;

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use crate::config::HomepageConfig;
use crate::domain::aggregates::{BannerGroups, BannerSlot, HomepagePayload, Product, Section};
use crate::domain::value_objects::MediaOrigin;
use crate::store::{BannerStore, ListOptions, ProductCatalog, ProductFilter, ProductOrder};
use crate::{HomepageError, Result};

pub use resolver::{CollectionResolver, Resolution};
pub use sections::{partition, ProductSection};

const BULK_TAKE: usize = 200;
const DEFAULT_LOCALE: &str = "en";

pub struct HomepageAggregator {
    banners: Arc<dyn BannerStore>,
    catalog: Arc<dyn ProductCatalog>,
    origin: MediaOrigin,
    config: HomepageConfig,
}

impl HomepageAggregator {
    pub fn new(banners: Arc<dyn BannerStore>, catalog: Arc<dyn ProductCatalog>, origin: MediaOrigin, config: HomepageConfig) -> Self {
        Self { banners, catalog, origin, config }
    }

    #[instrument(skip(self))]
    pub async fn build(&self, locale: Option<String>) -> Result<HomepagePayload> {
        let locale = locale.filter(|l| !l.is_empty()).unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let mut banners = BannerGroups::default();
        for slot in BannerSlot::ALL {
            let rows = self.banners.list_active_banners(slot, slot.limit()).await
                .map_err(|e| HomepageError::BannerStoreUnavailable(e.to_string()))?;
            banners.set(slot, rows.iter().take(slot.limit()).map(|b| b.view(&self.origin)).collect());
        }

        let catalog = self.fetch_catalog().await?;
        let mut resolver = CollectionResolver::new(self.catalog.as_ref());

        let mut sections: Vec<Section> = BannerSlot::ALL.iter().map(|slot| Section::banners(*slot, banners.get(*slot))).collect();
        for section in ProductSection::ALL {
            let products = self.products_for(section, &catalog, &mut resolver).await;
            sections.push(Section::product_grid(section.id(), section.title(), products));
        }

        debug!(products = catalog.len(), collections_resolved = resolver.memoized(), "homepage assembled");
        Ok(HomepagePayload { locale, generated_at: Utc::now(), sections, banners })
    }

    async fn fetch_catalog(&self) -> Result<Vec<Product>> {
        let options = ListOptions { take: BULK_TAKE, order: ProductOrder::CreatedAtDesc, with_collection: true };
        let products = self.catalog.list_published_products(&ProductFilter::default(), options).await
            .map_err(|e| HomepageError::CatalogUnavailable(e.to_string()))?;
        Ok(products.into_iter().filter(|p| !p.id.is_empty()).collect())
    }

    async fn products_for(&self, section: ProductSection, catalog: &[Product], resolver: &mut CollectionResolver<'_>) -> Vec<Product> {
        let grouped = self.verified(partition(catalog, section)).await;
        if !grouped.is_empty() {
            return grouped;
        }
        if section == ProductSection::Recommended {
            return self.verified(catalog.iter().take(section.take()).cloned().collect()).await;
        }
        self.lookup_section(section, resolver).await
    }

    async fn lookup_section(&self, section: ProductSection, resolver: &mut CollectionResolver<'_>) -> Vec<Product> {
        let configured = self.config.collection_for(section.id());
        let mut candidates: Vec<&str> = configured.into_iter().collect();
        for fallback in section.default_candidates() {
            if Some(*fallback) != configured {
                candidates.push(fallback);
            }
        }
        for candidate in candidates {
            let found = self.products_in_collection(section, candidate, resolver).await;
            if !found.is_empty() {
                return found;
            }
        }

        if let Some(tag) = self.config.tag_for(section.id()) {
            match self.catalog.list_published_products(&ProductFilter::tag(tag), ListOptions::take(section.take())).await {
                Ok(products) => return self.verified(products).await,
                Err(e) => warn!(section = section.id(), tag, error = %e, "tag lookup failed"),
            }
        }
        Vec::new()
    }

    async fn products_in_collection(&self, section: ProductSection, candidate: &str, resolver: &mut CollectionResolver<'_>) -> Vec<Product> {
        let id = match resolver.resolve(candidate).await {
            Resolution::Resolved(id) => id,
            Resolution::Unresolved => return Vec::new(),
            Resolution::Error(detail) => {
                warn!(section = section.id(), candidate, %detail, "skipping collection candidate");
                return Vec::new();
            }
        };
        let listed = match self.catalog.list_published_products(&ProductFilter::collection(id.as_str()), ListOptions::take(section.take())).await {
            Ok(products) => products,
            Err(e) => {
                warn!(section = section.id(), collection_id = %id, error = %e, "collection listing failed");
                return Vec::new();
            }
        };
        self.verified(listed).await
    }

    async fn verified(&self, products: Vec<Product>) -> Vec<Product> {
        if self.config.verify_products && !products.is_empty() { self.drop_ghosts(products).await } else { products }
    }

    /// Keeps only products the catalog can still retrieve by id.
    async fn drop_ghosts(&self, products: Vec<Product>) -> Vec<Product> {
        let mut live = Vec::with_capacity(products.len());
        for product in products.into_iter().filter(|p| !p.id.is_empty()) {
            match self.catalog.retrieve_product(&product.id).await {
                Ok(Some(_)) => live.push(product),
                Ok(None) => info!(product_id = %product.id, "skipping non-existent product"),
                Err(e) => info!(product_id = %product.id, error = %e, "skipping product that could not be re-retrieved"),
            }
        }
        live
    }
}
