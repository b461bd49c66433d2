//! Collection id resolution with a per-request memo.

use std::collections::HashMap;
use crate::domain::value_objects::CollectionCandidate;
use crate::store::ProductCatalog;

/// Outcome of turning a configured id or handle into a collection id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    /// The catalog answered, but nothing matches the handle.
    Unresolved,
    /// The lookup itself failed.
    Error(String),
}

impl Resolution {
    pub fn id(&self) -> Option<&str> {
        match self { Self::Resolved(id) => Some(id), _ => None }
    }
}

/// Lives for one homepage build; never shared between requests.
pub struct CollectionResolver<'a> {
    catalog: &'a dyn ProductCatalog,
    memo: HashMap<String, Resolution>,
}

impl<'a> CollectionResolver<'a> {
    pub fn new(catalog: &'a dyn ProductCatalog) -> Self {
        Self { catalog, memo: HashMap::new() }
    }

    pub async fn resolve(&mut self, candidate: &str) -> Resolution {
        if let Some(hit) = self.memo.get(candidate) {
            return hit.clone();
        }
        let outcome = match CollectionCandidate::parse(candidate) {
            Err(_) => Resolution::Unresolved,
            Ok(CollectionCandidate::Id(id)) => Resolution::Resolved(id),
            Ok(CollectionCandidate::Handle(handle)) => match self.catalog.resolve_collection_by_handle(&handle).await {
                Ok(Some(id)) if !id.is_empty() => Resolution::Resolved(id),
                Ok(_) => {
                    tracing::debug!(handle = %handle, "no collection with handle");
                    Resolution::Unresolved
                }
                Err(e) => {
                    tracing::warn!(handle = %handle, error = %e, "collection lookup failed");
                    Resolution::Error(e.to_string())
                }
            },
        };
        self.memo.insert(candidate.to_string(), outcome.clone());
        outcome
    }

    pub fn memoized(&self) -> usize { self.memo.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::domain::aggregates::Product;
    use crate::store::{ListOptions, ProductFilter, StoreError, StoreResult};

    #[derive(Default)]
    struct CountingCatalog { lookups: AtomicUsize }

    #[async_trait]
    impl ProductCatalog for CountingCatalog {
        async fn list_published_products(&self, _: &ProductFilter, _: ListOptions) -> StoreResult<Vec<Product>> { Ok(vec![]) }
        async fn retrieve_product(&self, _: &str) -> StoreResult<Option<Product>> { Ok(None) }
        async fn resolve_collection_by_handle(&self, handle: &str) -> StoreResult<Option<String>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            match handle {
                "laptops" => Ok(Some("pcol_laptops".into())),
                "broken" => Err(StoreError::Unavailable("collection module offline".into())),
                _ => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn test_id_like_candidates_skip_catalog() {
        let catalog = CountingCatalog::default();
        let mut r = CollectionResolver::new(&catalog);
        assert_eq!(r.resolve("pcol_01J0ABC").await, Resolution::Resolved("pcol_01J0ABC".into()));
        assert_eq!(r.resolve("deadbeef-0001").await, Resolution::Resolved("deadbeef-0001".into()));
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unresolved_and_error_are_distinct() {
        let catalog = CountingCatalog::default();
        let mut r = CollectionResolver::new(&catalog);
        assert_eq!(r.resolve("laptops").await.id(), Some("pcol_laptops"));
        assert_eq!(r.resolve("phones").await, Resolution::Unresolved);
        assert!(matches!(r.resolve("broken").await, Resolution::Error(_)));
        assert_eq!(r.resolve("").await, Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_memoized_per_resolver() {
        let catalog = CountingCatalog::default();
        let mut r = CollectionResolver::new(&catalog);
        r.resolve("laptops").await;
        r.resolve("laptops").await;
        r.resolve("phones").await;
        r.resolve("phones").await;
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 2);
        assert_eq!(r.memoized(), 2);

        let mut fresh = CollectionResolver::new(&catalog);
        fresh.resolve("laptops").await;
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 3);
    }
}
