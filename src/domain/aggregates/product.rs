//! Product Aggregate
//!
//! The homepage only reads products; this is the summary shape the catalog
//! hands out, not the full merchandising record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus { #[default] Draft, Proposed, Published, Rejected }

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self { Self::Draft => "draft", Self::Proposed => "proposed", Self::Published => "published", Self::Rejected => "rejected" }
    }
}

impl FromStr for ProductStatus {
    type Err = ProductError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "proposed" => Ok(Self::Proposed),
            "published" => Ok(Self::Published),
            "rejected" => Ok(Self::Rejected),
            other => Err(ProductError::UnknownStatus(other.to_string())),
        }
    }
}

/// Populated collection relation of a product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: String,
    pub handle: String,
    pub title: Option<String>,
}

impl CollectionRef {
    pub fn new(handle: impl Into<String>, title: impl Into<String>) -> Self {
        Self { id: format!("pcol_{}", Uuid::now_v7().simple()), handle: handle.into(), title: Some(title.into()) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: Option<String>,
    pub status: ProductStatus,
    pub thumbnail: Option<String>,
    pub collection_id: Option<String>,
    pub collection: Option<CollectionRef>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn create(title: impl Into<String>) -> Self {
        let title = title.into();
        let handle = title.to_lowercase().replace(' ', "-");
        Self {
            id: format!("prod_{}", Uuid::now_v7().simple()),
            title, handle: Some(handle), status: ProductStatus::Draft, thumbnail: None,
            collection_id: None, collection: None, tags: vec![], created_at: Utc::now(),
        }
    }

    pub fn publish(mut self) -> Self { self.status = ProductStatus::Published; self }
    pub fn in_collection(mut self, collection: &CollectionRef) -> Self {
        self.collection_id = Some(collection.id.clone());
        self.collection = Some(collection.clone());
        self
    }
    pub fn with_tags<I, S>(mut self, tags: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self { self.created_at = at; self }

    pub fn is_published(&self) -> bool { self.status == ProductStatus::Published }
    pub fn has_tag(&self, tag: &str) -> bool { self.tags.iter().any(|t| t == tag) }

    /// Handle of the populated collection relation, if any.
    pub fn collection_handle(&self) -> Option<&str> {
        self.collection.as_ref().map(|c| c.handle.as_str())
    }

    /// Collection id, whether or not the relation was populated.
    pub fn collection_key(&self) -> Option<&str> {
        self.collection_id.as_deref().or_else(|| self.collection.as_ref().map(|c| c.id.as_str()))
    }
}

#[derive(Debug, Clone)] pub enum ProductError { UnknownStatus(String) }
impl std::error::Error for ProductError {}
impl fmt::Display for ProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::UnknownStatus(s) => write!(f, "Unknown product status: {}", s) }
    }
}
