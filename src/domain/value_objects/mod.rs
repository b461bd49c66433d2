//! Value Objects for the storefront homepage

use serde::{Deserialize, Serialize};
use std::fmt;

const COLLECTION_ID_PREFIX: &str = "pcol_";
const DEFAULT_ORIGIN: &str = "http://localhost:9000";

/// A collection reference as written in configuration: either an opaque id
/// or a handle that still has to be looked up in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollectionCandidate {
    Id(String),
    Handle(String),
}

impl CollectionCandidate {
    pub fn parse(value: impl Into<String>) -> Result<Self, CandidateError> {
        let value = value.into().trim().to_string();
        if value.is_empty() { return Err(CandidateError::Empty); }
        if looks_like_id(&value) { Ok(Self::Id(value)) } else { Ok(Self::Handle(value)) }
    }
    pub fn is_id(&self) -> bool { matches!(self, Self::Id(_)) }
}

/// `pcol_` prefixed, or hex/uuid-like with at least 8 characters.
fn looks_like_id(value: &str) -> bool {
    value.starts_with(COLLECTION_ID_PREFIX)
        || (value.len() >= 8 && value.chars().all(|c| c.is_ascii_hexdigit() || c == '-'))
}

#[derive(Debug, Clone)] pub enum CandidateError { Empty }
impl std::error::Error for CandidateError {}
impl fmt::Display for CandidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Collection candidate empty") }
}

/// Public origin that relative media references are anchored to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaOrigin(String);

impl MediaOrigin {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() { Self(DEFAULT_ORIGIN.to_string()) } else { Self(trimmed.to_string()) }
    }
    pub fn as_str(&self) -> &str { &self.0 }

    /// Returns `reference` unchanged when it already carries an http(s)
    /// scheme, otherwise joins it to the origin with exactly one slash.
    /// Blank references yield `None`.
    pub fn absolutize(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();
        if reference.is_empty() { return None; }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Some(reference.to_string());
        }
        Some(format!("{}/{}", self.0, reference.trim_start_matches('/')))
    }
}

impl Default for MediaOrigin { fn default() -> Self { Self(DEFAULT_ORIGIN.to_string()) } }

impl fmt::Display for MediaOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_candidate_prefixed_id() {
        assert!(CollectionCandidate::parse("pcol_01HXYZ").unwrap().is_id());
    }
    #[test]
    fn test_candidate_hex_like_id() {
        assert!(CollectionCandidate::parse("0a1b2c3d-4e5f").unwrap().is_id());
        assert!(!CollectionCandidate::parse("abc123").unwrap().is_id());
    }
    #[test]
    fn test_candidate_handle() {
        let c = CollectionCandidate::parse(" hot-deals ").unwrap();
        assert_eq!(c, CollectionCandidate::Handle("hot-deals".into()));
        assert!(CollectionCandidate::parse("   ").is_err());
    }
    #[test]
    fn test_absolutize_passes_schemed_urls() {
        let o = MediaOrigin::new("https://shop.example.com");
        assert_eq!(o.absolutize("http://cdn.example.com/a.png").as_deref(), Some("http://cdn.example.com/a.png"));
        assert_eq!(o.absolutize("https://cdn.example.com/a.png").as_deref(), Some("https://cdn.example.com/a.png"));
    }
    #[test]
    fn test_absolutize_single_slash() {
        let o = MediaOrigin::new("https://shop.example.com/");
        assert_eq!(o.absolutize("/uploads/x.png").as_deref(), Some("https://shop.example.com/uploads/x.png"));
        assert_eq!(o.absolutize("uploads/x.png").as_deref(), Some("https://shop.example.com/uploads/x.png"));
        assert_eq!(o.absolutize("//uploads/x.png").as_deref(), Some("https://shop.example.com/uploads/x.png"));
        assert_eq!(o.absolutize(""), None);
    }
    #[test]
    fn test_origin_default() {
        assert_eq!(MediaOrigin::new("").as_str(), "http://localhost:9000");
    }
}
