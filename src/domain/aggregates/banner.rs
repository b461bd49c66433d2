//! Banner Aggregate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use crate::domain::value_objects::MediaOrigin;

/// Fixed placement a banner is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerSlot { Hero, Single, Dual, Triple }

impl BannerSlot {
    /// Response order of the banner sections.
    pub const ALL: [BannerSlot; 4] = [Self::Hero, Self::Single, Self::Dual, Self::Triple];

    pub fn as_str(&self) -> &'static str {
        match self { Self::Hero => "hero", Self::Single => "single", Self::Dual => "dual", Self::Triple => "triple" }
    }

    /// Maximum number of banners served for the slot.
    pub fn limit(&self) -> usize {
        match self { Self::Hero => 12, Self::Single => 4, Self::Dual => 4, Self::Triple => 6 }
    }

    pub fn section_id(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Single => "single_banner",
            Self::Dual => "dual_banner",
            Self::Triple => "triple_banner",
        }
    }
}

impl fmt::Display for BannerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for BannerSlot {
    type Err = BannerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" => Ok(Self::Hero),
            "single" => Ok(Self::Single),
            "dual" => Ok(Self::Dual),
            "triple" => Ok(Self::Triple),
            other => Err(BannerError::UnknownSlot(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub id: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub position: BannerSlot,
    pub image_url: String,
    pub is_active: bool,
    pub display_order: i32,
}

impl Banner {
    pub fn new(position: BannerSlot, image_url: impl Into<String>) -> Self {
        Self {
            id: format!("ban_{}", Uuid::now_v7().simple()),
            title: None, link: None, position, image_url: image_url.into(),
            is_active: true, display_order: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self { self.title = Some(title.into()); self }
    pub fn with_link(mut self, link: impl Into<String>) -> Self { self.link = Some(link.into()); self }
    pub fn with_display_order(mut self, order: i32) -> Self { self.display_order = order; self }
    pub fn deactivate(mut self) -> Self { self.is_active = false; self }

    /// Response shape of the banner, with its image anchored to `origin`.
    pub fn view(&self, origin: &MediaOrigin) -> BannerView {
        let url = origin.absolutize(&self.image_url);
        BannerView {
            id: self.id.clone(),
            title: non_blank(self.title.as_deref()),
            link: non_blank(self.link.as_deref()),
            position: self.position,
            image_url: url.clone(),
            media: MediaRef { url },
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerView {
    pub id: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub position: BannerSlot,
    pub image_url: Option<String>,
    pub media: MediaRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef { pub url: Option<String> }

#[derive(Debug, Clone)] pub enum BannerError { UnknownSlot(String) }
impl std::error::Error for BannerError {}
impl fmt::Display for BannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::UnknownSlot(s) => write!(f, "Unknown banner slot: {}", s) }
    }
}
