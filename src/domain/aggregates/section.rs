//! Homepage sections, built fresh for every request and never stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::aggregates::banner::{BannerSlot, BannerView};
use crate::domain::aggregates::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind { Banner, ProductGrid }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind { Product }

/// Lightweight reference to a product inside a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub product_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionItem {
    Banner(BannerView),
    Product(ProductItem),
}

#[derive(Clone, Debug, Serialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<BannerSlot>,
    pub items: Vec<SectionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

impl Section {
    pub fn banners(slot: BannerSlot, views: &[BannerView]) -> Self {
        Self {
            id: slot.section_id().to_string(),
            kind: SectionKind::Banner,
            title: None,
            // hero is the implicit default placement
            position: (slot != BannerSlot::Hero).then_some(slot),
            items: views.iter().cloned().map(SectionItem::Banner).collect(),
            products: None,
        }
    }

    pub fn product_grid(id: &str, title: &str, products: Vec<Product>) -> Self {
        let items = products.iter()
            .map(|p| SectionItem::Product(ProductItem { id: p.id.clone(), kind: ItemKind::Product, product_id: p.id.clone() }))
            .collect();
        Self {
            id: id.to_string(),
            kind: SectionKind::ProductGrid,
            title: Some(title.to_string()),
            position: None,
            items,
            products: Some(products),
        }
    }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

/// Banner sets keyed by slot name.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BannerGroups {
    pub hero: Vec<BannerView>,
    pub single: Vec<BannerView>,
    pub dual: Vec<BannerView>,
    pub triple: Vec<BannerView>,
}

impl BannerGroups {
    pub fn get(&self, slot: BannerSlot) -> &[BannerView] {
        match slot { BannerSlot::Hero => &self.hero, BannerSlot::Single => &self.single, BannerSlot::Dual => &self.dual, BannerSlot::Triple => &self.triple }
    }
    pub fn set(&mut self, slot: BannerSlot, views: Vec<BannerView>) {
        match slot { BannerSlot::Hero => self.hero = views, BannerSlot::Single => self.single = views, BannerSlot::Dual => self.dual = views, BannerSlot::Triple => self.triple = views }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HomepagePayload {
    pub locale: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
    pub banners: BannerGroups,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::banner::Banner;
    use crate::domain::value_objects::MediaOrigin;

    #[test]
    fn test_product_grid_items() {
        let p = Product::create("Laptop").publish();
        let s = Section::product_grid("best_in_laptops", "Best in Laptops", vec![p.clone()]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "product_grid");
        assert_eq!(json["items"][0]["type"], "product");
        assert_eq!(json["items"][0]["product_id"], p.id.as_str());
        assert_eq!(json["products"][0]["id"], p.id.as_str());
    }
    #[test]
    fn test_banner_section_position() {
        let v = Banner::new(BannerSlot::Dual, "/d.png").view(&MediaOrigin::default());
        let dual = serde_json::to_value(Section::banners(BannerSlot::Dual, &[v])).unwrap();
        assert_eq!(dual["position"], "dual");
        assert!(dual.get("products").is_none());
        let hero = serde_json::to_value(Section::banners(BannerSlot::Hero, &[])).unwrap();
        assert!(hero.get("position").is_none());
        assert_eq!(hero["items"], serde_json::json!([]));
    }
}
