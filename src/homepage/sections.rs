//! Fixed table of product grid sections.

use crate::domain::aggregates::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductSection { HostDeals, BestInPowerbanks, BestInLaptops, NewArrival, Recommended }

impl ProductSection {
    /// Response order of the product grids, after the banner sections.
    pub const ALL: [ProductSection; 5] = [
        Self::HostDeals, Self::BestInPowerbanks, Self::BestInLaptops, Self::NewArrival, Self::Recommended,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::HostDeals => "host_deals",
            Self::BestInPowerbanks => "best_in_powerbanks",
            Self::BestInLaptops => "best_in_laptops",
            Self::NewArrival => "new_arrival",
            Self::Recommended => "recommended",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::HostDeals => "Host Deals",
            Self::BestInPowerbanks => "Best in Powerbanks",
            Self::BestInLaptops => "Best in Laptops",
            Self::NewArrival => "New Arrivals",
            Self::Recommended => "Recommended",
        }
    }

    pub fn take(&self) -> usize {
        match self { Self::NewArrival | Self::Recommended => 12, _ => 8 }
    }

    /// Collection handles accepted when partitioning the bulk product set.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::HostDeals => &["hot-deals"],
            Self::BestInPowerbanks => &["best-in-power-banks", "powerbanks", "powerbank"],
            Self::BestInLaptops => &["best-in-laptops", "laptops", "laptop"],
            Self::NewArrival => &["new-arrival", "new-arrivals"],
            Self::Recommended => &["recommended", "featured"],
        }
    }

    /// Handles tried, in order, when looking a collection up one section at a time.
    pub fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            Self::HostDeals => &["hot-deals", "hot_deal"],
            Self::BestInPowerbanks => &["powerbanks", "powerbank"],
            Self::BestInLaptops => &["laptops", "laptop"],
            Self::NewArrival => &["new-arrival", "new-arrivals"],
            Self::Recommended => &["recommended", "featured"],
        }
    }

    pub fn accepts(&self, handle: &str) -> bool {
        self.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(handle))
    }
}

/// Products of `section` within an already fetched set, order preserved,
/// capped at the section's take.
pub fn partition(products: &[Product], section: ProductSection) -> Vec<Product> {
    products.iter()
        .filter(|p| p.collection_handle().map_or(false, |h| section.accepts(h)))
        .take(section.take())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::CollectionRef;

    #[test]
    fn test_section_order() {
        let ids: Vec<&str> = ProductSection::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["host_deals", "best_in_powerbanks", "best_in_laptops", "new_arrival", "recommended"]);
    }

    #[test]
    fn test_aliases_case_insensitive() {
        assert!(ProductSection::BestInPowerbanks.accepts("Best-In-Power-Banks"));
        assert!(ProductSection::BestInPowerbanks.accepts("POWERBANK"));
        assert!(!ProductSection::HostDeals.accepts("hot_deal"));
    }

    #[test]
    fn test_partition_caps_and_preserves_order() {
        let laptops = CollectionRef::new("Laptops", "Laptops");
        let phones = CollectionRef::new("phones", "Phones");
        let mut products: Vec<Product> = (0..10).map(|i| Product::create(format!("Laptop {}", i)).publish().in_collection(&laptops)).collect();
        products.insert(3, Product::create("Phone").publish().in_collection(&phones));
        products.push(Product::create("Loose").publish());

        let picked = partition(&products, ProductSection::BestInLaptops);
        assert_eq!(picked.len(), 8);
        let expected: Vec<&str> = products.iter().filter(|p| p.title.starts_with("Laptop")).take(8).map(|p| p.id.as_str()).collect();
        let got: Vec<&str> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, expected);
        assert!(partition(&products, ProductSection::NewArrival).is_empty());
    }
}
