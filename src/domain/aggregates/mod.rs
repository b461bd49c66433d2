//! Aggregates module
pub mod banner;
pub mod product;
pub mod section;

pub use banner::{Banner, BannerError, BannerSlot, BannerView, MediaRef};
pub use product::{CollectionRef, Product, ProductError, ProductStatus};
pub use section::{BannerGroups, HomepagePayload, ItemKind, ProductItem, Section, SectionItem, SectionKind};
