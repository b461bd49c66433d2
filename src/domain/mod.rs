//! Domain model: banners, product summaries and the homepage sections built from them.
pub mod aggregates;
pub mod value_objects;
