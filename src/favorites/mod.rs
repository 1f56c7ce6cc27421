//! Per-account favorite books

pub mod store;

pub use store::FavoritesStore;
