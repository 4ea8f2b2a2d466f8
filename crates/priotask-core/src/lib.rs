pub mod config;
pub mod json;
pub mod models;
pub mod persistence;
pub mod store;

pub use config::StoreConfig;
pub use store::{TaskListing, TaskStore};
