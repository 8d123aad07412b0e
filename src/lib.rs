pub mod app_state;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use database::{MemoryTagStore, MySqlTagStore, NamePredicate, TagStore};
pub use error::TagError;
pub use models::Tag;
pub use services::tag_service::TagResolver;
pub use services::taggable::Taggable;
pub use utils::normalization::{normalize, normalize_bytes, normalize_opt};
