pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod extractor;
pub mod semantic;

pub use error::PhimtraError;
pub use extractor::{FallbackSettings, QueryIntentExtractor};
