//! Query understanding for Vietnamese movie search.
//!
//! A search string is classified as a structured filter, a title lookup, or a
//! natural-language request, and the genres, country, year, and title it
//! mentions are pulled out into an [`ExtractionResult`].

pub mod classifier;
pub mod intent;
pub mod lexicon;
pub mod normalize;
pub mod parser;

pub use classifier::classify;
pub use intent::{ExtractionResult, QueryType};
pub use lexicon::Genre;
pub use parser::extract;
