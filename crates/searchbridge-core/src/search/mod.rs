//! Filtered vector search
//!
//! The filter predicate type, the vector index client, and the pipeline that
//! ties query understanding to the index query.

mod filter;
mod index;
mod pipeline;

pub use filter::FilterPredicate;
pub use index::{PineconeIndex, RawMatch, VectorIndex};
pub use pipeline::{MatchResult, SearchPipeline, SearchResponse, DEFAULT_TOP_K};
