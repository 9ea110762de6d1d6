//! Search API access.
//!
//! A `Searcher` returns the current batch of candidate submissions. The
//! HTTP implementation maps the site's response keys onto `SearchEntry`
//! through a configurable `FieldMapping`.

mod api;
mod mapping;
mod types;

pub use api::ApiSearcher;
pub use mapping::{entry_from_object, parse_search_response};
pub use types::*;
