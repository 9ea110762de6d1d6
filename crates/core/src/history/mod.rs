//! Bounded history of posted submission ids.
//!
//! The history is the only durable state of the bot. It is loaded at the
//! start of every cycle and written back before publishing.

mod json_store;
mod store;

pub use json_store::JsonHistoryStore;
pub use store::{append_and_trim, trim, HistoryError, HistoryStore};
