//! Service layer for the item store.
//! - `item`: the record type, the `ItemStore` trait and its in-memory implementation.
//! - `errors`: error kinds surfaced to the HTTP layer.

pub mod errors;
pub mod item;
