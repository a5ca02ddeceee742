//! Parameter marshaling
//!
//! Turns call arguments into wire bodies:
//!
//! - [`flatten`] - bracket-notation form fields from a [`Value`](crate::types::Value) tree
//! - [`query`] - query parameters with the `data` / `ids` special cases
//! - [`assemble`] - per-endpoint bodies (query, multipart, JSON, raw bytes)

pub mod assemble;
pub mod flatten;
pub mod query;

pub use assemble::{
    assemble_form, assemble_json, assemble_multipart, assemble_multipart_as, assemble_query,
    assemble_raw, Recipients,
};
pub use flatten::{flatten, flatten_map, flatten_text, nest};
pub use query::build_query;
