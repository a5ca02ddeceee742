//! Shared endpoint primitives
//!
//! - [`Page`] for `limit` / `offset` pagination on list endpoints
//! - [`CountResponse`] for the `count.json` endpoints
//! - [`encode_id`] for identifiers interpolated into paths
//!
//! ```rust
//! use signaturit_sdk::api::common::{encode_id, Page};
//!
//! let page = Page::default();
//! assert_eq!((page.limit, page.offset), (100, 0));
//! assert_eq!(encode_id("a/b"), "a%2Fb");
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape an identifier for use as a single path segment.
pub fn encode_id(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// Pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Maximum number of records to return
    pub limit: u32,
    /// Number of records to skip
    pub offset: u32,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// The page following this one.
    pub fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

/// Body of the `count.json` endpoints.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_id_keeps_uuid() {
        let id = "6f6c974e-2910-11e4-b3d4-0aa7697eb409";
        assert_eq!(encode_id(id), id);
    }

    #[test]
    fn test_encode_id_escapes_separators() {
        assert_eq!(encode_id("../x?y"), "..%2Fx%3Fy");
        assert_eq!(encode_id("a b"), "a%20b");
    }

    #[test]
    fn test_page_next() {
        let page = Page::new(25, 50).next();
        assert_eq!(page, Page::new(25, 75));
    }

    #[test]
    fn test_count_response() {
        let count: CountResponse = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(count.count, 12);
    }
}
