//! Header filtering.
//!
//! `HeaderName`s are stored lowercase, so every comparison here is
//! case-insensitive without extra work.

use axum::http::header::{HeaderMap, HeaderName, CONNECTION, TRANSFER_ENCODING};

/// `keep-alive` has no constant in the `http` crate.
pub const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");

/// A deny-list over header names.
#[derive(Debug, Clone)]
pub struct HeaderFilter {
    denied: Vec<HeaderName>,
}

impl HeaderFilter {
    /// Build a filter rejecting the given names.
    pub fn deny(names: impl IntoIterator<Item = HeaderName>) -> Self {
        Self {
            denied: names.into_iter().collect(),
        }
    }

    /// The hop-by-hop headers never relayed back to the client.
    pub fn hop_by_hop() -> Self {
        Self::deny([TRANSFER_ENCODING, CONNECTION, KEEP_ALIVE])
    }

    /// Whether a header may pass.
    pub fn allows(&self, name: &HeaderName) -> bool {
        !self.denied.contains(name)
    }

    /// Copy every allowed entry, preserving order and repeated values.
    pub fn apply(&self, headers: &HeaderMap) -> HeaderMap {
        let mut filtered = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            if self.allows(name) {
                filtered.append(name.clone(), value.clone());
            }
        }
        filtered
    }
}

impl Default for HeaderFilter {
    fn default() -> Self {
        Self::hop_by_hop()
    }
}
