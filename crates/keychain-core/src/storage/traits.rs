//! The store seam
//!
//! Every backend speaks the same attribute-dictionary protocol and answers
//! with raw status codes, so the handle layer classifies outcomes in one
//! place regardless of where items live.

use keychain_status::StatusCode;

use crate::options::Attributes;

/// A search against the store
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub attributes: Attributes,
    /// Return every match instead of the first one
    pub match_all: bool,
    /// Include the secret bytes (`AttrKey::ValueData`) in each record
    pub want_data: bool,
    /// Include the descriptive attributes in each record
    pub want_attributes: bool,
}

impl SearchRequest {
    /// Single-item lookup returning only the secret bytes
    pub fn data_of(attributes: Attributes) -> Self {
        Self {
            attributes,
            match_all: false,
            want_data: true,
            want_attributes: false,
        }
    }

    /// Single-item existence check returning attributes only
    pub fn exists(attributes: Attributes) -> Self {
        Self {
            attributes,
            match_all: false,
            want_data: false,
            want_attributes: true,
        }
    }

    /// Enumeration of every match with data and attributes
    pub fn everything(attributes: Attributes) -> Self {
        Self {
            attributes,
            match_all: true,
            want_data: true,
            want_attributes: true,
        }
    }
}

/// Raw outcome of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub status: StatusCode,
    pub records: Vec<Attributes>,
}

impl SearchResponse {
    pub fn failed(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            records: Vec::new(),
        }
    }
}

/// A credential store holding attribute-keyed items
///
/// Calls block until the store answers. Implementations must be safe to
/// share between threads; each call is atomic with respect to the others.
pub trait ItemStore: Send + Sync {
    fn search(&self, request: &SearchRequest) -> SearchResponse;

    /// Insert one item described by `attributes`
    fn insert(&self, attributes: &Attributes) -> StatusCode;

    /// Apply `changes` to every item matching `query`
    fn update(&self, query: &Attributes, changes: &Attributes) -> StatusCode;

    /// Delete the first match, or every match when `match_all` is set
    fn delete(&self, query: &Attributes, match_all: bool) -> StatusCode;

    /// Human-readable name of the backend
    fn backend_name(&self) -> &'static str;
}
