//! In-process store

use keychain_status::{Status, StatusCode};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::error;

use super::{ItemStore, RecordSet, SearchRequest, SearchResponse};
use crate::options::Attributes;

/// Store keeping items in memory for the lifetime of the value
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<RecordSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items across all partitions
    pub fn len(&self) -> usize {
        self.read().map_or(0, |records| records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Option<RwLockReadGuard<'_, RecordSet>> {
        self.records
            .read()
            .map_err(|_| error!("Memory store lock poisoned"))
            .ok()
    }

    fn write(&self) -> Option<RwLockWriteGuard<'_, RecordSet>> {
        self.records
            .write()
            .map_err(|_| error!("Memory store lock poisoned"))
            .ok()
    }
}

impl ItemStore for MemoryStore {
    fn search(&self, request: &SearchRequest) -> SearchResponse {
        match self.read() {
            Some(records) => records.search(request),
            None => SearchResponse::failed(Status::NotAvailable),
        }
    }

    fn insert(&self, attributes: &Attributes) -> StatusCode {
        self.write()
            .map_or(Status::NotAvailable.code(), |mut records| {
                records.insert(attributes)
            })
    }

    fn update(&self, query: &Attributes, changes: &Attributes) -> StatusCode {
        self.write()
            .map_or(Status::NotAvailable.code(), |mut records| {
                records.update(query, changes)
            })
    }

    fn delete(&self, query: &Attributes, match_all: bool) -> StatusCode {
        self.write()
            .map_or(Status::NotAvailable.code(), |mut records| {
                records.delete(query, match_all)
            })
    }

    fn backend_name(&self) -> &'static str {
        "Memory"
    }
}
