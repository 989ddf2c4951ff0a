//! Item matching shared by the in-process backends

use keychain_status::{Status, StatusCode};
use serde::{Deserialize, Serialize};

use super::{SearchRequest, SearchResponse};
use crate::options::{Accessibility, AttrKey, AttrValue, Attributes, ItemScope};

/// Ordered collection of stored items with the store's matching rules:
///
/// - every request names a known item class
/// - query values match by equality, `AttrValue::Any` matches anything
/// - a query without a sync key only sees non-synchronizable items
/// - two items of a class may not share their identity attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<Attributes>,
}

fn check_class(attributes: &Attributes) -> Result<ItemScope, Status> {
    match attributes.text(AttrKey::Class) {
        None => Err(Status::ItemClassMissing),
        Some(code) => ItemScope::from_code(code).ok_or(Status::NoSuchClass),
    }
}

fn matches(query: &Attributes, record: &Attributes) -> bool {
    let sync_ok = query.contains_key(AttrKey::Synchronizable)
        || record.boolean(AttrKey::Synchronizable) != Some(true);

    sync_ok
        && query.iter().all(|(key, wanted)| {
            record
                .get(key)
                .map_or(false, |stored| wanted.matches(stored))
        })
}

fn identity(record: &Attributes) -> Attributes {
    record
        .iter()
        .filter(|(key, _)| key.is_identity())
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

fn shape(record: &Attributes, request: &SearchRequest) -> Attributes {
    record
        .iter()
        .filter(|(key, _)| {
            if *key == AttrKey::ValueData {
                request.want_data
            } else {
                request.want_attributes
            }
        })
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Attributes>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Attributes] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, query: &Attributes) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| matches(query, record))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        if let Err(status) = check_class(&request.attributes) {
            return SearchResponse::failed(status);
        }

        let mut found = self
            .records
            .iter()
            .filter(|record| matches(&request.attributes, record))
            .map(|record| shape(record, request));

        let records: Vec<Attributes> = if request.match_all {
            found.collect()
        } else {
            found.next().into_iter().collect()
        };

        if records.is_empty() {
            SearchResponse::failed(Status::ItemNotFound)
        } else {
            SearchResponse {
                status: Status::Success.code(),
                records,
            }
        }
    }

    pub fn insert(&mut self, attributes: &Attributes) -> StatusCode {
        if let Err(status) = check_class(attributes) {
            return status.code();
        }
        if attributes.get(AttrKey::Synchronizable) == Some(&AttrValue::Any) {
            return Status::Param.code();
        }

        let mut record = attributes.clone();
        if !record.contains_key(AttrKey::Accessible) {
            record.insert(AttrKey::Accessible, Accessibility::WhenUnlocked.code());
        }
        if !record.contains_key(AttrKey::Synchronizable) {
            record.insert(AttrKey::Synchronizable, false);
        }

        let key = identity(&record);
        if self.records.iter().any(|existing| identity(existing) == key) {
            return Status::DuplicateItem.code();
        }

        self.records.push(record);
        Status::Success.code()
    }

    /// Applies to every match or to none
    pub fn update(&mut self, query: &Attributes, changes: &Attributes) -> StatusCode {
        if let Err(status) = check_class(query) {
            return status.code();
        }
        if changes.contains_key(AttrKey::Class)
            || changes.get(AttrKey::Synchronizable) == Some(&AttrValue::Any)
        {
            return Status::Param.code();
        }

        let targets = self.matching(query);
        if targets.is_empty() {
            return Status::ItemNotFound.code();
        }

        let updated: Vec<Attributes> = targets
            .iter()
            .map(|&index| {
                let mut record = self.records[index].clone();
                record.merge(changes);
                record
            })
            .collect();

        let mut keys: Vec<Attributes> = self
            .records
            .iter()
            .enumerate()
            .filter(|(index, _)| !targets.contains(index))
            .map(|(_, record)| identity(record))
            .collect();
        for record in &updated {
            let key = identity(record);
            if keys.contains(&key) {
                return Status::DuplicateItem.code();
            }
            keys.push(key);
        }

        for (index, record) in targets.into_iter().zip(updated) {
            self.records[index] = record;
        }
        Status::Success.code()
    }

    pub fn delete(&mut self, query: &Attributes, match_all: bool) -> StatusCode {
        if let Err(status) = check_class(query) {
            return status.code();
        }

        let mut targets = self.matching(query);
        if targets.is_empty() {
            return Status::ItemNotFound.code();
        }
        if !match_all {
            targets.truncate(1);
        }

        for index in targets.into_iter().rev() {
            self.records.remove(index);
        }
        Status::Success.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(service: &str, account: &str) -> Attributes {
        Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, service)
            .with(AttrKey::Account, account)
    }

    fn item(service: &str, account: &str, data: &[u8]) -> Attributes {
        generic(service, account)
            .with(AttrKey::ValueData, AttrValue::Data(data.to_vec()))
            .with(AttrKey::Synchronizable, false)
    }

    #[test]
    fn test_class_required() {
        let mut set = RecordSet::new();
        let attrs = Attributes::new().with(AttrKey::Service, "svc");
        assert_eq!(set.insert(&attrs), Status::ItemClassMissing.code());
        assert_eq!(
            set.search(&SearchRequest::exists(attrs)).status,
            Status::ItemClassMissing.code()
        );

        let bad = Attributes::new().with(AttrKey::Class, "keys");
        assert_eq!(set.delete(&bad, true), Status::NoSuchClass.code());
    }

    #[test]
    fn test_insert_defaults_and_duplicates() {
        let mut set = RecordSet::new();
        let attrs = generic("svc", "token").with(AttrKey::ValueData, AttrValue::Data(vec![1]));
        assert_eq!(set.insert(&attrs), 0);
        assert_eq!(set.records()[0].text(AttrKey::Accessible), Some("ak"));
        assert_eq!(set.records()[0].boolean(AttrKey::Synchronizable), Some(false));

        // Different data, same identity
        let again = generic("svc", "token").with(AttrKey::ValueData, AttrValue::Data(vec![2]));
        assert_eq!(set.insert(&again), Status::DuplicateItem.code());

        // Same account under a synchronizable flag is a different item
        let synced = again.with(AttrKey::Synchronizable, true);
        assert_eq!(set.insert(&synced), 0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_insert_rejects_sync_wildcard() {
        let mut set = RecordSet::new();
        let attrs = generic("svc", "k").with(AttrKey::Synchronizable, AttrValue::Any);
        assert_eq!(set.insert(&attrs), Status::Param.code());
    }

    #[test]
    fn test_search_shapes_records() {
        let mut set = RecordSet::new();
        set.insert(&item("svc", "a", b"one"));
        set.insert(&item("svc", "b", b"two"));
        set.insert(&item("other", "c", b"three"));

        let query = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "svc");

        let first = set.search(&SearchRequest::data_of(query.clone()));
        assert_eq!(first.status, 0);
        assert_eq!(first.records.len(), 1);
        assert_eq!(first.records[0].len(), 1);
        assert_eq!(first.records[0].data(AttrKey::ValueData), Some(&b"one"[..]));

        let existing = set.search(&SearchRequest::exists(query.clone()));
        assert!(!existing.records[0].contains_key(AttrKey::ValueData));
        assert_eq!(existing.records[0].text(AttrKey::Account), Some("a"));

        let all = set.search(&SearchRequest::everything(query));
        assert_eq!(all.records.len(), 2);
    }

    #[test]
    fn test_search_not_found() {
        let set = RecordSet::new();
        let response = set.search(&SearchRequest::exists(generic("svc", "a")));
        assert_eq!(response.status, Status::ItemNotFound.code());
        assert!(response.records.is_empty());
    }

    #[test]
    fn test_sync_visibility() {
        let mut set = RecordSet::new();
        set.insert(&item("svc", "a", b"x").with(AttrKey::Synchronizable, true));

        let plain = generic("svc", "a");
        assert_eq!(
            set.search(&SearchRequest::exists(plain.clone())).status,
            Status::ItemNotFound.code()
        );

        let any = plain.with(AttrKey::Synchronizable, AttrValue::Any);
        assert_eq!(set.search(&SearchRequest::exists(any)).status, 0);
    }

    #[test]
    fn test_update_all_matches() {
        let mut set = RecordSet::new();
        set.insert(&item("svc", "a", b"1"));
        set.insert(&item("svc", "b", b"2"));

        let query = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "svc");
        let changes = Attributes::new().with(AttrKey::Label, "shared");
        assert_eq!(set.update(&query, &changes), 0);
        assert!(set
            .records()
            .iter()
            .all(|r| r.text(AttrKey::Label) == Some("shared")));
    }

    #[test]
    fn test_update_missing_and_collision() {
        let mut set = RecordSet::new();
        let changes = Attributes::new().with(AttrKey::ValueData, AttrValue::Data(vec![9]));
        assert_eq!(
            set.update(&generic("svc", "a"), &changes),
            Status::ItemNotFound.code()
        );

        set.insert(&item("svc", "a", b"1"));
        set.insert(&item("svc", "b", b"2"));
        let rename = Attributes::new().with(AttrKey::Account, "b");
        assert_eq!(
            set.update(&generic("svc", "a"), &rename),
            Status::DuplicateItem.code()
        );
        assert_eq!(set.records()[0].text(AttrKey::Account), Some("a"));
    }

    #[test]
    fn test_delete_first_or_all() {
        let mut set = RecordSet::new();
        set.insert(&item("svc", "a", b"1"));
        set.insert(&item("svc", "b", b"2"));
        set.insert(&item("svc", "c", b"3"));

        let query = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "svc");
        assert_eq!(set.delete(&query, false), 0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].text(AttrKey::Account), Some("b"));

        assert_eq!(set.delete(&query, true), 0);
        assert!(set.is_empty());
        assert_eq!(set.delete(&query, true), Status::ItemNotFound.code());
    }
}
