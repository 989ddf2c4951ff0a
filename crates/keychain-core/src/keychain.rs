//! The store handle
//!
//! A [`Keychain`] pairs one immutable [`Options`] value with a shared store.
//! It holds no other state: every call is one blocking round trip (two for
//! `set`) and nothing is cached between calls.

use keychain_status::{Status, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{KeychainError, Result};
use crate::item::ItemRecord;
use crate::options::{
    self, Accessibility, AttrKey, AttrValue, Attributes, AuthenticationKind, ItemScope, Options,
    ProtocolKind,
};
use crate::storage::{ItemStore, SearchRequest};

/// Success means found, not-found means absent, anything else fails.
fn found(code: StatusCode) -> Result<bool> {
    if code == Status::Success.code() {
        Ok(true)
    } else if code == Status::ItemNotFound.code() {
        Ok(false)
    } else {
        Err(KeychainError::from_status(code))
    }
}

fn succeeded(code: StatusCode) -> Result<()> {
    if code == Status::Success.code() {
        Ok(())
    } else {
        Err(KeychainError::from_status(code))
    }
}

/// Every match of `query` with data and attributes; not-found is empty
fn enumerate(store: &dyn ItemStore, query: Attributes) -> Result<Vec<Attributes>> {
    let response = store.search(&SearchRequest::everything(query));
    if found(response.status)? {
        Ok(response.records)
    } else {
        Ok(Vec::new())
    }
}

fn identity_and_key(scope: ItemScope, record: &Attributes) -> (String, String) {
    let identity = match scope {
        ItemScope::GenericService => record.text(AttrKey::Service),
        ItemScope::NetworkCredential => record.text(AttrKey::Server),
    };
    (
        identity.unwrap_or_default().to_string(),
        record.text(AttrKey::Account).unwrap_or_default().to_string(),
    )
}

/// `(service or server, key)` of every item of `scope` in the store
pub fn all_keys(store: &dyn ItemStore, scope: ItemScope) -> Result<Vec<(String, String)>> {
    Ok(enumerate(store, options::scope_query(scope))?
        .iter()
        .map(|record| identity_and_key(scope, record))
        .collect())
}

/// Every item of `scope` in the store, normalized for display
pub fn all_items(store: &dyn ItemStore, scope: ItemScope) -> Result<Vec<ItemRecord>> {
    Ok(enumerate(store, options::scope_query(scope))?
        .iter()
        .map(|record| ItemRecord::from_attributes(scope, record))
        .collect())
}

/// Handle onto one partition of a credential store
#[derive(Clone)]
pub struct Keychain {
    options: Options,
    store: Arc<dyn ItemStore>,
}

impl fmt::Debug for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keychain")
            .field("options", &self.options)
            .field("backend", &self.store.backend_name())
            .finish()
    }
}

/// One line per item in the partition. Secret values are never printed.
impl fmt::Display for Keychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = match self.all_items() {
            Ok(items) => items,
            Err(e) => return write!(f, "<{}>", e),
        };

        for item in items {
            let identity = item.service.as_deref().or(item.server.as_deref());
            writeln!(
                f,
                "{} {} key={} accessibility={} synchronizable={}",
                item.scope,
                identity.unwrap_or("-"),
                item.key.as_deref().unwrap_or("-"),
                item.accessibility.as_deref().unwrap_or("-"),
                item.synchronizable,
            )?;
        }
        Ok(())
    }
}

impl Keychain {
    pub fn new(options: Options, store: Arc<dyn ItemStore>) -> Self {
        Self { options, store }
    }

    /// Generic-service handle for `service`
    pub fn generic(service: impl Into<String>, store: Arc<dyn ItemStore>) -> Result<Self> {
        Ok(Self::new(Options::generic(service)?, store))
    }

    /// Network-credential handle for `host:port`
    pub fn network(
        host: impl Into<String>,
        port: u16,
        protocol: Option<ProtocolKind>,
        store: Arc<dyn ItemStore>,
    ) -> Result<Self> {
        Ok(Self::new(Options::network(host, port, protocol)?, store))
    }

    fn derive(&self, options: Options) -> Self {
        Self {
            options,
            store: Arc::clone(&self.store),
        }
    }

    // Reads

    /// Secret bytes stored under `key`, or `None` when absent
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let request = SearchRequest::data_of(self.options.key_query_attributes(key));
        let response = self.store.search(&request);
        if !found(response.status)? {
            return Ok(None);
        }

        let data = response
            .records
            .into_iter()
            .next()
            .and_then(|mut record| record.remove(AttrKey::ValueData));
        match data {
            Some(AttrValue::Data(bytes)) => Ok(Some(bytes)),
            _ => Err(KeychainError::from_status(Status::UnknownError.code())),
        }
    }

    /// Secret stored under `key`, decoded as UTF-8
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get(key)?
            .map(|bytes| {
                String::from_utf8(bytes)
                    .map_err(|_| KeychainError::conversion("failed to convert data to string"))
            })
            .transpose()
    }

    /// Whether `key` exists. Store failures are logged and read as `false`;
    /// use [`Keychain::try_contains`] to observe them.
    pub fn contains(&self, key: &str) -> bool {
        self.try_contains(key).unwrap_or(false)
    }

    pub fn try_contains(&self, key: &str) -> Result<bool> {
        let request = SearchRequest::exists(self.options.key_query_attributes(key));
        found(self.store.search(&request).status)
    }

    /// Keys of every item in this partition
    pub fn all_keys(&self) -> Result<Vec<String>> {
        Ok(enumerate(self.store.as_ref(), self.options.query_attributes())?
            .iter()
            .filter_map(|record| record.text(AttrKey::Account).map(str::to_string))
            .collect())
    }

    /// Every item in this partition, normalized for display
    pub fn all_items(&self) -> Result<Vec<ItemRecord>> {
        let scope = self.options.scope();
        Ok(enumerate(self.store.as_ref(), self.options.query_attributes())?
            .iter()
            .map(|record| ItemRecord::from_attributes(scope, record))
            .collect())
    }

    // Writes

    /// Store `value` under `key`, updating the item if it exists.
    ///
    /// The existence check and the write are two requests. If another
    /// writer inserts `key` in between, the insert fails with
    /// [`KeychainError::DuplicateItem`]; it is not retried.
    pub fn set(&self, key: &str, value: impl AsRef<[u8]>) -> Result<()> {
        let secret = value.as_ref();
        let query = self.options.key_query_attributes(key);

        if found(self.store.search(&SearchRequest::exists(query.clone())).status)? {
            debug!("Updating item {:?} via {}", key, self.store.backend_name());
            succeeded(
                self.store
                    .update(&query, &self.options.update_attributes(secret)),
            )
        } else {
            debug!("Inserting item {:?} via {}", key, self.store.backend_name());
            succeeded(self.store.insert(&self.options.write_attributes(key, secret)))
        }
    }

    /// `Some` stores the value, `None` removes the key
    pub fn set_or_remove<V: AsRef<[u8]>>(&self, key: &str, value: Option<V>) -> Result<()> {
        match value {
            Some(value) => self.set(key, value),
            None => self.remove(key),
        }
    }

    /// Delete `key`; deleting an absent key succeeds
    pub fn remove(&self, key: &str) -> Result<()> {
        found(
            self.store
                .delete(&self.options.key_query_attributes(key), false),
        )
        .map(|_| ())
    }

    /// Delete every item in this partition
    pub fn remove_all(&self) -> Result<()> {
        found(self.store.delete(&self.options.query_attributes(), true)).map(|_| ())
    }

    // Options

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn scope(&self) -> ItemScope {
        self.options.scope()
    }

    pub fn service(&self) -> Option<&str> {
        self.options.service()
    }

    pub fn access_group(&self) -> Option<&str> {
        self.options.access_group()
    }

    pub fn server_host(&self) -> Option<&str> {
        self.options.server_host()
    }

    pub fn server_port(&self) -> Option<u16> {
        self.options.server_port()
    }

    pub fn protocol(&self) -> Option<ProtocolKind> {
        self.options.protocol()
    }

    pub fn authentication(&self) -> AuthenticationKind {
        self.options.authentication()
    }

    pub fn accessibility(&self) -> Accessibility {
        self.options.accessibility()
    }

    pub fn synchronizable(&self) -> bool {
        self.options.synchronizable()
    }

    pub fn label(&self) -> Option<&str> {
        self.options.label()
    }

    pub fn comment(&self) -> Option<&str> {
        self.options.comment()
    }

    pub fn with_accessibility(&self, accessibility: Accessibility) -> Self {
        self.derive(self.options.with_accessibility(accessibility))
    }

    pub fn with_synchronizable(&self, synchronizable: bool) -> Self {
        self.derive(self.options.with_synchronizable(synchronizable))
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        self.derive(self.options.with_label(label))
    }

    pub fn with_comment(&self, comment: impl Into<String>) -> Self {
        self.derive(self.options.with_comment(comment))
    }

    pub fn with_access_group(&self, access_group: impl Into<String>) -> Result<Self> {
        Ok(self.derive(self.options.with_access_group(access_group)?))
    }

    pub fn with_authentication(&self, authentication: AuthenticationKind) -> Result<Self> {
        Ok(self.derive(self.options.with_authentication(authentication)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SearchResponse};
    use std::sync::Mutex;

    /// Store answering every request with fixed statuses
    struct FixedStore {
        search: StatusCode,
        write: StatusCode,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FixedStore {
        fn new(search: Status, write: Status) -> Arc<Self> {
            Arc::new(Self {
                search: search.code(),
                write: write.code(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ItemStore for FixedStore {
        fn search(&self, _request: &SearchRequest) -> SearchResponse {
            self.calls.lock().unwrap().push("search");
            SearchResponse::failed(self.search)
        }

        fn insert(&self, _attributes: &Attributes) -> StatusCode {
            self.calls.lock().unwrap().push("insert");
            self.write
        }

        fn update(&self, _query: &Attributes, _changes: &Attributes) -> StatusCode {
            self.calls.lock().unwrap().push("update");
            self.write
        }

        fn delete(&self, _query: &Attributes, _match_all: bool) -> StatusCode {
            self.calls.lock().unwrap().push("delete");
            self.write
        }

        fn backend_name(&self) -> &'static str {
            "Fixed"
        }
    }

    fn memory_keychain() -> Keychain {
        Keychain::generic("app.test", Arc::new(MemoryStore::new())).unwrap()
    }

    #[test]
    fn test_get_absent_is_none() {
        let keychain = memory_keychain();
        assert_eq!(keychain.get("missing").unwrap(), None);
        assert_eq!(keychain.get_string("missing").unwrap(), None);
    }

    #[test]
    fn test_set_insert_then_update() {
        let keychain = memory_keychain();
        keychain.set("token", "abc").unwrap();
        assert_eq!(keychain.get_string("token").unwrap().as_deref(), Some("abc"));

        keychain.set("token", "def").unwrap();
        assert_eq!(keychain.get_string("token").unwrap().as_deref(), Some("def"));
        assert_eq!(keychain.all_keys().unwrap(), vec!["token".to_string()]);
    }

    #[test]
    fn test_set_update_path_uses_update() {
        let store = FixedStore::new(Status::Success, Status::Success);
        let keychain = Keychain::generic("svc", store.clone()).unwrap();
        keychain.set("k", b"v").unwrap();
        assert_eq!(store.calls(), vec!["search", "update"]);
    }

    #[test]
    fn test_set_insert_path_uses_insert() {
        let store = FixedStore::new(Status::ItemNotFound, Status::Success);
        let keychain = Keychain::generic("svc", store.clone()).unwrap();
        keychain.set("k", b"v").unwrap();
        assert_eq!(store.calls(), vec!["search", "insert"]);
    }

    #[test]
    fn test_set_existence_failure_stops_early() {
        let store = FixedStore::new(Status::InteractionNotAllowed, Status::Success);
        let keychain = Keychain::generic("svc", store.clone()).unwrap();
        let err = keychain.set("k", b"v").unwrap_err();
        assert_eq!(err.status(), Some(Status::InteractionNotAllowed));
        assert_eq!(store.calls(), vec!["search"]);
    }

    #[test]
    fn test_set_duplicate_surfaced_without_retry() {
        let store = FixedStore::new(Status::ItemNotFound, Status::DuplicateItem);
        let keychain = Keychain::generic("svc", store.clone()).unwrap();
        let err = keychain.set("k", b"v").unwrap_err();
        assert!(err.is_duplicate_item());
        assert_eq!(store.calls(), vec!["search", "insert"]);
    }

    #[test]
    fn test_get_store_failure() {
        let store = FixedStore::new(Status::Decode, Status::Success);
        let keychain = Keychain::generic("svc", store).unwrap();
        let err = keychain.get("k").unwrap_err();
        assert_eq!(err.status(), Some(Status::Decode));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_get_success_without_data_fails() {
        let store = FixedStore::new(Status::Success, Status::Success);
        let keychain = Keychain::generic("svc", store).unwrap();
        let err = keychain.get("k").unwrap_err();
        assert_eq!(err.status(), Some(Status::UnknownError));
    }

    #[test]
    fn test_contains_collapses_failures() {
        let store = FixedStore::new(Status::NotAvailable, Status::Success);
        let keychain = Keychain::generic("svc", store).unwrap();
        assert!(!keychain.contains("k"));
        assert_eq!(
            keychain.try_contains("k").unwrap_err().status(),
            Some(Status::NotAvailable)
        );
    }

    #[test]
    fn test_remove_not_found_is_success() {
        let store = FixedStore::new(Status::ItemNotFound, Status::ItemNotFound);
        let keychain = Keychain::generic("svc", store).unwrap();
        keychain.remove("k").unwrap();
        keychain.remove_all().unwrap();
    }

    #[test]
    fn test_remove_failure_surfaces() {
        let store = FixedStore::new(Status::Success, Status::ReadOnly);
        let keychain = Keychain::generic("svc", store).unwrap();
        assert_eq!(
            keychain.remove("k").unwrap_err().status(),
            Some(Status::ReadOnly)
        );
    }

    #[test]
    fn test_enumerate_not_found_is_empty() {
        let store = FixedStore::new(Status::ItemNotFound, Status::Success);
        let keychain = Keychain::generic("svc", store.clone()).unwrap();
        assert!(keychain.all_items().unwrap().is_empty());
        assert!(all_keys(store.as_ref(), ItemScope::NetworkCredential)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_set_or_remove() {
        let keychain = memory_keychain();
        keychain.set_or_remove("k", Some("v")).unwrap();
        assert!(keychain.contains("k"));
        keychain.set_or_remove::<&str>("k", None).unwrap();
        assert!(!keychain.contains("k"));
    }

    #[test]
    fn test_builders_share_store() {
        let keychain = memory_keychain();
        let labelled = keychain
            .with_label("label")
            .with_accessibility(Accessibility::WhenUnlocked);
        labelled.set("k", "v").unwrap();

        assert_eq!(keychain.label(), None);
        assert_eq!(labelled.label(), Some("label"));
        assert_eq!(keychain.get_string("k").unwrap().as_deref(), Some("v"));

        let items = keychain.all_items().unwrap();
        assert_eq!(items[0].accessibility.as_deref(), Some("WhenUnlocked"));
    }

    #[test]
    fn test_display_lists_items_without_values() {
        let keychain = memory_keychain();
        assert_eq!(keychain.to_string(), "");

        keychain.set("token", "s3cret").unwrap();
        let listing = keychain.to_string();
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.contains("app.test"));
        assert!(listing.contains("key=token"));
        assert!(listing.contains("synchronizable=false"));
        assert!(!listing.contains("s3cret"));
    }

    #[test]
    fn test_display_shows_enumeration_failure() {
        let store = FixedStore::new(Status::NotAvailable, Status::Success);
        let keychain = Keychain::generic("app.test", store).unwrap();
        assert!(keychain.to_string().starts_with('<'));
    }

    #[test]
    fn test_partitions_are_isolated() {
        let store: Arc<dyn ItemStore> = Arc::new(MemoryStore::new());
        let a = Keychain::generic("a", store.clone()).unwrap();
        let b = Keychain::generic("b", store.clone()).unwrap();
        a.set("k", "from-a").unwrap();
        b.set("k", "from-b").unwrap();

        b.remove_all().unwrap();
        assert_eq!(a.get_string("k").unwrap().as_deref(), Some("from-a"));
        assert_eq!(b.get("k").unwrap(), None);
        assert_eq!(
            all_keys(store.as_ref(), ItemScope::GenericService).unwrap(),
            vec![("a".to_string(), "k".to_string())]
        );
    }
}
