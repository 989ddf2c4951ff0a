//! Platform credential store through the `keyring` crate
//!
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service
//!
//! The platform APIs only address single entries by (target, user), so
//! enumeration and partition-wide deletes answer `Unimplemented`. Only the
//! secret bytes survive a round trip; other attributes are reconstructed
//! from the query.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use keychain_status::{Status, StatusCode};
use keyring::Entry;
use tracing::debug;

use super::{ItemStore, SearchRequest, SearchResponse};
use crate::options::{AttrKey, AttrValue, Attributes, AuthenticationKind, ItemScope, ProtocolKind};

/// Store backed by the operating system's credential manager
#[derive(Debug, Default, Clone, Copy)]
pub struct OsKeyringStore;

impl OsKeyringStore {
    pub fn new() -> Self {
        Self
    }
}

/// Entry target for the partition named in `attributes`
pub(crate) fn entry_target(attributes: &Attributes) -> Result<String, Status> {
    let class = attributes
        .text(AttrKey::Class)
        .ok_or(Status::ItemClassMissing)?;

    match ItemScope::from_code(class).ok_or(Status::NoSuchClass)? {
        ItemScope::GenericService => {
            let mut target = attributes
                .text(AttrKey::Service)
                .map(str::to_string)
                .ok_or(Status::Param)?;
            if let Some(group) = attributes.text(AttrKey::AccessGroup) {
                target.push_str(";group=");
                target.push_str(group);
            }
            Ok(target)
        }
        ItemScope::NetworkCredential => {
            let host = attributes.text(AttrKey::Server).ok_or(Status::Param)?;
            let port = attributes.integer(AttrKey::Port).ok_or(Status::Param)?;
            let scheme = attributes
                .text(AttrKey::Protocol)
                .and_then(ProtocolKind::from_code)
                .map_or_else(|| "inet".to_string(), |p| p.description().to_lowercase());

            let mut target = format!("{}://{}:{}", scheme, host, port);
            if let Some(auth) = attributes
                .text(AttrKey::AuthenticationType)
                .filter(|code| *code != AuthenticationKind::Default.code())
            {
                target.push_str(";auth=");
                target.push_str(auth);
            }
            Ok(target)
        }
    }
}

fn entry_for(attributes: &Attributes) -> Result<Entry, Status> {
    let target = entry_target(attributes)?;
    let account = attributes
        .text(AttrKey::Account)
        .ok_or(Status::Unimplemented)?;
    Entry::new(&target, account).map_err(|e| keyring_status(&e))
}

/// Map a platform error to the store's status taxonomy
pub(crate) fn keyring_status(err: &keyring::Error) -> Status {
    match err {
        keyring::Error::NoEntry => Status::ItemNotFound,
        keyring::Error::NoStorageAccess(_) => Status::NotAvailable,
        keyring::Error::Ambiguous(_) => Status::DuplicateItem,
        keyring::Error::TooLong(..) | keyring::Error::Invalid(..) => Status::Param,
        keyring::Error::BadEncoding(_) => Status::Decode,
        _ => Status::UnknownError,
    }
}

fn read_secret(entry: &Entry) -> Result<Vec<u8>, Status> {
    let encoded = entry.get_password().map_err(|e| keyring_status(&e))?;
    BASE64.decode(encoded).map_err(|_| Status::Decode)
}

fn write_secret(entry: &Entry, attributes: &Attributes) -> StatusCode {
    let Some(data) = attributes.data(AttrKey::ValueData) else {
        return Status::Param.code();
    };
    match entry.set_password(&BASE64.encode(data)) {
        Ok(()) => Status::Success.code(),
        Err(e) => keyring_status(&e).code(),
    }
}

fn status_of(result: Result<StatusCode, Status>) -> StatusCode {
    result.unwrap_or_else(Status::code)
}

impl ItemStore for OsKeyringStore {
    fn search(&self, request: &SearchRequest) -> SearchResponse {
        if request.match_all {
            return SearchResponse::failed(Status::Unimplemented);
        }

        let entry = match entry_for(&request.attributes) {
            Ok(entry) => entry,
            Err(status) => return SearchResponse::failed(status),
        };
        let secret = match read_secret(&entry) {
            Ok(secret) => secret,
            Err(status) => return SearchResponse::failed(status),
        };

        let mut record = Attributes::new();
        if request.want_attributes {
            record = request
                .attributes
                .iter()
                .filter(|(_, value)| **value != AttrValue::Any)
                .map(|(key, value)| (key, value.clone()))
                .collect();
            record.insert(AttrKey::Synchronizable, false);
        }
        if request.want_data {
            record.insert(AttrKey::ValueData, AttrValue::Data(secret));
        }

        SearchResponse {
            status: Status::Success.code(),
            records: vec![record],
        }
    }

    fn insert(&self, attributes: &Attributes) -> StatusCode {
        if attributes.get(AttrKey::Synchronizable) == Some(&AttrValue::Any) {
            return Status::Param.code();
        }

        status_of(entry_for(attributes).map(|entry| match entry.get_password() {
            Ok(_) => Status::DuplicateItem.code(),
            Err(keyring::Error::NoEntry) => {
                debug!("Creating keyring entry");
                write_secret(&entry, attributes)
            }
            Err(e) => keyring_status(&e).code(),
        }))
    }

    fn update(&self, query: &Attributes, changes: &Attributes) -> StatusCode {
        // Entries cannot be renamed in place
        if changes
            .keys()
            .any(|key| key.is_identity() && key != AttrKey::Synchronizable)
        {
            return Status::Unimplemented.code();
        }

        status_of(entry_for(query).map(|entry| match entry.get_password() {
            Ok(_) if changes.contains_key(AttrKey::ValueData) => write_secret(&entry, changes),
            Ok(_) => Status::Success.code(),
            Err(e) => keyring_status(&e).code(),
        }))
    }

    fn delete(&self, query: &Attributes, _match_all: bool) -> StatusCode {
        // One (target, user) pair addresses at most one entry.
        status_of(entry_for(query).map(|entry| match entry.delete_password() {
            Ok(()) => Status::Success.code(),
            Err(e) => keyring_status(&e).code(),
        }))
    }

    fn backend_name(&self) -> &'static str {
        "OS Keyring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Options, ACCESS_GROUP_SUPPORTED};

    fn network(auth: AuthenticationKind, protocol: Option<ProtocolKind>) -> Attributes {
        let mut attrs = Attributes::new()
            .with(AttrKey::Class, "inet")
            .with(AttrKey::Server, "example.com")
            .with(AttrKey::Port, 443i64)
            .with(AttrKey::AuthenticationType, auth.code());
        if let Some(protocol) = protocol {
            attrs.insert(AttrKey::Protocol, protocol.code());
        }
        attrs
    }

    #[test]
    fn test_generic_target_is_service() {
        let attrs = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "app.test");
        assert_eq!(entry_target(&attrs), Ok("app.test".to_string()));
    }

    #[test]
    fn test_access_groups_get_separate_targets() {
        let target = |group: &str| {
            let options = Options::generic_with_access_group("svc", group).unwrap();
            entry_target(&options.key_query_attributes("k"))
        };

        let plain = entry_target(&Options::generic("svc").unwrap().key_query_attributes("k"));
        if ACCESS_GROUP_SUPPORTED {
            assert_eq!(target("team.one"), Ok("svc;group=team.one".to_string()));
            assert_ne!(target("team.one"), target("team.two"));
            assert_ne!(target("team.one"), plain);
        } else {
            assert_eq!(target("team.one"), plain);
        }
    }

    #[test]
    fn test_network_target() {
        assert_eq!(
            entry_target(&network(AuthenticationKind::Default, Some(ProtocolKind::Https))),
            Ok("https://example.com:443".to_string())
        );
        assert_eq!(
            entry_target(&network(AuthenticationKind::Ntlm, None)),
            Ok("inet://example.com:443;auth=ntlm".to_string())
        );
    }

    #[test]
    fn test_target_requires_class_and_identity() {
        let attrs = Attributes::new().with(AttrKey::Service, "svc");
        assert_eq!(entry_target(&attrs), Err(Status::ItemClassMissing));

        let attrs = Attributes::new().with(AttrKey::Class, "genp");
        assert_eq!(entry_target(&attrs), Err(Status::Param));
    }

    #[test]
    fn test_unsupported_requests() {
        let store = OsKeyringStore::new();
        let query = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "svc");

        let response = store.search(&SearchRequest::everything(query.clone()));
        assert_eq!(response.status, Status::Unimplemented.code());
        assert_eq!(store.delete(&query, true), Status::Unimplemented.code());
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(keyring_status(&keyring::Error::NoEntry), Status::ItemNotFound);
        assert_eq!(
            keyring_status(&keyring::Error::BadEncoding(vec![0xFF])),
            Status::Decode
        );
        assert_eq!(
            keyring_status(&keyring::Error::TooLong("user".to_string(), 10)),
            Status::Param
        );
    }
}
