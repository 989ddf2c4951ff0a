//! Presentation records for enumerated items

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::{Accessibility, AttrKey, Attributes, AuthenticationKind, ItemScope, ProtocolKind};

/// Best-effort decoded secret: text when the bytes are UTF-8
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Text(String),
    Data(Vec<u8>),
}

impl ItemValue {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => ItemValue::Text(text),
            Err(e) => ItemValue::Data(e.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ItemValue::Text(text) => text.as_bytes(),
            ItemValue::Data(data) => data,
        }
    }
}

impl fmt::Debug for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemValue::Text(_) => f.write_str("Text([REDACTED])"),
            ItemValue::Data(d) => write!(f, "Data([REDACTED; {} bytes])", d.len()),
        }
    }
}

/// One enumerated item, normalized for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub scope: ItemScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<String>,
    pub key: Option<String>,
    pub value: Option<ItemValue>,
    pub accessibility: Option<String>,
    /// `"true"` or `"false"`
    pub synchronizable: String,
}

// Unrecognized codes are shown raw.
fn describe<T>(
    code: Option<&str>,
    from_code: fn(&str) -> Option<T>,
    name: fn(T) -> &'static str,
) -> Option<String> {
    code.map(|code| from_code(code).map_or_else(|| code.to_string(), |v| name(v).to_string()))
}

impl ItemRecord {
    /// Normalize a raw record returned by the store
    pub fn from_attributes(scope: ItemScope, attributes: &Attributes) -> Self {
        let text = |key: AttrKey| attributes.text(key).map(str::to_string);

        let (service, access_group, server, protocol, authentication) = match scope {
            ItemScope::GenericService => (
                text(AttrKey::Service),
                text(AttrKey::AccessGroup),
                None,
                None,
                None,
            ),
            ItemScope::NetworkCredential => (
                None,
                None,
                text(AttrKey::Server),
                describe(
                    attributes.text(AttrKey::Protocol),
                    ProtocolKind::from_code,
                    ProtocolKind::description,
                ),
                describe(
                    attributes.text(AttrKey::AuthenticationType),
                    AuthenticationKind::from_code,
                    AuthenticationKind::description,
                ),
            ),
        };

        Self {
            scope,
            service,
            access_group,
            server,
            protocol,
            authentication,
            key: text(AttrKey::Account),
            value: attributes
                .data(AttrKey::ValueData)
                .map(|bytes| ItemValue::from_bytes(bytes.to_vec())),
            accessibility: describe(
                attributes.text(AttrKey::Accessible),
                Accessibility::from_code,
                Accessibility::description,
            ),
            synchronizable: attributes
                .boolean(AttrKey::Synchronizable)
                .unwrap_or(false)
                .to_string(),
        }
    }

    /// Service name or server host, whichever the scope uses
    pub fn identity(&self) -> Option<&str> {
        match self.scope {
            ItemScope::GenericService => self.service.as_deref(),
            ItemScope::NetworkCredential => self.server.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AttrValue;

    #[test]
    fn test_generic_record() {
        let attrs = Attributes::new()
            .with(AttrKey::Class, "genp")
            .with(AttrKey::Service, "app.test")
            .with(AttrKey::Account, "token")
            .with(AttrKey::Accessible, "ck")
            .with(AttrKey::Synchronizable, false)
            .with(AttrKey::ValueData, AttrValue::Data(b"abc".to_vec()));

        let record = ItemRecord::from_attributes(ItemScope::GenericService, &attrs);
        assert_eq!(record.identity(), Some("app.test"));
        assert_eq!(record.key.as_deref(), Some("token"));
        assert_eq!(record.value, Some(ItemValue::Text("abc".to_string())));
        assert_eq!(record.accessibility.as_deref(), Some("AfterFirstUnlock"));
        assert_eq!(record.synchronizable, "false");
        assert_eq!(record.server, None);
    }

    #[test]
    fn test_network_record() {
        let attrs = Attributes::new()
            .with(AttrKey::Class, "inet")
            .with(AttrKey::Server, "example.com")
            .with(AttrKey::Protocol, "htps")
            .with(AttrKey::AuthenticationType, "kerb")
            .with(AttrKey::Account, "user")
            .with(AttrKey::Synchronizable, true)
            .with(AttrKey::ValueData, AttrValue::Data(vec![0xFF, 0xFE]));

        let record = ItemRecord::from_attributes(ItemScope::NetworkCredential, &attrs);
        assert_eq!(record.identity(), Some("example.com"));
        assert_eq!(record.protocol.as_deref(), Some("HTTPS"));
        assert_eq!(record.authentication.as_deref(), Some("kerb"));
        assert_eq!(record.value, Some(ItemValue::Data(vec![0xFF, 0xFE])));
        assert_eq!(record.synchronizable, "true");
        assert_eq!(record.service, None);
    }

    #[test]
    fn test_record_without_value() {
        let attrs = Attributes::new().with(AttrKey::Service, "svc");
        let record = ItemRecord::from_attributes(ItemScope::GenericService, &attrs);
        assert_eq!(record.value, None);
        assert_eq!(record.key, None);
        assert_eq!(record.accessibility, None);
    }

    #[test]
    fn test_value_debug_redacted() {
        let value = ItemValue::Text("hunter2".to_string());
        assert!(!format!("{:?}", value).contains("hunter2"));
        assert_eq!(value.as_bytes(), b"hunter2");
    }

    #[test]
    fn test_serializes_camel_case() {
        let attrs = Attributes::new()
            .with(AttrKey::Service, "svc")
            .with(AttrKey::AccessGroup, "group");
        let record = ItemRecord::from_attributes(ItemScope::GenericService, &attrs);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["accessGroup"], "group");
        assert!(json.get("server").is_none());
    }
}
