//! Scope and protection options of a keychain handle
//!
//! [`Options`] is an immutable value: every `with_*` method returns a new
//! value and leaves the receiver untouched. It derives the three attribute
//! mappings the store needs:
//! - query attributes, identifying the partition (and a key within it)
//! - write attributes, used for inserts
//! - update attributes, the reduced set sent when an item already exists

mod attributes;
mod kinds;

pub use attributes::{AttrKey, AttrValue, Attributes};
pub use kinds::{Accessibility, AuthenticationKind, ItemScope, ProtocolKind};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{KeychainError, Result};

/// Whether the store honours access groups on this target.
///
/// The iOS simulator ignores them, so they are left out of queries there.
pub const ACCESS_GROUP_SUPPORTED: bool =
    !cfg!(all(target_os = "ios", any(target_arch = "x86", target_arch = "x86_64")));

/// Identity of the partition a handle addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    GenericService {
        service: String,
        access_group: Option<String>,
    },
    NetworkCredential {
        host: String,
        port: u16,
        protocol: Option<ProtocolKind>,
        authentication: AuthenticationKind,
    },
}

impl Partition {
    pub fn scope(&self) -> ItemScope {
        match self {
            Partition::GenericService { .. } => ItemScope::GenericService,
            Partition::NetworkCredential { .. } => ItemScope::NetworkCredential,
        }
    }
}

/// Immutable configuration of a keychain handle
///
/// Deserialization runs the same checks as the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct Options {
    partition: Partition,
    accessibility: Accessibility,
    synchronizable: bool,
    label: Option<String>,
    comment: Option<String>,
}

/// Unchecked wire form of [`Options`]
#[derive(Deserialize)]
struct RawOptions {
    partition: Partition,
    accessibility: Accessibility,
    synchronizable: bool,
    label: Option<String>,
    comment: Option<String>,
}

impl TryFrom<RawOptions> for Options {
    type Error = KeychainError;

    fn try_from(raw: RawOptions) -> Result<Self> {
        let options = match raw.partition {
            Partition::GenericService {
                service,
                access_group: None,
            } => Self::generic(service)?,
            Partition::GenericService {
                service,
                access_group: Some(group),
            } => Self::generic_with_access_group(service, group)?,
            Partition::NetworkCredential {
                host,
                port,
                protocol,
                authentication,
            } => Self::network_with_auth(host, port, protocol, authentication)?,
        };

        Ok(Self {
            accessibility: raw.accessibility,
            synchronizable: raw.synchronizable,
            label: raw.label,
            comment: raw.comment,
            ..options
        })
    }
}

impl Options {
    fn from_partition(partition: Partition) -> Self {
        Self {
            partition,
            accessibility: Accessibility::default(),
            synchronizable: false,
            label: None,
            comment: None,
        }
    }

    /// Secrets scoped by a service name
    pub fn generic(service: impl Into<String>) -> Result<Self> {
        let service = service.into();
        if service.is_empty() {
            return Err(KeychainError::InvalidOptions(
                "service name must not be empty".to_string(),
            ));
        }

        Ok(Self::from_partition(Partition::GenericService {
            service,
            access_group: None,
        }))
    }

    /// Secrets scoped by a service name and shared through an access group
    pub fn generic_with_access_group(
        service: impl Into<String>,
        access_group: impl Into<String>,
    ) -> Result<Self> {
        Self::generic(service)?.with_access_group(access_group)
    }

    /// Secrets scoped by the current process identity
    pub fn default_service() -> Result<Self> {
        let service = process_identifier().ok_or_else(|| {
            KeychainError::InvalidOptions("no process identifier available".to_string())
        })?;
        Self::generic(service)
    }

    /// Network credentials for `host:port`, with the default auth scheme
    pub fn network(
        host: impl Into<String>,
        port: u16,
        protocol: Option<ProtocolKind>,
    ) -> Result<Self> {
        Self::network_with_auth(host, port, protocol, AuthenticationKind::default())
    }

    pub fn network_with_auth(
        host: impl Into<String>,
        port: u16,
        protocol: Option<ProtocolKind>,
        authentication: AuthenticationKind,
    ) -> Result<Self> {
        let host = host.into();
        if host.is_empty() {
            return Err(KeychainError::InvalidOptions(
                "server host must not be empty".to_string(),
            ));
        }

        Ok(Self::from_partition(Partition::NetworkCredential {
            host,
            port,
            protocol,
            authentication,
        }))
    }

    /// Network credentials for the server of `url`.
    ///
    /// The port falls back to the scheme's well-known port; the protocol
    /// falls back to the one named by the scheme.
    pub fn from_url(url: &Url, protocol: Option<ProtocolKind>) -> Result<Self> {
        let host = url
            .host_str()
            .ok_or_else(|| KeychainError::InvalidOptions(format!("URL has no host: {}", url)))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| KeychainError::InvalidOptions(format!("URL has no port: {}", url)))?;
        let protocol = protocol.or_else(|| ProtocolKind::from_scheme(url.scheme()));

        Self::network(host, port, protocol)
    }

    // Accessors

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn scope(&self) -> ItemScope {
        self.partition.scope()
    }

    pub fn service(&self) -> Option<&str> {
        match &self.partition {
            Partition::GenericService { service, .. } => Some(service),
            Partition::NetworkCredential { .. } => None,
        }
    }

    pub fn access_group(&self) -> Option<&str> {
        match &self.partition {
            Partition::GenericService { access_group, .. } => access_group.as_deref(),
            Partition::NetworkCredential { .. } => None,
        }
    }

    pub fn server_host(&self) -> Option<&str> {
        match &self.partition {
            Partition::NetworkCredential { host, .. } => Some(host),
            Partition::GenericService { .. } => None,
        }
    }

    pub fn server_port(&self) -> Option<u16> {
        match &self.partition {
            Partition::NetworkCredential { port, .. } => Some(*port),
            Partition::GenericService { .. } => None,
        }
    }

    pub fn protocol(&self) -> Option<ProtocolKind> {
        match &self.partition {
            Partition::NetworkCredential { protocol, .. } => *protocol,
            Partition::GenericService { .. } => None,
        }
    }

    /// Authentication scheme; always `Default` for generic-service options
    pub fn authentication(&self) -> AuthenticationKind {
        match &self.partition {
            Partition::NetworkCredential { authentication, .. } => *authentication,
            Partition::GenericService { .. } => AuthenticationKind::default(),
        }
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn synchronizable(&self) -> bool {
        self.synchronizable
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    // Builders

    pub fn with_accessibility(&self, accessibility: Accessibility) -> Self {
        Self {
            accessibility,
            ..self.clone()
        }
    }

    pub fn with_synchronizable(&self, synchronizable: bool) -> Self {
        Self {
            synchronizable,
            ..self.clone()
        }
    }

    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self.clone()
        }
    }

    pub fn with_comment(&self, comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..self.clone()
        }
    }

    /// Set the access group. Only generic-service options have one.
    pub fn with_access_group(&self, access_group: impl Into<String>) -> Result<Self> {
        match &self.partition {
            Partition::GenericService { service, .. } => Ok(Self {
                partition: Partition::GenericService {
                    service: service.clone(),
                    access_group: Some(access_group.into()),
                },
                ..self.clone()
            }),
            Partition::NetworkCredential { .. } => Err(KeychainError::InvalidOptions(
                "access groups apply to generic-service items only".to_string(),
            )),
        }
    }

    /// Set the auth scheme. Only network-credential options have one.
    pub fn with_authentication(&self, authentication: AuthenticationKind) -> Result<Self> {
        match &self.partition {
            Partition::NetworkCredential {
                host,
                port,
                protocol,
                ..
            } => Ok(Self {
                partition: Partition::NetworkCredential {
                    host: host.clone(),
                    port: *port,
                    protocol: *protocol,
                    authentication,
                },
                ..self.clone()
            }),
            Partition::GenericService { .. } => Err(KeychainError::InvalidOptions(
                "authentication applies to network-credential items only".to_string(),
            )),
        }
    }

    // Attribute mappings

    /// Attributes identifying the partition, matching any sync flag
    pub fn query_attributes(&self) -> Attributes {
        let mut query = scope_query(self.scope());

        match &self.partition {
            Partition::GenericService {
                service,
                access_group,
            } => {
                query.insert(AttrKey::Service, service.as_str());
                if let Some(group) = access_group.as_deref().filter(|_| ACCESS_GROUP_SUPPORTED) {
                    query.insert(AttrKey::AccessGroup, group);
                }
            }
            Partition::NetworkCredential {
                host,
                port,
                protocol,
                authentication,
            } => {
                query.insert(AttrKey::Server, host.as_str());
                query.insert(AttrKey::Port, i64::from(*port));
                if let Some(protocol) = protocol {
                    query.insert(AttrKey::Protocol, protocol.code());
                }
                query.insert(AttrKey::AuthenticationType, authentication.code());
            }
        }

        query
    }

    /// Query attributes narrowed to one logical key
    pub fn key_query_attributes(&self, key: &str) -> Attributes {
        self.query_attributes().with(AttrKey::Account, key)
    }

    /// Full attribute set for inserting `secret` under `key`
    pub fn write_attributes(&self, key: &str, secret: &[u8]) -> Attributes {
        let mut attributes = self.key_query_attributes(key);

        attributes.insert(AttrKey::ValueData, AttrValue::Data(secret.to_vec()));
        attributes.insert(AttrKey::Accessible, self.accessibility.code());
        attributes.insert(AttrKey::Synchronizable, self.synchronizable);

        if let Some(label) = &self.label {
            attributes.insert(AttrKey::Label, label.as_str());
        }
        if let Some(comment) = &self.comment {
            attributes.insert(AttrKey::Comment, comment.as_str());
        }

        attributes
    }

    /// Attributes sent when updating an existing item. Identity attributes
    /// are never rewritten by an update.
    pub fn update_attributes(&self, secret: &[u8]) -> Attributes {
        Attributes::new()
            .with(AttrKey::ValueData, AttrValue::Data(secret.to_vec()))
            .with(AttrKey::Accessible, self.accessibility.code())
            .with(AttrKey::Synchronizable, self.synchronizable)
    }
}

/// Query matching every item of `scope` in the store, whatever its sync flag
pub fn scope_query(scope: ItemScope) -> Attributes {
    Attributes::new()
        .with(AttrKey::Class, scope.code())
        .with(AttrKey::Synchronizable, AttrValue::Any)
}

/// Identifier of the running process, used as the default service name
pub fn process_identifier() -> Option<String> {
    let exe = std::env::current_exe().ok()?;
    let stem = exe.file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
