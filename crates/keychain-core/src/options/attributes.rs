//! Attribute mappings exchanged with the store
//!
//! An [`Attributes`] value is the dictionary a store request carries: keys
//! are store-defined constants ([`AttrKey`]), values are scalars or byte
//! blobs ([`AttrValue`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Store-defined attribute keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttrKey {
    Class,
    Service,
    AccessGroup,
    Server,
    Port,
    Protocol,
    AuthenticationType,
    Account,
    Accessible,
    Synchronizable,
    Label,
    Comment,
    ValueData,
}

impl AttrKey {
    /// Short code of the key as the platform store names it
    pub const fn as_str(self) -> &'static str {
        match self {
            AttrKey::Class => "class",
            AttrKey::Service => "svce",
            AttrKey::AccessGroup => "agrp",
            AttrKey::Server => "srvr",
            AttrKey::Port => "port",
            AttrKey::Protocol => "ptcl",
            AttrKey::AuthenticationType => "atyp",
            AttrKey::Account => "acct",
            AttrKey::Accessible => "pdmn",
            AttrKey::Synchronizable => "sync",
            AttrKey::Label => "labl",
            AttrKey::Comment => "icmt",
            AttrKey::ValueData => "v_Data",
        }
    }

    /// Keys whose values identify an item within its class
    pub fn is_identity(self) -> bool {
        !matches!(
            self,
            AttrKey::ValueData | AttrKey::Accessible | AttrKey::Label | AttrKey::Comment
        )
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute value
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Data(Vec<u8>),
    Integer(i64),
    Bool(bool),
    /// Wildcard matching any stored value; only meaningful in queries
    Any,
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            AttrValue::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether a stored value satisfies this query value
    pub fn matches(&self, stored: &AttrValue) -> bool {
        matches!(self, AttrValue::Any) || self == stored
    }
}

// Secret bytes never reach logs through Debug.
impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            AttrValue::Data(d) => write!(f, "Data([REDACTED; {} bytes])", d.len()),
            AttrValue::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            AttrValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            AttrValue::Any => f.write_str("Any"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Integer(i)
    }
}

/// Attribute dictionary of one request or one stored item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: BTreeMap<AttrKey, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, key: AttrKey, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.entries.insert(key, value.into())
    }

    /// Builder form of [`Attributes::insert`]
    pub fn with(mut self, key: AttrKey, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: AttrKey) -> Option<&AttrValue> {
        self.entries.get(&key)
    }

    pub fn remove(&mut self, key: AttrKey) -> Option<AttrValue> {
        self.entries.remove(&key)
    }

    pub fn contains_key(&self, key: AttrKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn text(&self, key: AttrKey) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_text)
    }

    pub fn data(&self, key: AttrKey) -> Option<&[u8]> {
        self.get(key).and_then(AttrValue::as_data)
    }

    pub fn integer(&self, key: AttrKey) -> Option<i64> {
        self.get(key).and_then(AttrValue::as_integer)
    }

    pub fn boolean(&self, key: AttrKey) -> Option<bool> {
        self.get(key).and_then(AttrValue::as_bool)
    }

    pub fn keys(&self) -> impl Iterator<Item = AttrKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttrKey, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` over this mapping
    pub fn merge(&mut self, other: &Attributes) {
        for (key, value) in other.iter() {
            self.entries.insert(key, value.clone());
        }
    }

    /// True when every entry of `other` is present here with an equal value
    pub fn is_superset_of(&self, other: &Attributes) -> bool {
        other
            .iter()
            .all(|(key, value)| self.get(key) == Some(value))
    }

    /// Entries of `self` whose key is absent from `other`
    pub fn difference(&self, other: &Attributes) -> Attributes {
        let entries = self
            .entries
            .iter()
            .filter(|(key, _)| !other.contains_key(**key))
            .map(|(key, value)| (*key, value.clone()))
            .collect();
        Attributes { entries }
    }
}

impl FromIterator<(AttrKey, AttrValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (AttrKey, AttrValue)>>(iter: I) -> Self {
        Attributes {
            entries: iter.into_iter().collect(),
        }
    }
}
