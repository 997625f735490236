//! Attribute value model: classification, deep cloning, structural equality.
//!
//! This is the leaf component of the engine. Every attribute of a tracked
//! record holds an [`AttributeValue`], a closed sum type over the value kinds
//! the engine knows how to snapshot and compare:
//!
//! - **Primitive**: value-comparable, trivially cloned (text, numbers,
//!   booleans, timestamps, ids, the explicit `Null` marker).
//! - **Boxed value**: a wrapper around a single primitive payload
//!   ([`Money`], [`OptionCode`]). Equality and cloning operate on the
//!   payload, never on wrapper identity: two wrappers holding equal payloads
//!   are equal, and a snapshot is a fresh wrapper holding a copy.
//! - **Composite reference**: a typed pointer to another record
//!   ([`RecordRef`]), compared field-wise.
//! - **Unrecognized**: anything the host stuffed into a record that the
//!   engine cannot classify ([`AttributeValue::Opaque`]). Not snapshottable;
//!   encountering one is a hard error, never a silent shallow copy.
//!
//! Treating the wrapper kinds by *value* rather than by identity is what lets
//! a diff detect "the caller mutated a wrapper's payload in place", and what
//! keeps previously captured snapshots from being corrupted by later in-place
//! mutation of the live record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TrackError, TrackResult};
use crate::id::{RecordId, RecordKind};

/// Monetary amount in smallest currency unit (e.g., cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub u64);

/// Enumerated option code (host-defined picklist value).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionCode(pub String);

impl OptionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Typed reference to another record: target type tag plus target id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub kind: RecordKind,
    pub id: RecordId,
}

impl RecordRef {
    pub fn new(kind: impl Into<RecordKind>, id: RecordId) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}

/// Value-kind category of an [`AttributeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Primitive,
    Boxed,
    Reference,
    Unrecognized,
}

/// A single attribute value of a tracked record.
///
/// Structural equality (`PartialEq`) is the engine's comparison rule: payload
/// equality for boxed values, field-wise equality for references, and values
/// of different arms are never equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// Explicitly cleared. Distinct from the attribute being absent, and that
    /// distinction is load-bearing for partial updates: a `Null` in a
    /// change-set tells the remote side to clear the field.
    Null,
    Boolean(bool),
    Integer(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Id(RecordId),
    Money(Money),
    Option(OptionCode),
    Reference(RecordRef),
    /// Host value the engine cannot classify. Carried so records can hold
    /// foreign data, but never snapshotted: see [`AttributeValue::snapshot`].
    Opaque(serde_json::Value),
}

impl AttributeValue {
    /// Classify this value. Total and deterministic.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null
            | Self::Boolean(_)
            | Self::Integer(_)
            | Self::Text(_)
            | Self::Timestamp(_)
            | Self::Id(_) => ValueKind::Primitive,
            Self::Money(_) | Self::Option(_) => ValueKind::Boxed,
            Self::Reference(_) => ValueKind::Reference,
            Self::Opaque(_) => ValueKind::Unrecognized,
        }
    }

    /// Deep, independently-owned copy for a baseline or change-set.
    ///
    /// Boxed values and references come back as fresh instances holding
    /// copied payloads, so mutating the original afterwards never affects the
    /// copy. An [`Opaque`](Self::Opaque) value fails with
    /// [`TrackError::UnsupportedValue`]; there is no shallow-copy fallback.
    ///
    /// `field` names the attribute being snapshotted, for the error message.
    pub fn snapshot(&self, field: &str) -> TrackResult<AttributeValue> {
        match self {
            Self::Opaque(raw) => Err(TrackError::unsupported_value(
                field,
                format!("unrecognized value kind ({})", json_kind(raw)),
            )),
            other => Ok(other.clone()),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "json null",
        serde_json::Value::Bool(_) => "json bool",
        serde_json::Value::Number(_) => "json number",
        serde_json::Value::String(_) => "json string",
        serde_json::Value::Array(_) => "json array",
        serde_json::Value::Object(_) => "json object",
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<RecordId> for AttributeValue {
    fn from(value: RecordId) -> Self {
        Self::Id(value)
    }
}

impl From<Money> for AttributeValue {
    fn from(value: Money) -> Self {
        Self::Money(value)
    }
}

impl From<OptionCode> for AttributeValue {
    fn from(value: OptionCode) -> Self {
        Self::Option(value)
    }
}

impl From<RecordRef> for AttributeValue {
    fn from(value: RecordRef) -> Self {
        Self::Reference(value)
    }
}
