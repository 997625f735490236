//! Mutable key-value record with an immutable identity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{RecordId, RecordIdentity, RecordKind};
use crate::value::AttributeValue;

/// A mutable record: attribute name to value, plus type tag and id.
///
/// The identity is fixed at construction; only attributes change. Iteration
/// order is deterministic (sorted by attribute name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    identity: RecordIdentity,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Record {
    pub fn new(kind: impl Into<RecordKind>, id: RecordId) -> Self {
        Self {
            identity: RecordIdentity::new(kind, id),
            attributes: BTreeMap::new(),
        }
    }

    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    pub fn kind(&self) -> &RecordKind {
        &self.identity.kind
    }

    pub fn id(&self) -> RecordId {
        self.identity.id
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// Clearing a field is `set(name, AttributeValue::Null)` - distinct from
    /// [`remove`](Self::remove), which makes the attribute absent.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Mutable access to an attribute's value, for in-place mutation of a
    /// wrapper payload (e.g. bumping a `Money` amount without reassigning).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttributeValue> {
        self.attributes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    /// Current attributes, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Money;

    fn test_record() -> Record {
        Record::new("Customer", RecordId::new())
    }

    #[test]
    fn set_get_contains_remove() {
        let mut record = test_record();
        assert!(!record.contains("lastname"));

        record.set("lastname", "Baggins");
        assert!(record.contains("lastname"));
        assert_eq!(record.get("lastname"), Some(&AttributeValue::from("Baggins")));

        let removed = record.remove("lastname");
        assert_eq!(removed, Some(AttributeValue::from("Baggins")));
        assert!(!record.contains("lastname"));
        assert!(record.is_empty());
    }

    #[test]
    fn set_overwrites_and_null_is_still_present() {
        let mut record = test_record();
        record.set("email", "frodo@shire.example");
        record.set("email", AttributeValue::Null);

        assert!(record.contains("email"));
        assert_eq!(record.get("email"), Some(&AttributeValue::Null));
    }

    #[test]
    fn get_mut_allows_in_place_payload_mutation() {
        let mut record = test_record();
        record.set("revenue", Money(1_000));

        if let Some(AttributeValue::Money(m)) = record.get_mut("revenue") {
            m.0 = 2_000;
        }

        assert_eq!(record.get("revenue"), Some(&AttributeValue::Money(Money(2_000))));
    }

    #[test]
    fn attributes_iterate_in_name_order() {
        let mut record = test_record();
        record.set("zeta", 1i64);
        record.set("alpha", 2i64);
        record.set("mid", 3i64);

        let names: Vec<&str> = record.attributes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn identity_is_fixed_at_construction() {
        let id = RecordId::new();
        let record = Record::new("Invoice", id);
        assert_eq!(record.kind().as_str(), "Invoice");
        assert_eq!(record.id(), id);
        assert_eq!(record.identity(), &RecordIdentity::new("Invoice", id));
    }
}
