//! Change-set and update-request shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fieldsync_core::{AttributeValue, RecordIdentity};

/// The attributes of a record that differ from its baseline, plus the
/// record's identity.
///
/// A change-set is **sparse** (only changed attributes appear, with their
/// current live values) and **non-empty by construction**: a diff with zero
/// differences is `None`, never an empty change-set, so callers can branch
/// on "nothing to update" without inspecting a container. Every value is
/// independently owned; later mutation of the live record never alters a
/// change-set already returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    identity: RecordIdentity,
    fields: BTreeMap<String, AttributeValue>,
}

impl ChangeSet {
    // Only the tracker builds change-sets; it upholds the non-empty invariant.
    pub(crate) fn new(identity: RecordIdentity, fields: BTreeMap<String, AttributeValue>) -> Self {
        debug_assert!(!fields.is_empty());
        Self { identity, fields }
    }

    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    pub fn fields(&self) -> &BTreeMap<String, AttributeValue> {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Package this change-set for dispatch to an update service.
    pub fn into_update_request(self) -> UpdateRequest {
        UpdateRequest {
            identity: self.identity,
            fields: self.fields,
        }
    }
}

/// Payload for a remote partial update: identity plus changed fields only.
///
/// Structurally a record, but carrying just the attributes that differ from
/// the baseline. Serializable for whatever transport the caller owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    identity: RecordIdentity,
    fields: BTreeMap<String, AttributeValue>,
}

impl UpdateRequest {
    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    pub fn fields(&self) -> &BTreeMap<String, AttributeValue> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldsync_core::{Money, RecordId};
    use serde_json::json;

    fn nil_identity() -> RecordIdentity {
        let id: RecordId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
        RecordIdentity::new("Customer", id)
    }

    #[test]
    fn update_request_serializes_identity_plus_changed_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("firstname".to_string(), AttributeValue::from("Frodo"));
        fields.insert("revenue".to_string(), AttributeValue::Money(Money(1_000)));
        let request = ChangeSet::new(nil_identity(), fields).into_update_request();

        let expected = json!({
            "identity": {
                "kind": "Customer",
                "id": "00000000-0000-0000-0000-000000000000",
            },
            "fields": {
                "firstname": { "text": "Frodo" },
                "revenue": { "money": 1_000 },
            },
        });
        assert_eq!(serde_json::to_value(&request).unwrap(), expected);
    }

    #[test]
    fn change_set_accessors_reflect_contents() {
        let mut fields = BTreeMap::new();
        fields.insert("firstname".to_string(), AttributeValue::from("Frodo"));
        let changes = ChangeSet::new(nil_identity(), fields);

        assert_eq!(changes.len(), 1);
        assert!(!changes.is_empty());
        assert!(changes.contains("firstname"));
        assert_eq!(changes.get("firstname"), Some(&AttributeValue::from("Frodo")));
        assert_eq!(changes.get("lastname"), None);
        assert_eq!(changes.identity(), &nil_identity());
    }
}
