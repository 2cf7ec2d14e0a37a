use crate::new_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute names the record itself owns; never stored among the fields.
pub(crate) const RESERVED_KEYS: [&str; 2] = ["id", "holders"];

/// Ordered field-name → value map of a record.
///
/// Values entered through forms are strings; files written by older versions
/// may carry other JSON values, which are kept untouched.
pub type FieldMap = serde_json::Map<String, Value>;

/// A single member or asset record.
///
/// Serializes flat, as `{ <field>..., "holders"?: [...], "id": "..." }`.
/// Attributes that are not part of the category's schema stay in `fields`
/// and are written back on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: FieldMap,
    /// Member IDs of the joint holders, in selection order. `None` for members
    /// and for legacy records that never had the attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holders: Option<Vec<String>>,
    #[serde(default)]
    pub id: String,
}

impl Record {
    /// Creates a member record with a fresh identifier.
    pub fn new_member(fields: FieldMap) -> Self {
        Self {
            fields: without_reserved(fields),
            holders: None,
            id: new_id(),
        }
    }

    /// Creates an asset record with a fresh identifier.
    pub fn new_asset(fields: FieldMap, holders: Vec<String>) -> Self {
        Self {
            fields: without_reserved(fields),
            holders: Some(holders),
            id: new_id(),
        }
    }

    /// Returns the display text of `field`, or `None` when the attribute is absent.
    pub fn text(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(value_text)
    }

    /// The member's `Name`, if it is set to a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("Name").and_then(Value::as_str)
    }

    /// True when `member_id` is one of this record's holders.
    pub fn is_held_by(&self, member_id: &str) -> bool {
        self.holders
            .as_deref()
            .is_some_and(|ids| ids.iter().any(|id| id == member_id))
    }

    /// Removes every occurrence of `member_id` from the holders list.
    ///
    /// Returns `true` if anything was removed.
    pub(crate) fn drop_holder(&mut self, member_id: &str) -> bool {
        match self.holders.as_mut() {
            Some(ids) => {
                let before = ids.len();
                ids.retain(|id| id != member_id);
                ids.len() != before
            }
            None => false,
        }
    }
}

/// Drops `id` and `holders` from user-supplied fields so they cannot shadow
/// the record's own attributes.
pub(crate) fn without_reserved(mut fields: FieldMap) -> FieldMap {
    for key in RESERVED_KEYS {
        fields.shift_remove(key);
    }
    fields
}

/// Renders a stored value the way it is shown and searched.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builds a [`FieldMap`] of string values from `(name, value)` pairs.
pub fn field_map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_serializes_flat_without_holders() {
        let mut member = Record::new_member(field_map([("Name", "Asha"), ("PAN no", "ABCDE1234F")]));
        member.id = "m-1".to_string();
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json, json!({"Name": "Asha", "PAN no": "ABCDE1234F", "id": "m-1"}));
    }

    #[test]
    fn test_asset_keeps_field_order_then_holders_then_id() {
        let mut asset = Record::new_asset(
            field_map([("BANK NAME", "SBI"), ("ACCOUNT NO", "42")]),
            vec!["m-1".to_string()],
        );
        asset.id = "a-1".to_string();
        let text = serde_json::to_string(&asset).unwrap();
        assert_eq!(
            text,
            r#"{"BANK NAME":"SBI","ACCOUNT NO":"42","holders":["m-1"],"id":"a-1"}"#
        );
    }

    #[test]
    fn test_deserialize_preserves_unknown_attributes() {
        let record: Record = serde_json::from_value(json!({
            "Name": "Ravi",
            "nickname": "R",
            "age": 41,
            "id": "m-2"
        }))
        .unwrap();
        assert_eq!(record.id, "m-2");
        assert!(record.holders.is_none());
        assert_eq!(record.text("nickname").as_deref(), Some("R"));
        assert_eq!(record.text("age").as_deref(), Some("41"));
        assert_eq!(record.name(), Some("Ravi"));
    }

    #[test]
    fn test_drop_holder_removes_every_occurrence() {
        let mut asset = Record::new_asset(FieldMap::new(), vec!["a".into(), "b".into(), "a".into()]);
        assert!(asset.is_held_by("a"));
        assert!(asset.drop_holder("a"));
        assert_eq!(asset.holders, Some(vec!["b".to_string()]));
        assert!(!asset.drop_holder("a"));
        assert!(!asset.is_held_by("a"));
    }

    #[test]
    fn test_reserved_keys_are_not_kept_as_fields() {
        let member = Record::new_member(field_map([("Name", "Asha"), ("id", "forged")]));
        assert_ne!(member.id, "forged");
        assert!(!member.fields.contains_key("id"));
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(json.matches("\"id\"").count(), 1);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("x")), "x");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(7.5)), "7.5");
        assert_eq!(value_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }
}
