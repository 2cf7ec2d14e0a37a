//! Conversion of parsed data files into a [`WealthStore`].
//!
//! Two layouts are understood:
//!
//! - **Current**: every category is `{ "columns": [...], "data": [...] }`.
//!   Recognised by `family_info` being an object with `columns` and a `data` list.
//! - **Legacy**: categories are bare record lists, and members may live under
//!   `members` instead of `family_info`. Member `name` attributes are renamed
//!   to `Name`.
//!
//! Anything else is rejected with [`WealthError::UnrecognizedFormat`].

use crate::core::record::value_text;
use crate::{new_id, Category, Record, Result, WealthError, WealthStore};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Which on-disk layout a document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentFormat {
    Current,
    /// Migrated from the bare-list layout; the file should be re-saved.
    Legacy,
}

/// A store rebuilt from a parsed document, plus the layout it came from.
#[derive(Debug, Clone)]
pub struct Migrated {
    pub store: WealthStore,
    pub format: DocumentFormat,
}

/// Member-list keys of the legacy layout, in lookup order.
const LEGACY_MEMBER_KEYS: [&str; 2] = ["members", "family_info"];

/// Builds a fresh store from `document`.
///
/// The document itself is never modified.
///
/// # Errors
///
/// Returns [`WealthError::UnrecognizedFormat`] if the document matches neither
/// layout, or if one of its records is not an object with string-list holders.
pub fn migrate(document: &Value) -> Result<Migrated> {
    let root = document.as_object().ok_or_else(|| {
        WealthError::UnrecognizedFormat("top level is not an object".to_string())
    })?;

    if is_current(root) {
        Ok(Migrated {
            store: from_current(root)?,
            format: DocumentFormat::Current,
        })
    } else if is_legacy(root) {
        log::info!("legacy data layout detected; migrating to the current layout");
        Ok(Migrated {
            store: from_legacy(root)?,
            format: DocumentFormat::Legacy,
        })
    } else {
        Err(WealthError::UnrecognizedFormat(
            "expected a family_info section or a members list".to_string(),
        ))
    }
}

fn is_current(root: &Map<String, Value>) -> bool {
    root.get(Category::FamilyInfo.name())
        .and_then(Value::as_object)
        .is_some_and(|section| {
            section.contains_key("columns") && section.get("data").is_some_and(Value::is_array)
        })
}

fn is_legacy(root: &Map<String, Value>) -> bool {
    legacy_members(root).is_some()
}

fn legacy_members(root: &Map<String, Value>) -> Option<&Vec<Value>> {
    LEGACY_MEMBER_KEYS
        .into_iter()
        .find_map(|key| root.get(key).and_then(Value::as_array))
}

fn from_current(root: &Map<String, Value>) -> Result<WealthStore> {
    let mut store = WealthStore::new();
    for (key, section) in root {
        let Some(category) = Category::from_name(key) else {
            log::debug!("keeping unknown section '{key}' as-is");
            store.insert_extra(key.clone(), section.clone());
            continue;
        };
        match section.get("data").and_then(Value::as_array) {
            Some(records) => {
                let mut seen = HashSet::new();
                for raw in records {
                    store.push(category, parse_record(category, raw, &mut seen)?);
                }
            }
            None => log::warn!("section '{key}' has no data list; starting it empty"),
        }
    }
    Ok(store)
}

fn from_legacy(root: &Map<String, Value>) -> Result<WealthStore> {
    let mut store = WealthStore::new();

    let mut seen = HashSet::new();
    for raw in legacy_members(root).into_iter().flatten() {
        let mut member = parse_record(Category::FamilyInfo, raw, &mut seen)?;
        if !member.fields.contains_key("Name") {
            if let Some(name) = member.fields.shift_remove("name") {
                member.fields.insert("Name".to_string(), name);
            }
        }
        store.push(Category::FamilyInfo, member);
    }

    for category in Category::assets() {
        if let Some(records) = root.get(category.name()).and_then(Value::as_array) {
            let mut seen = HashSet::new();
            for raw in records {
                store.push(category, parse_record(category, raw, &mut seen)?);
            }
        }
    }

    log::info!(
        "migrated {} member(s) and {} asset record(s)",
        store.members().len(),
        store.record_count() - store.members().len()
    );
    Ok(store)
}

/// Decodes one stored record and makes sure its ID is unique in `seen`.
///
/// Scalar IDs written by other tools (`7`, `true`) are read as their text.
/// Records with a null, empty or repeated ID get a fresh one.
fn parse_record(category: Category, raw: &Value, seen: &mut HashSet<String>) -> Result<Record> {
    let Some(object) = raw.as_object() else {
        return Err(WealthError::UnrecognizedFormat(format!(
            "a record in '{category}' is not an object"
        )));
    };
    let mut object = object.clone();
    if let Some(id) = object.get_mut("id") {
        if !id.is_string() && !id.is_array() && !id.is_object() {
            *id = Value::String(value_text(id));
        }
    }
    let mut record: Record = serde_json::from_value(Value::Object(object)).map_err(|e| {
        WealthError::UnrecognizedFormat(format!("a record in '{category}' is malformed: {e}"))
    })?;
    if record.id.is_empty() {
        record.id = new_id();
        log::warn!("assigned missing id {} to a record in '{category}'", record.id);
    } else if seen.contains(&record.id) {
        let fresh = new_id();
        log::warn!(
            "duplicate id {} in '{category}'; reassigned to {fresh}",
            record.id
        );
        record.id = fresh;
    }
    seen.insert(record.id.clone());
    Ok(record)
}
