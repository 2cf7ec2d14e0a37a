//! Checks applied to form input before a record is saved.

use crate::core::record::value_text;
use crate::{Category, FieldKind, FieldMap, Result, WealthError};
use chrono::NaiveDate;
use serde::Serialize;

/// Expected layout of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What was wrong with a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// A numeric field did not parse as a number. Blocks the save.
    NotANumber,
    /// A date field is not `YYYY-MM-DD`. Advisory only.
    NotADate,
}

/// A problem found in one field of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub field: String,
    pub value: String,
    pub kind: WarningKind,
}

impl ValidationWarning {
    /// True when the record must not be saved until the value is corrected.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.kind == WarningKind::NotANumber
    }

    /// A message for the user, naming the field.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            WarningKind::NotANumber => {
                format!("Invalid input for '{}'. Please enter a valid number.", self.field)
            }
            WarningKind::NotADate => {
                format!("Invalid format for '{}'. Recommended format is YYYY-MM-DD.", self.field)
            }
        }
    }
}

/// True when `value` is exactly a `YYYY-MM-DD` date, with no padding.
fn is_date(value: &str) -> bool {
    value.trim() == value && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

/// Checks `fields` against the declared field kinds of `category`.
///
/// Empty values and fields outside the schema are not checked. Numbers may
/// carry surrounding whitespace; dates must match [`DATE_FORMAT`] exactly.
pub fn validate_fields(category: Category, fields: &FieldMap) -> Vec<ValidationWarning> {
    let schema = category.schema();
    let mut warnings = Vec::new();
    for definition in schema.fields {
        let Some(value) = fields.get(definition.name).map(value_text) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let kind = match definition.kind {
            FieldKind::Numeric if value.trim().parse::<f64>().is_err() => WarningKind::NotANumber,
            FieldKind::Date if !is_date(&value) => WarningKind::NotADate,
            _ => continue,
        };
        warnings.push(ValidationWarning {
            field: definition.name.to_string(),
            value,
            kind,
        });
    }
    warnings
}

/// Fails on the first blocking warning; advisory warnings pass.
///
/// # Errors
///
/// Returns [`WealthError::ValidationFailed`] carrying the warning's message.
pub fn ensure_saveable(warnings: &[ValidationWarning]) -> Result<()> {
    match warnings.iter().find(|w| w.is_blocking()) {
        Some(blocking) => Err(WealthError::ValidationFailed(blocking.message())),
        None => Ok(()),
    }
}
