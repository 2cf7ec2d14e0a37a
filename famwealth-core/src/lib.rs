//! Core library for Family Wealth, a local-first register of family members
//! and the financial assets they hold, alone or jointly.
//!
//! The primary entry point is [`Workspace`], which owns the single in-memory
//! [`WealthStore`] together with the file it was loaded from. All record
//! mutations go through `WealthStore` methods; file handling, migration of
//! older data files and CSV export go through `Workspace`.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    delete::DeleteResult,
    error::{Result, WealthError},
    export::{csv_escape, export_tables, write_csv, ExportSummary, ExportTable},
    ident::new_id,
    migrate::{migrate, DocumentFormat, Migrated},
    query::{bank_name_suggestions, filter},
    record::{field_map, FieldMap, Record},
    schema::{columns_for, schema_of, Category, FieldDefinition, FieldKind, Schema},
    settings::{load_settings_from, save_settings_to, settings_file_path, AppSettings},
    storage::{deserialize, read_document, serialize, write_store},
    store::{CategoryTable, WealthStore},
    validation::{ensure_saveable, validate_fields, ValidationWarning, WarningKind},
    view::{category_label, display_row, member_portfolio, MemberPortfolio, PortfolioEntry, PortfolioSection},
    workspace::{FormOutcome, Workspace},
};
