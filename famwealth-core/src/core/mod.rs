//! Internal domain modules for the Family Wealth core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod delete;
pub mod error;
pub mod export;
pub mod ident;
pub mod migrate;
pub mod query;
pub mod record;
pub mod schema;
pub mod settings;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;
pub mod workspace;

#[doc(inline)]
pub use delete::DeleteResult;
#[doc(inline)]
pub use error::{Result, WealthError};
#[doc(inline)]
pub use export::{export_tables, write_csv, ExportSummary, ExportTable};
#[doc(inline)]
pub use ident::new_id;
#[doc(inline)]
pub use migrate::{migrate, DocumentFormat, Migrated};
#[doc(inline)]
pub use record::{FieldMap, Record};
#[doc(inline)]
pub use schema::{Category, FieldDefinition, FieldKind, Schema};
#[doc(inline)]
pub use settings::AppSettings;
#[doc(inline)]
pub use store::{CategoryTable, WealthStore};
#[doc(inline)]
pub use validation::{ValidationWarning, WarningKind};
#[doc(inline)]
pub use workspace::{FormOutcome, Workspace};
