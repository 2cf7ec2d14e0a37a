//! Error types for the Family Wealth core library.

use thiserror::Error;

/// All errors that can occur within the Family Wealth core library.
#[derive(Debug, Error)]
pub enum WealthError {
    /// A record ID was requested that does not exist in its category.
    #[error("Record not found in {category}: {id}")]
    NotFound { category: String, id: String },

    /// A category name is not one of the known categories.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An asset operation was aimed at a category that holds members, not assets.
    #[error("Not an asset category: {0}")]
    NotAnAssetCategory(String),

    /// A loaded document matches neither the current nor the legacy layout.
    #[error("Unrecognized data format: {0}")]
    UnrecognizedFormat(String),

    /// A form value failed a blocking check when saving a record.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// An export was requested while every category is empty.
    #[error("There is no data to export")]
    NothingToExport,

    /// A plain save was requested before the workspace was ever saved to a file.
    #[error("The workspace has no file path yet")]
    NoFilePath,

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized to or parsed from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`WealthError`].
pub type Result<T> = std::result::Result<T, WealthError>;

impl WealthError {
    /// Shorthand for [`WealthError::NotFound`].
    pub(crate) fn not_found(category: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            category: category.into(),
            id: id.into(),
        }
    }

    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { .. } => "The selected record no longer exists".to_string(),
            Self::UnknownCategory(name) => format!("Unknown section: {name}"),
            Self::NotAnAssetCategory(name) => format!("'{name}' does not hold asset records"),
            Self::UnrecognizedFormat(_) => {
                "Failed to load data: the file is not a Family Wealth data file".to_string()
            }
            Self::ValidationFailed(msg) => msg.clone(),
            Self::NothingToExport => "There is no data to export.".to_string(),
            Self::NoFilePath => "Choose a file to save to first".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
