//! Result type for member removal.
//!
//! Deleting a member cascades into every asset category: the member's ID is
//! pruned from each asset's `holders` list. [`DeleteResult`] reports what the
//! cascade touched so the caller can refresh the affected views.
//!
//! ## Serialization
//!
//! `DeleteResult` fields serialize in camelCase (`deletedCount`,
//! `affectedIds`), consistent with the other return types in this crate.
//!
//! ## Examples
//!
//! ```rust
//! use famwealth_core::DeleteResult;
//!
//! let result = DeleteResult {
//!     deleted_count: 1,
//!     affected_ids: vec!["asset-a".to_string(), "asset-b".to_string()],
//! };
//! let json = serde_json::to_string(&result).unwrap();
//! assert!(json.contains("deletedCount"));
//! assert!(json.contains("affectedIds"));
//! ```

use serde::{Deserialize, Serialize};

/// The outcome of deleting a member from a [`WealthStore`](super::store::WealthStore).
///
/// # Examples
///
/// ```rust
/// use famwealth_core::DeleteResult;
///
/// let result = DeleteResult {
///     deleted_count: 1,
///     affected_ids: vec![],
/// };
/// assert_eq!(result.deleted_count, 1);
/// assert!(result.affected_ids.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// The number of member records that were removed.
    pub deleted_count: usize,

    /// IDs of the asset records whose holders list lost the deleted member.
    pub affected_ids: Vec<String>,
}
