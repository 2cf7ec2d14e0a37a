//! The open data file: one [`WealthStore`] plus where it lives on disk.

use crate::{
    ensure_saveable, migrate, read_document, validate_fields, write_csv, write_store, AppSettings,
    Category, DocumentFormat, ExportSummary, FieldMap, Result, ValidationWarning, WealthError,
    WealthStore,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Label shown in place of a file name before the first save.
const UNSAVED_LABEL: &str = "Unsaved File";

/// Result of saving a member or asset form.
///
/// ```
/// use famwealth_core::{field_map, Category, Workspace};
///
/// let mut ws = Workspace::new();
/// let outcome = ws
///     .submit_asset(
///         Category::FixedDeposits,
///         None,
///         field_map([("Amount", "50000"), ("Start Date", "01-04-2024")]),
///         vec![],
///     )
///     .unwrap();
/// // Saved, but the date layout is flagged.
/// assert_eq!(outcome.warnings.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    /// ID of the created or updated record.
    pub id: String,
    /// Advisory warnings; blocking ones abort the save instead.
    pub warnings: Vec<ValidationWarning>,
}

/// An editing session over one data file.
///
/// The store is always valid: a failed [`open`](Self::open) leaves an empty
/// store behind, as if a new file had been started.
#[derive(Debug, Default)]
pub struct Workspace {
    store: WealthStore,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Workspace {
    /// Starts a new, unsaved, empty file.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &WealthStore {
        &self.store
    }

    /// Mutable access to the store. Marks the session as modified.
    pub fn store_mut(&mut self) -> &mut WealthStore {
        self.dirty = true;
        &mut self.store
    }

    /// The file backing this session, if it has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True when the store changed since it was last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// File name of the backing file, or `Unsaved File`.
    pub fn file_label(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| UNSAVED_LABEL.to_string())
    }

    /// Loads the data file at `path`, replacing the current store.
    ///
    /// Returns the layout the file was written in; [`DocumentFormat::Legacy`]
    /// files are converted in memory and should be saved again.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::Io`], [`WealthError::Json`] or
    /// [`WealthError::UnrecognizedFormat`]. In every error case the session is
    /// reset to an empty, unsaved store.
    pub fn open(&mut self, path: &Path) -> Result<DocumentFormat> {
        let loaded = read_document(path).and_then(|doc| migrate(&doc));
        match loaded {
            Ok(migrated) => {
                log::info!(
                    "loaded {} record(s) from {}",
                    migrated.store.record_count(),
                    path.display()
                );
                self.store = migrated.store;
                self.path = Some(path.to_path_buf());
                self.dirty = false;
                Ok(migrated.format)
            }
            Err(e) => {
                log::warn!("could not load {}: {e}", path.display());
                self.store.reset();
                self.path = None;
                self.dirty = false;
                Err(e)
            }
        }
    }

    /// Reopens the file of the previous session, if one was recorded.
    ///
    /// Returns `Ok(None)` and leaves the session untouched when `settings`
    /// names no file.
    ///
    /// # Errors
    ///
    /// As for [`open`](Self::open); the session is reset on failure.
    pub fn open_last(&mut self, settings: &AppSettings) -> Result<Option<DocumentFormat>> {
        match settings.last_file.as_deref() {
            Some(path) => self.open(path).map(Some),
            None => Ok(None),
        }
    }

    /// Writes the store back to its file.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NoFilePath`] if the session was never saved or
    /// opened, or any error from [`write_store`].
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(WealthError::NoFilePath)?;
        write_store(&path, &self.store)?;
        self.dirty = false;
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Writes the store to `path` and makes it the session's file.
    ///
    /// # Errors
    ///
    /// Returns any error from [`write_store`]; the previous path is kept.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        write_store(path, &self.store)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        log::info!("saved {}", path.display());
        Ok(())
    }

    /// Exports every non-empty category as CSV into `dir`.
    ///
    /// # Errors
    ///
    /// See [`write_csv`].
    pub fn export_csv(&self, dir: &Path) -> Result<ExportSummary> {
        write_csv(dir, &self.store)
    }

    /// Saves the member form: creates a member when `id` is `None`, otherwise
    /// merges `fields` into the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::ValidationFailed`] on a blocking warning, or
    /// [`WealthError::NotFound`] when updating an unknown member.
    pub fn submit_member(&mut self, id: Option<&str>, fields: FieldMap) -> Result<FormOutcome> {
        let warnings = validate_fields(Category::FamilyInfo, &fields);
        ensure_saveable(&warnings)?;
        let id = match id {
            Some(id) => {
                self.store.update_member(id, fields)?;
                log::info!("updated member {id}");
                id.to_string()
            }
            None => {
                let id = self.store.create_member(fields);
                log::info!("created member {id}");
                id
            }
        };
        self.dirty = true;
        Ok(FormOutcome { id, warnings })
    }

    /// Saves an asset form: creates the asset when `id` is `None`, otherwise
    /// replaces its fields and holders.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::ValidationFailed`] on a blocking warning,
    /// [`WealthError::NotAnAssetCategory`] for the member category, or
    /// [`WealthError::NotFound`] when updating an unknown asset.
    pub fn submit_asset(
        &mut self,
        category: Category,
        id: Option<&str>,
        fields: FieldMap,
        holders: Vec<String>,
    ) -> Result<FormOutcome> {
        let warnings = validate_fields(category, &fields);
        ensure_saveable(&warnings)?;
        let id = match id {
            Some(id) => {
                self.store.update_asset(category, id, fields, holders)?;
                log::info!("updated {category} record {id}");
                id.to_string()
            }
            None => {
                let id = self.store.create_asset(category, fields, holders)?;
                log::info!("created {category} record {id}");
                id
            }
        };
        self.dirty = true;
        Ok(FormOutcome { id, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map;
    use std::fs;

    #[test]
    fn test_new_workspace_is_unsaved_and_clean() {
        let ws = Workspace::new();
        assert_eq!(ws.file_label(), "Unsaved File");
        assert!(!ws.is_dirty());
        assert!(ws.path().is_none());
        assert!(ws.store().is_empty());
    }

    #[test]
    fn test_save_without_path() {
        let mut ws = Workspace::new();
        assert!(matches!(ws.save(), Err(WealthError::NoFilePath)));
    }

    #[test]
    fn test_save_as_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family.json");

        let mut ws = Workspace::new();
        let asha = ws.submit_member(None, field_map([("Name", "Asha")])).unwrap().id;
        ws.submit_asset(
            Category::Insurance,
            None,
            field_map([("COMPANY", "LIC"), ("SUM ASSURED", "500000")]),
            vec![asha.clone()],
        )
        .unwrap();
        assert!(ws.is_dirty());

        ws.save_as(&path).unwrap();
        assert!(!ws.is_dirty());
        assert_eq!(ws.file_label(), "family.json");

        let mut reopened = Workspace::new();
        assert_eq!(reopened.open(&path).unwrap(), DocumentFormat::Current);
        assert_eq!(reopened.store(), ws.store());
        assert_eq!(reopened.store().assets_held_by(&asha).len(), 1);
    }

    #[test]
    fn test_save_writes_to_opened_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family.json");
        let mut ws = Workspace::new();
        ws.save_as(&path).unwrap();

        ws.submit_member(None, field_map([("Name", "Ravi")])).unwrap();
        ws.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Name\": \"Ravi\""));
    }

    #[test]
    fn test_open_unrecognized_resets_store() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"foo": 1}"#).unwrap();

        let mut ws = Workspace::new();
        ws.submit_member(None, field_map([("Name", "Asha")])).unwrap();
        ws.save_as(&good).unwrap();

        let err = ws.open(&bad).unwrap_err();
        assert!(matches!(err, WealthError::UnrecognizedFormat(_)));
        assert!(ws.store().is_empty());
        assert_eq!(ws.store(), &WealthStore::new());
        assert!(ws.path().is_none());
        assert_eq!(ws.file_label(), "Unsaved File");
    }

    #[test]
    fn test_open_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::new();
        assert!(matches!(
            ws.open(&dir.path().join("absent.json")),
            Err(WealthError::Io(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ \"family_info\": ").unwrap();
        assert!(matches!(ws.open(&broken), Err(WealthError::Json(_))));
        assert!(ws.store().is_empty());
    }

    #[test]
    fn test_open_last_reopens_the_tracked_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("family.json");
        let mut settings = AppSettings::default();

        let mut ws = Workspace::new();
        assert_eq!(ws.open_last(&settings).unwrap(), None);

        ws.submit_member(None, field_map([("Name", "Asha")])).unwrap();
        ws.save_as(&path).unwrap();
        settings.track(&ws);

        let mut next = Workspace::new();
        assert_eq!(next.open_last(&settings).unwrap(), Some(DocumentFormat::Current));
        assert_eq!(next.file_label(), "family.json");
        assert_eq!(next.store(), ws.store());

        fs::remove_file(&path).unwrap();
        assert!(matches!(next.open_last(&settings), Err(WealthError::Io(_))));
        assert!(next.store().is_empty());
    }

    #[test]
    fn test_open_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.json");
        fs::write(
            &path,
            r#"{
                "members": [{"name": "Asha", "id": "m-1"}],
                "bank_accounts": [{"BANK NAME": "SBI", "holders": ["m-1"], "id": "b-1"}]
            }"#,
        )
        .unwrap();

        let mut ws = Workspace::new();
        assert_eq!(ws.open(&path).unwrap(), DocumentFormat::Legacy);
        assert_eq!(ws.store().member_by_id("m-1").unwrap().name(), Some("Asha"));
        assert!(ws.store().record(Category::BankAccounts, "b-1").unwrap().is_held_by("m-1"));
        assert!(!ws.is_dirty());
    }

    #[test]
    fn test_submit_asset_blocks_on_bad_number() {
        let mut ws = Workspace::new();
        let err = ws
            .submit_asset(
                Category::FixedDeposits,
                None,
                field_map([("Rate (%)", "seven")]),
                vec![],
            )
            .unwrap_err();
        assert!(matches!(err, WealthError::ValidationFailed(_)));
        assert!(ws.store().is_empty());
        assert!(!ws.is_dirty());
    }

    #[test]
    fn test_submit_updates_existing_records() {
        let mut ws = Workspace::new();
        let asha = ws
            .submit_member(None, field_map([("Name", "Asha"), ("PAN no", "P1")]))
            .unwrap()
            .id;
        ws.submit_member(Some(&asha), field_map([("PAN no", "P2")])).unwrap();
        let member = ws.store().member_by_id(&asha).unwrap();
        assert_eq!(member.name(), Some("Asha"));
        assert_eq!(member.text("PAN no").as_deref(), Some("P2"));

        let locker = ws
            .submit_asset(Category::Locker, None, field_map([("LOCKER NO", "1")]), vec![])
            .unwrap()
            .id;
        let outcome = ws
            .submit_asset(
                Category::Locker,
                Some(&locker),
                field_map([("BANK NAME", "HDFC")]),
                vec![asha.clone()],
            )
            .unwrap();
        assert_eq!(outcome.id, locker);
        let record = ws.store().record(Category::Locker, &locker).unwrap();
        assert_eq!(record.text("LOCKER NO"), None);
        assert!(record.is_held_by(&asha));
    }

    #[test]
    fn test_submit_unknown_ids() {
        let mut ws = Workspace::new();
        assert!(matches!(
            ws.submit_member(Some("nobody"), FieldMap::new()),
            Err(WealthError::NotFound { .. })
        ));
        assert!(matches!(
            ws.submit_asset(Category::FamilyInfo, None, FieldMap::new(), vec![]),
            Err(WealthError::NotAnAssetCategory(_))
        ));
    }

    #[test]
    fn test_export_csv_through_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::new();
        assert!(matches!(ws.export_csv(dir.path()), Err(WealthError::NothingToExport)));

        ws.submit_member(None, field_map([("Name", "Asha")])).unwrap();
        let summary = ws.export_csv(dir.path()).unwrap();
        assert_eq!(summary.files, vec![dir.path().join("family_info.csv")]);
    }
}
