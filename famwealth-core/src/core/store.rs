//! The in-memory record store and its referential-integrity rules.

use crate::core::query;
use crate::core::record::without_reserved;
use crate::{Category, DeleteResult, FieldMap, Record, Result, WealthError};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// One category's declared columns and its records, in insertion order.
///
/// This is also the on-disk shape of a category: `{ "columns": [...], "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    pub columns: Vec<String>,
    pub data: Vec<Record>,
}

impl CategoryTable {
    /// An empty table carrying the declared columns of `category`.
    pub fn empty(category: Category) -> Self {
        Self {
            columns: category.schema().columns(),
            data: Vec::new(),
        }
    }
}

/// All records of an open data file, partitioned by [`Category`].
///
/// `WealthStore` is the single owner of the data. Members live in
/// [`Category::FamilyInfo`]; every other category holds asset records whose
/// `holders` lists reference member IDs. Deleting a member prunes its ID from
/// every holders list, so references never outlive the member.
///
/// Top-level entries of a loaded file that are not known categories are kept
/// verbatim and written back on save, but are not addressable here.
#[derive(Debug, Clone, PartialEq)]
pub struct WealthStore {
    tables: Vec<CategoryTable>,
    extras: serde_json::Map<String, Value>,
}

impl Default for WealthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WealthStore {
    /// Creates a store with every known category present and empty.
    pub fn new() -> Self {
        Self {
            tables: Category::ALL.into_iter().map(CategoryTable::empty).collect(),
            extras: serde_json::Map::new(),
        }
    }

    /// Discards all records and preserved unknown entries.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the table of `category`.
    pub fn table(&self, category: Category) -> &CategoryTable {
        &self.tables[category.index()]
    }

    fn table_mut(&mut self, category: Category) -> &mut CategoryTable {
        &mut self.tables[category.index()]
    }

    /// Returns the records of `category` in insertion order.
    pub fn records(&self, category: Category) -> &[Record] {
        &self.table(category).data
    }

    /// Returns all members in insertion order.
    pub fn members(&self) -> &[Record] {
        self.records(Category::FamilyInfo)
    }

    /// Fetches a single record by ID.
    pub fn record(&self, category: Category, id: &str) -> Option<&Record> {
        self.records(category).iter().find(|r| r.id == id)
    }

    /// Fetches a member by ID; `None` when no such member exists.
    pub fn member_by_id(&self, member_id: &str) -> Option<&Record> {
        self.record(Category::FamilyInfo, member_id)
    }

    /// Top-level entries of the loaded file that are not known categories.
    pub fn extras(&self) -> &serde_json::Map<String, Value> {
        &self.extras
    }

    /// Total number of records across all categories.
    pub fn record_count(&self) -> usize {
        self.tables.iter().map(|t| t.data.len()).sum()
    }

    /// True when no category holds a record.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|t| t.data.is_empty())
    }

    /// Appends a record as-is. Used when adopting migrated data.
    pub(crate) fn push(&mut self, category: Category, record: Record) {
        self.table_mut(category).data.push(record);
    }

    pub(crate) fn insert_extra(&mut self, key: String, value: Value) {
        self.extras.insert(key, value);
    }

    // ── Members ──────────────────────────────────────────────────

    /// Adds a member and returns its freshly assigned ID.
    pub fn create_member(&mut self, fields: FieldMap) -> String {
        let member = Record::new_member(fields);
        let id = member.id.clone();
        self.push(Category::FamilyInfo, member);
        id
    }

    /// Merges `fields` into an existing member; fields not named are kept.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NotFound`] if no member has `member_id`.
    pub fn update_member(&mut self, member_id: &str, fields: FieldMap) -> Result<()> {
        let member = self
            .table_mut(Category::FamilyInfo)
            .data
            .iter_mut()
            .find(|m| m.id == member_id)
            .ok_or_else(|| WealthError::not_found(Category::FamilyInfo.name(), member_id))?;
        member.fields.extend(without_reserved(fields));
        Ok(())
    }

    /// Removes a member and prunes its ID from every holders list.
    ///
    /// The member is located before anything is changed, so a missing ID
    /// leaves the store untouched; once found, the removal and the cascade
    /// cannot fail part-way.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NotFound`] if no member has `member_id`.
    pub fn delete_member(&mut self, member_id: &str) -> Result<DeleteResult> {
        let position = self
            .members()
            .iter()
            .position(|m| m.id == member_id)
            .ok_or_else(|| WealthError::not_found(Category::FamilyInfo.name(), member_id))?;
        self.table_mut(Category::FamilyInfo).data.remove(position);

        let mut affected_ids = Vec::new();
        for table in &mut self.tables {
            for record in &mut table.data {
                if record.drop_holder(member_id) {
                    affected_ids.push(record.id.clone());
                }
            }
        }
        log::debug!(
            "member {member_id} removed from {} asset record(s)",
            affected_ids.len()
        );

        Ok(DeleteResult {
            deleted_count: 1,
            affected_ids,
        })
    }

    // ── Assets ───────────────────────────────────────────────────

    fn ensure_asset_category(category: Category) -> Result<()> {
        if category.is_members() {
            return Err(WealthError::NotAnAssetCategory(category.name().to_string()));
        }
        Ok(())
    }

    /// Adds an asset record and returns its freshly assigned ID.
    ///
    /// Holder IDs are stored as given; they are not checked against the
    /// current members.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NotAnAssetCategory`] for [`Category::FamilyInfo`].
    pub fn create_asset(
        &mut self,
        category: Category,
        fields: FieldMap,
        holders: Vec<String>,
    ) -> Result<String> {
        Self::ensure_asset_category(category)?;
        let asset = Record::new_asset(fields, holders);
        let id = asset.id.clone();
        self.push(category, asset);
        Ok(id)
    }

    /// Replaces the fields and holders of an asset, keeping its ID.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NotAnAssetCategory`] for [`Category::FamilyInfo`],
    /// or [`WealthError::NotFound`] if `asset_id` is not in `category`.
    pub fn update_asset(
        &mut self,
        category: Category,
        asset_id: &str,
        fields: FieldMap,
        holders: Vec<String>,
    ) -> Result<()> {
        Self::ensure_asset_category(category)?;
        let asset = self
            .table_mut(category)
            .data
            .iter_mut()
            .find(|a| a.id == asset_id)
            .ok_or_else(|| WealthError::not_found(category.name(), asset_id))?;
        asset.fields = without_reserved(fields);
        asset.holders = Some(holders);
        Ok(())
    }

    /// Removes an asset record.
    ///
    /// # Errors
    ///
    /// Returns [`WealthError::NotAnAssetCategory`] for [`Category::FamilyInfo`],
    /// or [`WealthError::NotFound`] if `asset_id` is not in `category`.
    pub fn delete_asset(&mut self, category: Category, asset_id: &str) -> Result<()> {
        Self::ensure_asset_category(category)?;
        let data = &mut self.table_mut(category).data;
        let position = data
            .iter()
            .position(|a| a.id == asset_id)
            .ok_or_else(|| WealthError::not_found(category.name(), asset_id))?;
        data.remove(position);
        Ok(())
    }

    /// Every asset held (alone or jointly) by `member_id`, grouped by
    /// category in declaration order, then in insertion order.
    pub fn assets_held_by(&self, member_id: &str) -> Vec<(Category, &Record)> {
        Category::assets()
            .flat_map(|category| {
                self.records(category)
                    .iter()
                    .filter(move |r| r.is_held_by(member_id))
                    .map(move |r| (category, r))
            })
            .collect()
    }

    /// Records of `category` matching `term`; see [`query::filter`].
    pub fn filter(&self, category: Category, term: &str) -> Vec<&Record> {
        query::filter(self, category, term)
    }
}

impl Serialize for WealthStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len() + self.extras.len()))?;
        for category in Category::ALL {
            map.serialize_entry(category.name(), self.table(category))?;
        }
        for (key, value) in &self.extras {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
