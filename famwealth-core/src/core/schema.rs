//! Category definitions and the fixed per-category field-descriptor tables.
//!
//! Every category declares its columns once, together with the [`FieldKind`]
//! of each column. Form builders and the validator both read the kind from
//! here rather than guessing it from the column name.

use crate::{Result, WealthError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a column is entered and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// A calendar date, expected as `YYYY-MM-DD`.
    Date,
    /// A value that must parse as a number.
    Numeric,
    /// The synthesized holder/owner column, backed by the record's `holders` list.
    Holders,
}

/// Describes a single column of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDefinition {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// The declared, ordered column set of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub category: Category,
    pub fields: &'static [FieldDefinition],
}

impl Schema {
    /// Column names in display order.
    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.to_string()).collect()
    }

    /// Looks up a column by its exact name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Name of the holder column (`"Holders"` or `"Owners"`), if the category has one.
    pub fn holder_column(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::Holders)
            .map(|f| f.name)
    }
}

/// The known partitions of the record store, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FamilyInfo,
    BankAccounts,
    FixedDeposits,
    DematAccounts,
    MutualFunds,
    Investments,
    Insurance,
    Locker,
    VehicleDetails,
    Property,
}

impl Category {
    /// Every known category, members first.
    pub const ALL: [Category; 10] = [
        Category::FamilyInfo,
        Category::BankAccounts,
        Category::FixedDeposits,
        Category::DematAccounts,
        Category::MutualFunds,
        Category::Investments,
        Category::Insurance,
        Category::Locker,
        Category::VehicleDetails,
        Category::Property,
    ];

    /// The name used as the top-level key in data files and as the CSV file stem.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FamilyInfo => "family_info",
            Self::BankAccounts => "bank_accounts",
            Self::FixedDeposits => "fixed_deposits",
            Self::DematAccounts => "demat_accounts",
            Self::MutualFunds => "mutual_funds",
            Self::Investments => "investments",
            Self::Insurance => "insurance",
            Self::Locker => "locker",
            Self::VehicleDetails => "vehicle_details",
            Self::Property => "property",
        }
    }

    /// Resolves a category from its data-file name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Position of this category in [`Category::ALL`].
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// True for `family_info`, the only category other records may reference.
    #[must_use]
    pub fn is_members(self) -> bool {
        self == Self::FamilyInfo
    }

    /// Every category that holds asset records, in declaration order.
    pub fn assets() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(|c| !c.is_members())
    }

    /// The declared schema of this category.
    #[must_use]
    pub fn schema(self) -> &'static Schema {
        &SCHEMAS[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = WealthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| WealthError::UnknownCategory(s.to_string()))
    }
}

use FieldKind::{Date, Holders, Numeric, Text};

static SCHEMAS: [Schema; 10] = [
    Schema {
        category: Category::FamilyInfo,
        fields: &[
            FieldDefinition::new("Name", Text),
            FieldDefinition::new("Aadhar No.", Text),
            FieldDefinition::new("PAN no", Text),
            FieldDefinition::new("Voter id no", Text),
        ],
    },
    Schema {
        category: Category::BankAccounts,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("Account Type", Text),
            FieldDefinition::new("BANK NAME", Text),
            FieldDefinition::new("ACCOUNT NO", Text),
        ],
    },
    Schema {
        category: Category::FixedDeposits,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("Bank Name", Text),
            FieldDefinition::new("Rate (%)", Numeric),
            FieldDefinition::new("Number of Days", Numeric),
            FieldDefinition::new("Start Date", Date),
            FieldDefinition::new("End Date", Date),
            FieldDefinition::new("Amount", Numeric),
        ],
    },
    Schema {
        category: Category::DematAccounts,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("Provider", Text),
            FieldDefinition::new("Account Number", Text),
        ],
    },
    Schema {
        category: Category::MutualFunds,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("Provider", Text),
            FieldDefinition::new("Fund Name", Text),
            FieldDefinition::new("Folio Number", Text),
        ],
    },
    Schema {
        category: Category::Investments,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("BANK NAME", Text),
            FieldDefinition::new("ACCOUNT NO", Text),
            FieldDefinition::new("Details", Text),
        ],
    },
    Schema {
        category: Category::Insurance,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("COMPANY", Text),
            FieldDefinition::new("POLICY NO", Text),
            FieldDefinition::new("SUM ASSURED", Numeric),
        ],
    },
    Schema {
        category: Category::Locker,
        fields: &[
            FieldDefinition::new("Holders", Holders),
            FieldDefinition::new("BANK NAME", Text),
            FieldDefinition::new("LOCKER NO", Text),
        ],
    },
    Schema {
        category: Category::VehicleDetails,
        fields: &[
            FieldDefinition::new("Owners", Holders),
            FieldDefinition::new("VEHICLE MAKE", Text),
            FieldDefinition::new("REGISTRATION NO", Text),
        ],
    },
    Schema {
        category: Category::Property,
        fields: &[
            FieldDefinition::new("Owners", Holders),
            FieldDefinition::new("PROPERTY DETAILS", Text),
            FieldDefinition::new("LOCATION", Text),
        ],
    },
];

/// Returns the declared schema of `category`.
pub fn schema_of(category: Category) -> &'static Schema {
    category.schema()
}

/// Returns the display columns for a category name.
///
/// Categories that were preserved from a data file but are not known to this
/// version have no declared schema and therefore no columns.
pub fn columns_for(name: &str) -> Vec<String> {
    Category::from_name(name)
        .map(|c| c.schema().columns())
        .unwrap_or_default()
}
