//! Read-only projections of the store for display.

use crate::core::record::{value_text, RESERVED_KEYS};
use crate::{Category, FieldKind, Record, WealthStore};
use serde::Serialize;

/// Fields tried, in order, as the heading of an asset in a member's portfolio.
const TITLE_FIELDS: [&str; 3] = ["Fund Name", "PROPERTY DETAILS", "POLICY NO"];

/// Turns a key into Title Case words (`bank_accounts` → `Bank Accounts`).
///
/// Underscores become spaces; a letter is capitalised when it follows any
/// non-letter, so `e-mail` becomes `E-Mail`.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut after_letter = false;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

/// Human-readable name of a category, used for tab and section headings.
pub fn category_label(category: Category) -> String {
    title_case(category.name())
}

/// One display cell per declared column of `category`.
///
/// The holder column lists the names of the members referenced by the
/// record; IDs that no longer resolve to a member are left out.
pub fn display_row(store: &WealthStore, category: Category, record: &Record) -> Vec<String> {
    category
        .schema()
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Holders => record
                .holders
                .iter()
                .flatten()
                .filter_map(|id| store.member_by_id(id))
                .map(|m| m.name().unwrap_or("?").to_string())
                .collect::<Vec<_>>()
                .join(", "),
            _ => record.text(field.name).unwrap_or_default(),
        })
        .collect()
}

/// One asset in a member's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub id: String,
    pub title: String,
    /// `(label, value)` pairs for every non-empty attribute of the asset.
    pub details: Vec<(String, String)>,
}

/// The assets a member holds within one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSection {
    pub category: Category,
    pub label: String,
    pub entries: Vec<PortfolioEntry>,
}

/// Everything one member holds, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPortfolio {
    pub member_id: String,
    pub member_name: String,
    /// Only categories in which the member holds at least one asset.
    pub sections: Vec<PortfolioSection>,
}

fn portfolio_entry(asset: &Record) -> PortfolioEntry {
    let title = TITLE_FIELDS
        .iter()
        .filter_map(|field| asset.text(field))
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| {
            let short: String = asset.id.chars().take(8).collect();
            format!("ID: {short}")
        });
    let details = asset
        .fields
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (title_case(key), value_text(value)))
        .filter(|(_, value)| !value.is_empty())
        .collect();
    PortfolioEntry {
        id: asset.id.clone(),
        title,
        details,
    }
}

/// Builds the portfolio view of a member; `None` if the member does not exist.
pub fn member_portfolio(store: &WealthStore, member_id: &str) -> Option<MemberPortfolio> {
    let member = store.member_by_id(member_id)?;
    let mut sections: Vec<PortfolioSection> = Vec::new();
    for (category, asset) in store.assets_held_by(member_id) {
        let entry = portfolio_entry(asset);
        match sections.last_mut() {
            Some(section) if section.category == category => section.entries.push(entry),
            _ => sections.push(PortfolioSection {
                category,
                label: category_label(category),
                entries: vec![entry],
            }),
        }
    }
    Some(MemberPortfolio {
        member_id: member.id.clone(),
        member_name: member.name().unwrap_or_default().to_string(),
        sections,
    })
}
