//! Free-text filtering over a category's records.

use crate::core::record::value_text;
use crate::{Category, Record, WealthStore};

/// Returns the records of `category` that contain `term`, in store order.
///
/// Matching is a case-insensitive substring test against every stored value
/// of a record: schema fields, extra attributes, the record ID and each
/// holder ID. An empty term returns every record. Nothing is cached; the
/// data sets are small enough to scan on each keystroke.
pub fn filter<'a>(store: &'a WealthStore, category: Category, term: &str) -> Vec<&'a Record> {
    let records = store.records(category);
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}

fn record_matches(record: &Record, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(record.id.as_str())
        || record
            .holders
            .iter()
            .flatten()
            .any(|holder| contains(holder.as_str()))
        || record.fields.values().any(|value| contains(value_text(value).as_str()))
}

/// Distinct non-empty `BANK NAME` values of the bank accounts, sorted.
///
/// Offered as suggestions when a bank name is typed for a fixed deposit or
/// an investment.
pub fn bank_name_suggestions(store: &WealthStore) -> Vec<String> {
    let mut names: Vec<String> = store
        .records(Category::BankAccounts)
        .iter()
        .filter_map(|account| account.text("BANK NAME"))
        .filter(|name| !name.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{field_map, FieldMap};

    fn sample_store() -> (WealthStore, String) {
        let mut store = WealthStore::new();
        let asha = store.create_member(field_map([("Name", "Asha Rao"), ("PAN no", "ABCDE1234F")]));
        store.create_member(field_map([("Name", "Ravi Rao")]));
        store.create_member(field_map([("Name", "Meena")]));
        store
            .create_asset(
                Category::BankAccounts,
                field_map([("BANK NAME", "State Bank"), ("Account Type", "Savings")]),
                vec![asha.clone()],
            )
            .unwrap();
        store
            .create_asset(
                Category::BankAccounts,
                field_map([("BANK NAME", "HDFC"), ("Account Type", "Current")]),
                vec![],
            )
            .unwrap();
        store
            .create_asset(
                Category::BankAccounts,
                field_map([("BANK NAME", "State Bank"), ("Account Type", "Current")]),
                vec![],
            )
            .unwrap();
        (store, asha)
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let (store, _) = sample_store();
        let all: Vec<&Record> = store.members().iter().collect();
        assert_eq!(filter(&store, Category::FamilyInfo, ""), all);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_order_preserving() {
        let (store, _) = sample_store();
        let names: Vec<Option<&str>> = filter(&store, Category::FamilyInfo, "rAO")
            .into_iter()
            .map(Record::name)
            .collect();
        assert_eq!(names, vec![Some("Asha Rao"), Some("Ravi Rao")]);
    }

    #[test]
    fn test_filter_result_is_subsequence() {
        let (store, _) = sample_store();
        let all = store.records(Category::BankAccounts);
        let hits = filter(&store, Category::BankAccounts, "current");
        assert_eq!(hits.len(), 2);
        let mut cursor = all.iter();
        for hit in hits {
            assert!(cursor.any(|r| r == hit));
        }
    }

    #[test]
    fn test_filter_matches_non_schema_values() {
        let (store, asha) = sample_store();
        let by_id = filter(&store, Category::FamilyInfo, &asha[..8].to_uppercase());
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, asha);

        let by_holder = filter(&store, Category::BankAccounts, &asha);
        assert_eq!(by_holder.len(), 1);
        assert_eq!(by_holder[0].text("BANK NAME").as_deref(), Some("State Bank"));
    }

    #[test]
    fn test_filter_matches_non_string_values() {
        let mut store = WealthStore::new();
        let mut fields = FieldMap::new();
        fields.insert("SUM ASSURED".into(), serde_json::json!(250000));
        store.create_asset(Category::Insurance, fields, vec![]).unwrap();
        assert_eq!(filter(&store, Category::Insurance, "250000").len(), 1);
        assert!(filter(&store, Category::Insurance, "987654321").is_empty());
    }

    #[test]
    fn test_bank_name_suggestions_sorted_and_distinct() {
        let (mut store, _) = sample_store();
        store
            .create_asset(Category::BankAccounts, field_map([("BANK NAME", "")]), vec![])
            .unwrap();
        assert_eq!(bank_name_suggestions(&store), vec!["HDFC", "State Bank"]);
    }
}
