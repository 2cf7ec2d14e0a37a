//! Record identifier generation.

use uuid::Uuid;

/// Returns a fresh random record identifier in canonical hyphenated UUID form.
///
/// Identifiers are 128-bit v4 UUIDs, so they stay unique across records,
/// deletions and separate data files without any central registry.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_is_canonical_uuid() {
        let id = new_id();
        assert_eq!(id.len(), 36);
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.hyphenated().to_string(), id);
    }

    #[test]
    fn test_new_id_does_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
