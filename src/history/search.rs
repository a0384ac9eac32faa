//! Matching rules for history search and tag filtering.

use super::model::SavedComparison;

/// Tests input text, then tags, then notes. `query` must already be case-folded.
pub(crate) fn matches_query(item: &SavedComparison, query: &str) -> bool {
    if item.input_text.to_lowercase().contains(query) {
        return true;
    }

    let tag_hit = item
        .tags
        .iter()
        .flatten()
        .map(|tag| tag.to_lowercase())
        .any(|tag| tag == query || tag.contains(query));
    if tag_hit {
        return true;
    }

    item.notes
        .as_deref()
        .is_some_and(|notes| notes.to_lowercase().contains(query))
}

/// True when the item carries at least one of `tags`.
pub(crate) fn has_any_tag(item: &SavedComparison, tags: &[String]) -> bool {
    item.tags
        .as_ref()
        .is_some_and(|own| tags.iter().any(|tag| own.contains(tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn item(input: &str, tags: &[&str], notes: Option<&str>) -> SavedComparison {
        SavedComparison {
            id: "id".to_string(),
            created_at: 1,
            input_text: input.to_string(),
            result: json!({}),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>())
            },
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_matches_input_case_insensitive() {
        assert!(matches_query(&item("User Profile list", &[], None), "profile"));
    }

    #[test]
    fn test_matches_tag_substring() {
        let record = item("abc", &["Benchmarks"], None);
        assert!(matches_query(&record, "bench"));
        assert!(matches_query(&record, "benchmarks"));
    }

    #[test]
    fn test_matches_notes() {
        let record = item("abc", &[], Some("Compare with TOML later"));
        assert!(matches_query(&record, "toml"));
        assert!(!matches_query(&record, "yaml"));
    }

    #[test]
    fn test_has_any_tag() {
        let record = item("abc", &["a", "b"], None);
        assert!(has_any_tag(&record, &["z".to_string(), "b".to_string()]));
        assert!(!has_any_tag(&record, &["z".to_string()]));
        assert!(!has_any_tag(&item("abc", &[], None), &["a".to_string()]));
    }
}
