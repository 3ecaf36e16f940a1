//! Deterministic snapshot filenames

use crate::row::Row;
use crate::template::populate;

/// Compute the snapshot filename for a row.
///
/// Without a pattern the name derives from the row id alone
/// (`request-<rowId>.json`), unique within a run as long as row ids are.
/// With a pattern, the pattern is resolved against the row's fields and
/// given the fixed extension, e.g. `"{fileRecordType}-{bindingId}"` →
/// `request-music-1.json`. Identical row content always yields the
/// identical name; this is what keeps capture/compare stable across runs.
#[must_use]
pub fn snapshot_file_name(row: &Row, pattern: Option<&str>) -> String {
    match pattern {
        None => format!("request-{}.json", row.id()),
        Some(pattern) => format!("request-{}.json", populate(Some(pattern), row)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_from_row_id() {
        assert_eq!(snapshot_file_name(&Row::empty(0), None), "request-0.json");
        assert_eq!(snapshot_file_name(&Row::empty(42), None), "request-42.json");
    }

    #[test]
    fn default_name_ignores_fields() {
        let row = Row::new(7, vec![("bindingId".into(), "99".into())]);
        assert_eq!(snapshot_file_name(&row, None), "request-7.json");
    }

    #[test]
    fn pattern_name_from_fields() {
        let row = Row::new(
            1,
            vec![
                ("fileRecordType".into(), "music".into()),
                ("bindingId".into(), "1".into()),
            ],
        );
        assert_eq!(
            snapshot_file_name(&row, Some("{fileRecordType}-{bindingId}")),
            "request-music-1.json"
        );
    }

    #[test]
    fn stable_across_calls() {
        let row = Row::new(3, vec![("bindingId".into(), "3".into())]);
        let first = snapshot_file_name(&row, Some("{bindingId}"));
        let second = snapshot_file_name(&row, Some("{bindingId}"));
        assert_eq!(first, second);
        assert_eq!(first, "request-3.json");
    }
}
