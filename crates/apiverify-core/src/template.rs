//! `{field}` token substitution against a row

use crate::row::Row;

/// Substitute every `{name}` token that matches a row field.
///
/// A `None` template yields an empty string. Tokens with no matching field
/// stay verbatim — templates may reference fields a given row does not
/// carry, and that must not fail the row. Pure and deterministic.
#[must_use]
pub fn populate(template: Option<&str>, row: &Row) -> String {
    let Some(template) = template else {
        return String::new();
    };

    let mut populated = template.to_string();
    for (name, value) in row.fields() {
        populated = populated.replace(&format!("{{{name}}}"), value);
    }
    populated
}
