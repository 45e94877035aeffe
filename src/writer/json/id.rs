//! Stable human-readable identifiers for report nodes.

/// Derives an identifier slug from a display name: lowercased, each space
/// replaced with a hyphen.
///
/// Nothing else is normalized: two differently-punctuated names collapsing to
/// the same slug collide silently. That is accepted behavior, kept for
/// compatibility with existing report consumers.
#[must_use]
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Composes a hierarchical identifier by joining `parts` with `;`.
#[must_use]
pub fn compose(parts: &[&str]) -> String {
    parts.join(";")
}

/// Identifier of one examples-table row: the table id plus the row's report
/// number.
///
/// `row_number` is 1-based over the table's data rows; the report counts the
/// header as row 1, so the first data row renders as row 2.
#[must_use]
pub fn example_row(table_id: &str, row_number: u32) -> String {
    format!("{table_id};{}", row_number + 1)
}
