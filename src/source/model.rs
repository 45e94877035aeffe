//! Descriptive source elements a test case is made of.
//!
//! These are the narrow read-only view onto the external Gherkin-style source
//! model: just the fields the report needs, supplied by the execution engine.

use crate::step::Location;

/// A feature: the outermost descriptive context of every test case.
#[derive(Clone, Debug)]
pub struct Feature {
    /// Path of the feature file, as reported by the source model.
    pub uri: String,

    /// Keyword the feature was declared with.
    pub keyword: String,

    /// Feature name.
    pub name: String,

    /// Free-form description block, empty when none was written.
    pub description: String,

    /// Location of the feature declaration.
    pub location: Location,

    /// Tags attached to the feature.
    pub tags: Vec<Tag>,

    /// The feature's background, if it declares one.
    pub background: Option<Background>,
}

/// A background: a step group implicitly prefixed to every scenario of its
/// feature.
#[derive(Clone, Debug)]
pub struct Background {
    /// Keyword the background was declared with.
    pub keyword: String,

    /// Background name, frequently empty.
    pub name: String,

    /// Free-form description block, empty when none was written.
    pub description: String,

    /// Location of the background declaration.
    pub location: Location,
}

/// A scenario or scenario outline declaration.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Keyword the scenario was declared with.
    pub keyword: String,

    /// Scenario name.
    pub name: String,

    /// Free-form description block, empty when none was written.
    pub description: String,

    /// Location of the scenario declaration.
    pub location: Location,

    /// Tags attached to the scenario.
    pub tags: Vec<Tag>,
}

/// The examples table driving a scenario outline's repeated rows.
#[derive(Clone, Debug)]
pub struct ExamplesTable {
    /// Examples table name.
    pub name: String,

    /// Location of the table declaration.
    pub location: Location,
}

/// One data row of an [`ExamplesTable`].
#[derive(Clone, Debug)]
pub struct ExamplesRow {
    /// Location of the row.
    pub location: Location,

    /// 1-based number of this row among the table's *data* rows.
    ///
    /// The report renumbers rows counting the header as row 1, so the first
    /// data row serializes as row 2.
    pub number: u32,
}

/// A tag attached to a feature or scenario.
#[derive(Clone, Debug)]
pub struct Tag {
    /// Tag name, including the leading `@`.
    pub name: String,

    /// Location of the tag.
    pub location: Location,
}

/// A multiline text argument attached to a step.
#[derive(Clone, Debug)]
pub struct DocString {
    /// The text content.
    pub content: String,

    /// Declared content type, empty when none was given.
    pub content_type: String,

    /// Location of the opening delimiter.
    pub location: Location,
}
