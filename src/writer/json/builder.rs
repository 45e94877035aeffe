//! Per-test-case assembly of candidate report nodes.
//!
//! A [`CaseBuilder`] listens to one [`TestCase`]'s descriptive context and
//! yields the candidate feature node, scenario element and optional
//! background element the report tree builder works with.

use crate::source::{
    Background, ExamplesRow, ExamplesTable, Scenario, SourceVisitor, TestCase,
};

use super::{element::Element, feature::Feature, id};

/// Candidate nodes assembled from one test case's source chain.
#[derive(Debug)]
pub struct CaseCandidates {
    /// Candidate feature node; discarded when the previous test case already
    /// opened the same feature.
    pub(crate) feature: Feature,

    /// The scenario element of this test case.
    pub(crate) scenario: Element,

    /// A background element, whenever the owning feature declares one.
    pub(crate) background: Option<Element>,
}

/// [`SourceVisitor`] building [`CaseCandidates`] out of one test case.
///
/// Relies on the documented visitation order: the scenario-level visit builds
/// the element identity, the feature visit then prepends the feature
/// identity, and for outline rows the row and table visits precede the
/// outline visit. A source model violating that order is a collaborator
/// contract violation and panics.
#[derive(Debug, Default)]
pub struct CaseBuilder {
    feature: Option<Feature>,
    scenario: Option<Element>,
    background: Option<Element>,
    example_id: Option<String>,
    row: Option<ExamplesRow>,
}

impl CaseBuilder {
    /// Runs the full visitation for `case` and returns the assembled
    /// candidates.
    #[must_use]
    pub fn build(case: &TestCase) -> CaseCandidates {
        let mut builder = Self::default();
        case.describe_to(&mut builder);
        CaseCandidates {
            feature: builder
                .feature
                .expect("source chain visits the owning feature"),
            scenario: builder
                .scenario
                .expect("source chain visits the scenario before the feature"),
            background: builder.background,
        }
    }
}

impl SourceVisitor for CaseBuilder {
    fn visit_scenario(&mut self, scenario: &Scenario) {
        self.scenario = Some(Element::scenario(scenario));
    }

    fn visit_outline_row(&mut self, outline: &Scenario) {
        let example_id = self
            .example_id
            .as_deref()
            .expect("examples table is visited before its outline");
        let row =
            self.row.as_ref().expect("examples row is visited before its outline");
        self.scenario = Some(Element::outline_row(outline, example_id, row));
    }

    fn visit_examples_table(&mut self, table: &ExamplesTable) {
        let row =
            self.row.as_ref().expect("examples row is visited before its table");
        self.example_id =
            Some(id::example_row(&id::slug(&table.name), row.number));
    }

    fn visit_examples_row(&mut self, row: &ExamplesRow) {
        self.row = Some(row.clone());
    }

    fn visit_feature(&mut self, feature: &crate::source::Feature) {
        let feature = Feature::new(feature);
        self.scenario
            .as_mut()
            .expect("scenario is visited before its feature")
            .prepend_id(feature.id());
        self.feature = Some(feature);
    }

    fn visit_background(&mut self, background: &Background) {
        self.background = Some(Element::background(background));
    }
}
