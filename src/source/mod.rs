// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Narrow interface to the external source model.
//!
//! A [`TestCase`] is one executable scenario instance: a plain scenario, or
//! one row of a scenario outline. It exposes its nested descriptive context
//! to a [`SourceVisitor`], ordered from innermost to outermost, which is the
//! only way this crate ever reads the source model.

pub mod model;

use std::sync::Arc;

pub use self::model::{
    Background, DocString, ExamplesRow, ExamplesTable, Feature, Scenario, Tag,
};

/// Receiver of a [`TestCase`]'s descriptive context.
///
/// Methods are invoked innermost first. For a plain scenario:
/// [`visit_scenario()`], then [`visit_feature()`]. For an outline row:
/// [`visit_examples_row()`], [`visit_examples_table()`],
/// [`visit_outline_row()`], then [`visit_feature()`]. The scenario-level
/// visit always precedes the feature visit, as the feature identity is
/// prepended onto an already-built scenario identity. Whenever the owning
/// feature declares a background, [`visit_background()`] follows regardless
/// of whether the current test case executes background steps.
///
/// [`visit_background()`]: SourceVisitor::visit_background
/// [`visit_examples_row()`]: SourceVisitor::visit_examples_row
/// [`visit_examples_table()`]: SourceVisitor::visit_examples_table
/// [`visit_feature()`]: SourceVisitor::visit_feature
/// [`visit_outline_row()`]: SourceVisitor::visit_outline_row
/// [`visit_scenario()`]: SourceVisitor::visit_scenario
pub trait SourceVisitor {
    /// Visits a plain [`Scenario`].
    fn visit_scenario(&mut self, scenario: &Scenario);

    /// Visits the outline declaration of an outline-generated test case.
    fn visit_outline_row(&mut self, outline: &Scenario);

    /// Visits the [`ExamplesTable`] an outline row belongs to.
    fn visit_examples_table(&mut self, table: &ExamplesTable);

    /// Visits the [`ExamplesRow`] generating an outline test case.
    fn visit_examples_row(&mut self, row: &ExamplesRow);

    /// Visits the owning [`Feature`].
    fn visit_feature(&mut self, feature: &Feature);

    /// Visits the owning feature's [`Background`].
    fn visit_background(&mut self, background: &Background);
}

/// Scenario-level origin of a [`TestCase`].
#[derive(Clone, Debug)]
pub enum CaseSource {
    /// A plain scenario.
    Scenario(Scenario),

    /// One row of a scenario outline.
    OutlineRow {
        /// The outline declaration.
        outline: Scenario,

        /// The examples table the row belongs to.
        table: ExamplesTable,

        /// The generating row.
        row: ExamplesRow,
    },
}

/// One executable scenario instance together with its owning [`Feature`].
///
/// The feature is shared: every test case generated from the same feature
/// file holds the same [`Arc`], so constructing many cases stays cheap.
#[derive(Clone, Debug)]
pub struct TestCase {
    feature: Arc<Feature>,
    source: CaseSource,
}

impl TestCase {
    /// Creates a new [`TestCase`] out of its owning feature and scenario
    /// origin.
    #[must_use]
    pub fn new(feature: Arc<Feature>, source: CaseSource) -> Self {
        Self { feature, source }
    }

    /// The owning [`Feature`].
    #[must_use]
    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// The scenario-level origin of this test case.
    #[must_use]
    pub fn source(&self) -> &CaseSource {
        &self.source
    }

    /// Describes this test case's full context to the given `visitor`,
    /// innermost element first, in the order documented on
    /// [`SourceVisitor`].
    pub fn describe_to<V: SourceVisitor + ?Sized>(&self, visitor: &mut V) {
        match &self.source {
            CaseSource::Scenario(scenario) => {
                visitor.visit_scenario(scenario);
            }
            CaseSource::OutlineRow { outline, table, row } => {
                visitor.visit_examples_row(row);
                visitor.visit_examples_table(table);
                visitor.visit_outline_row(outline);
            }
        }
        visitor.visit_feature(&self.feature);
        if let Some(background) = &self.feature.background {
            visitor.visit_background(background);
        }
    }
}
