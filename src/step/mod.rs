// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Executable test steps and their classification.
//!
//! A [`TestStep`] is one unit the execution engine runs: an ordinary Gherkin
//! step, a synthesized hook step inserted by the [`hook`] transforms, or an
//! engine-internal setup step. Its [`StepKind`] is fixed once, where the step
//! is created, so the report writer never classifies by comparing name
//! strings.
//!
//! [`hook`]: crate::hook

pub mod location;

use std::str::FromStr;

use derive_more::with_trait::Display;

use crate::{
    error::ReportError,
    hook::HookAction,
    source::DocString,
};

pub use self::location::Location;

/// Type of a hook executed around a test case or after each of its steps.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum HookType {
    /// Executing on each test case before running all its steps.
    #[display("Before hook")]
    Before,

    /// Executing on each test case after running all its steps.
    #[display("After hook")]
    After,

    /// Executing after every single executed step, hook steps included.
    #[display("AfterStep hook")]
    AfterStep,
}

impl HookType {
    /// Parses the conventional hook step name (`Before hook`, `After hook`,
    /// `AfterStep hook`) back into its [`HookType`].
    ///
    /// This is the bridge for engines delivering name-tagged hook steps. Any
    /// other name is a programming-contract violation.
    ///
    /// # Errors
    ///
    /// [`ReportError::UnknownHook`] for a name that is not one of the three
    /// conventional hook step names.
    pub fn from_name(name: &str) -> Result<Self, ReportError> {
        match name {
            "Before hook" => Ok(Self::Before),
            "After hook" => Ok(Self::After),
            "AfterStep hook" => Ok(Self::AfterStep),
            other => Err(ReportError::UnknownHook(other.to_owned())),
        }
    }
}

impl FromStr for HookType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Kind of a [`TestStep`], assigned at classification time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepKind {
    /// An ordinary Gherkin step.
    Regular,

    /// A synthesized hook step.
    Hook(HookType),

    /// Engine-internal world preparation. Never appears in the report.
    InternalSetup,
}

/// One link of a [`TestStep`]'s source chain: a descriptive context element
/// exposing just what the report needs.
#[derive(Clone, Debug)]
pub struct StepSource {
    /// Keyword of the element, verbatim from the source model.
    pub keyword: String,

    /// Name of the element.
    pub name: String,

    /// Declared location of the element.
    pub location: Location,

    /// Multiline doc-string argument, for doc-string-bearing steps.
    pub doc_string: Option<DocString>,
}

impl StepSource {
    /// Creates a new [`StepSource`] without a doc-string.
    #[must_use]
    pub fn new(
        keyword: impl Into<String>,
        name: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            location,
            doc_string: None,
        }
    }

    /// Attaches a doc-string argument.
    #[must_use]
    pub fn with_doc_string(mut self, doc_string: DocString) -> Self {
        self.doc_string = Some(doc_string);
        self
    }
}

/// One executable unit handed to the execution engine.
///
/// Carries an ordered source chain from innermost (the step itself) to
/// outermost (the feature). The chain is never empty: the innermost entry is
/// the step's own source and supplies its declared location.
#[derive(Clone, Debug)]
pub struct TestStep {
    kind: StepKind,
    chain: Vec<StepSource>,
    action: Option<HookAction>,
}

impl TestStep {
    /// Creates an ordinary step out of its source `chain`, ordered innermost
    /// to outermost.
    ///
    /// The chain must be non-empty; real steps delivered by an engine carry
    /// at least `[step, element, feature]`.
    #[must_use]
    pub fn new(chain: Vec<StepSource>) -> Self {
        debug_assert!(!chain.is_empty(), "source chain must be non-empty");
        Self { kind: StepKind::Regular, chain, action: None }
    }

    /// Creates a synthesized hook step bound to the registration `location`,
    /// deferring `action` for the engine to run.
    #[must_use]
    pub fn hook(kind: HookType, location: Location, action: HookAction) -> Self {
        let own = StepSource::new(String::new(), kind.to_string(), location);
        Self {
            kind: StepKind::Hook(kind),
            chain: vec![own],
            action: Some(action),
        }
    }

    /// Creates an engine-internal world-preparation step. It executes like
    /// any other step but is invisible to the report.
    #[must_use]
    pub fn internal_setup(location: Location) -> Self {
        let own = StepSource::new(String::new(), String::new(), location);
        Self { kind: StepKind::InternalSetup, chain: vec![own], action: None }
    }

    /// Extends this step's chain with its subject's ancestry. Used for
    /// after-step hooks, whose context is the step they follow.
    #[must_use]
    pub(crate) fn with_ancestry(
        mut self,
        ancestry: impl IntoIterator<Item = StepSource>,
    ) -> Self {
        self.chain.extend(ancestry);
        self
    }

    /// This step's [`StepKind`].
    #[must_use]
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// The full source chain, innermost first.
    #[must_use]
    pub fn source(&self) -> &[StepSource] {
        &self.chain
    }

    /// The innermost chain entry: the step's own source.
    #[must_use]
    pub fn own_source(&self) -> &StepSource {
        self.chain.first().expect("source chain is never empty")
    }

    /// The deferred hook action, for synthesized hook steps.
    #[must_use]
    pub fn action(&self) -> Option<&HookAction> {
        self.action.as_ref()
    }
}

/// Resolution of step names against registered step definitions.
///
/// The execution engine owns the actual matching; the report only needs the
/// matched definition's location, or [`None`] for an undefined step.
pub trait Matcher {
    /// Returns the location of the step definition matching `name`, or
    /// [`None`] when no definition matches.
    fn step_match(&self, name: &str) -> Option<Location>;
}

impl<F: Fn(&str) -> Option<Location>> Matcher for F {
    fn step_match(&self, name: &str) -> Option<Location> {
        self(name)
    }
}

/// Treats every step as undefined.
impl Matcher for () {
    fn step_match(&self, _: &str) -> Option<Location> {
        None
    }
}
