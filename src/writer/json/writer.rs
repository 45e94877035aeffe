// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Incremental report tree building and document emission.

use std::io;

use tracing::{debug, trace};

use crate::{
    error::{ReportError, ReportResult},
    event::{Attachment, Status, StepResult, TestRun},
    source::TestCase,
    step::{HookType, Matcher, StepKind, TestStep},
};

use super::{
    builder::CaseBuilder,
    element::Element,
    feature::Feature,
    types::{Embedding, HookResult, Match, RunResult, Step},
};

/// Where the in-flight step or hook currently lives.
///
/// All report arrays grow at the tail only, so the current unit is always the
/// last entry of the array the cursor points at.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Cursor {
    /// No step or hook is in flight.
    #[default]
    Idle,

    /// The last step of the current element.
    Step,

    /// The last entry of the hook array selected by the [`HookType`]:
    /// `before`/`after` of the current element, or `after` of its last step.
    Hook(HookType),
}

/// Mutable view of the in-flight step or hook.
enum UnitMut<'a> {
    Step(&'a mut Step),
    Hook(&'a mut HookResult),
}

/// Positional state of one run's report tree.
///
/// One builder owns one report document for the lifetime of one run and must
/// see events for at most one in-flight test case at a time. Hosts executing
/// test cases in parallel feed each lane its own builder and merge the
/// resulting feature lists, keeping one feature's test cases contiguous:
/// feature dedup checks the *last* appended feature only, never a general
/// index.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    features: Vec<Feature>,
    /// Scenario element retained while its background element is current,
    /// appended once execution reaches the first scenario step.
    pending_scenario: Option<Element>,
    cursor: Cursor,
}

impl ReportBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a test case: dedupes the feature node against the previously
    /// current one and appends the element the next steps belong to.
    pub fn start_case(&mut self, case: &TestCase) {
        let candidates = CaseBuilder::build(case);
        let same_feature =
            self.features.last().is_some_and(|f| *f == *case.feature());
        if !same_feature {
            debug!(uri = %candidates.feature.uri, "opening feature node");
            self.features.push(candidates.feature);
        }
        let feature =
            self.features.last_mut().expect("a feature node was just ensured");
        if let Some(background) = candidates.background {
            feature.elements.push(background);
            self.pending_scenario = Some(candidates.scenario);
        } else {
            feature.elements.push(candidates.scenario);
            self.pending_scenario = None;
        }
        self.cursor = Cursor::Idle;
    }

    /// Opens a step: appends the node the following output, attachments and
    /// result attach to.
    ///
    /// # Errors
    ///
    /// [`ReportError::OutsideTestCase`] when no test case started;
    /// [`ReportError::DanglingStepHook`] for an after-step hook with no
    /// preceding step.
    pub fn start_step(&mut self, step: &TestStep) -> ReportResult<()> {
        match step.kind() {
            StepKind::InternalSetup => Ok(()),
            StepKind::Hook(kind) => self.start_hook(kind),
            StepKind::Regular => self.start_regular(step),
        }
    }

    fn start_hook(&mut self, kind: HookType) -> ReportResult<()> {
        let element = current_element_mut(&mut self.features)?;
        match kind {
            HookType::Before => element.before.push(HookResult::default()),
            HookType::After => element.after.push(HookResult::default()),
            HookType::AfterStep => element
                .steps
                .last_mut()
                .ok_or(ReportError::DanglingStepHook)?
                .after
                .push(HookResult::default()),
        }
        self.cursor = Cursor::Hook(kind);
        Ok(())
    }

    fn start_regular(&mut self, step: &TestStep) -> ReportResult<()> {
        // Execution has left a pending background once a step's parent
        // element carries a different *name* than the current element.
        // Elements sharing a name are indistinguishable here; preserved
        // behavior.
        let left_background = {
            let element = current_element(&self.features)?;
            step.source()
                .get(1)
                .is_some_and(|parent| parent.name != element.name)
        };
        if left_background {
            if let Some(scenario) = self.pending_scenario.take() {
                current_feature_mut(&mut self.features)?
                    .elements
                    .push(scenario);
            }
        }
        current_element_mut(&mut self.features)?
            .steps
            .push(Step::new(step.own_source()));
        self.cursor = Cursor::Step;
        Ok(())
    }

    /// Closes a step: attaches the matched definition location and the run
    /// result to the in-flight step or hook.
    ///
    /// Hooks and undefined steps resolve to their own declared location;
    /// everything else asks the `matcher`, falling back to the declared
    /// location when it reports nothing.
    ///
    /// # Errors
    ///
    /// [`ReportError::OutsideTestCase`] or [`ReportError::OutsideStep`] when
    /// the event stream delivers a result with nothing in flight.
    pub fn finish_step<M: Matcher + ?Sized>(
        &mut self,
        step: &TestStep,
        result: &StepResult,
        matcher: &M,
    ) -> ReportResult<()> {
        if step.kind() == StepKind::InternalSetup {
            return Ok(());
        }
        let own = step.own_source();
        let is_hook = matches!(step.kind(), StepKind::Hook(_));
        let location = if is_hook || result.status() == Status::Undefined {
            own.location.clone()
        } else {
            matcher
                .step_match(&own.name)
                .unwrap_or_else(|| own.location.clone())
        };
        let matched = Match::new(&location);
        let run = RunResult::new(result);
        match self.current_unit_mut()? {
            UnitMut::Step(node) => {
                node.r#match = Some(matched);
                node.result = Some(run);
            }
            UnitMut::Hook(node) => {
                node.r#match = Some(matched);
                node.result = Some(run);
            }
        }
        Ok(())
    }

    /// Appends a captured output line to the in-flight step or hook.
    ///
    /// # Errors
    ///
    /// [`ReportError::OutsideTestCase`] or [`ReportError::OutsideStep`] when
    /// nothing is in flight.
    pub fn append_output(
        &mut self,
        line: impl Into<String>,
    ) -> ReportResult<()> {
        let line = line.into();
        match self.current_unit_mut()? {
            UnitMut::Step(node) => node.output.push(line),
            UnitMut::Hook(node) => node.output.push(line),
        }
        Ok(())
    }

    /// Encodes and appends an attachment to the in-flight step or hook.
    ///
    /// # Errors
    ///
    /// [`ReportError::OutsideTestCase`] or [`ReportError::OutsideStep`] when
    /// nothing is in flight.
    pub fn append_embedding(
        &mut self,
        attachment: &Attachment,
    ) -> ReportResult<()> {
        let embedding = Embedding::encode(attachment);
        match self.current_unit_mut()? {
            UnitMut::Step(node) => node.embeddings.push(embedding),
            UnitMut::Hook(node) => node.embeddings.push(embedding),
        }
        Ok(())
    }

    /// The feature nodes collected so far, in encounter order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Consumes the builder, yielding the collected feature nodes for
    /// external merging or emission.
    #[must_use]
    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    fn current_unit_mut(&mut self) -> ReportResult<UnitMut<'_>> {
        let cursor = self.cursor;
        let element = current_element_mut(&mut self.features)?;
        match cursor {
            Cursor::Idle => Err(ReportError::OutsideStep),
            Cursor::Step => element
                .steps
                .last_mut()
                .map(UnitMut::Step)
                .ok_or(ReportError::OutsideStep),
            Cursor::Hook(HookType::Before) => element
                .before
                .last_mut()
                .map(UnitMut::Hook)
                .ok_or(ReportError::OutsideStep),
            Cursor::Hook(HookType::After) => element
                .after
                .last_mut()
                .map(UnitMut::Hook)
                .ok_or(ReportError::OutsideStep),
            Cursor::Hook(HookType::AfterStep) => element
                .steps
                .last_mut()
                .and_then(|s| s.after.last_mut())
                .map(UnitMut::Hook)
                .ok_or(ReportError::OutsideStep),
        }
    }
}

fn current_feature_mut(
    features: &mut Vec<Feature>,
) -> ReportResult<&mut Feature> {
    features.last_mut().ok_or(ReportError::OutsideTestCase)
}

fn current_element(features: &[Feature]) -> ReportResult<&Element> {
    features
        .last()
        .and_then(|f| f.elements.last())
        .ok_or(ReportError::OutsideTestCase)
}

fn current_element_mut(
    features: &mut [Feature],
) -> ReportResult<&mut Element> {
    features
        .last_mut()
        .and_then(|f| f.elements.last_mut())
        .ok_or(ReportError::OutsideTestCase)
}

/// [Cucumber JSON format][1] writer.
///
/// Consumes the [`TestRun`] event stream and, on [`TestRun::Finished`], emits
/// the collected feature nodes as a pretty-printed JSON array into the given
/// [`io::Write`] implementor.
///
/// [1]: https://github.com/cucumber/cucumber-json-schema
#[derive(Debug)]
pub struct Json<Out: io::Write, M = ()> {
    output: Out,
    matcher: M,
    builder: ReportBuilder,
}

impl<Out: io::Write> Json<Out> {
    /// Creates a new [`Json`] writer emitting into `output`, treating every
    /// step as undefined for match resolution.
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self::with_matcher(output, ())
    }
}

impl<Out: io::Write, M: Matcher> Json<Out, M> {
    /// Creates a new [`Json`] writer emitting into `output`, resolving step
    /// definition locations through `matcher`.
    #[must_use]
    pub fn with_matcher(output: Out, matcher: M) -> Self {
        Self { output, matcher, builder: ReportBuilder::new() }
    }

    /// Handles one [`TestRun`] event.
    ///
    /// # Errors
    ///
    /// [`ReportError`] on event-stream contract violations and, for
    /// [`TestRun::Finished`], on emission failures.
    pub fn handle_event(&mut self, event: TestRun) -> ReportResult<()> {
        trace!(?event, "handling event");
        match event {
            TestRun::CaseStarted(case) => {
                self.builder.start_case(&case);
                Ok(())
            }
            TestRun::StepStarted(step) => self.builder.start_step(&step),
            TestRun::StepFinished(step, result) => {
                self.builder.finish_step(&step, &result, &self.matcher)
            }
            TestRun::Output(line) => self.builder.append_output(line),
            TestRun::Embedding(attachment) => {
                self.builder.append_embedding(&attachment)
            }
            TestRun::Finished => self.finish(),
        }
    }

    /// The builder assembling the document.
    #[must_use]
    pub fn builder(&self) -> &ReportBuilder {
        &self.builder
    }

    /// Returns the underlying output, dropping the writer.
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.output
    }

    fn finish(&mut self) -> ReportResult<()> {
        serde_json::to_writer_pretty(
            &mut self.output,
            self.builder.features(),
        )?;
        self.output.flush()?;
        Ok(())
    }
}
