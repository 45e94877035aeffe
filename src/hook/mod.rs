// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Hook registrations and the transforms weaving them into a step sequence.
//!
//! Before a test case executes, its step list is rewritten so that hook steps
//! run interleaved with the real ones: [`BeforeHooks`] prepends, [`AfterHooks`]
//! appends in reverse registration order, and [`StepHooks`] trails every
//! executed step. All three are pure: they build a fresh list and never touch
//! their input.

use std::{fmt, sync::Arc};

use crate::step::{HookType, Location, TestStep};

/// Deferred body of a registered hook.
///
/// Opaque to this crate: the execution engine is the only caller.
#[derive(Clone)]
pub struct HookAction(Arc<dyn Fn()>);

impl HookAction {
    /// Wraps a hook body for later execution.
    #[must_use]
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self(Arc::new(action))
    }

    /// Runs the hook body. Exposed for the execution engine.
    pub fn run(&self) {
        (self.0)();
    }
}

impl fmt::Debug for HookAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HookAction").finish()
    }
}

/// A registered lifecycle hook: an opaque executable bound to the source
/// location it was registered at.
#[derive(Clone, Debug)]
pub struct Registration {
    /// Location the hook was registered at.
    pub location: Location,

    /// The deferred hook body.
    pub action: HookAction,
}

impl Registration {
    /// Creates a new [`Registration`].
    #[must_use]
    pub fn new(location: Location, action: HookAction) -> Self {
        Self { location, action }
    }

    fn as_step(&self, kind: HookType) -> TestStep {
        TestStep::hook(kind, self.location.clone(), self.action.clone())
    }
}

/// Prepends registered before-hooks to a test case's steps.
#[derive(Clone, Debug, Default)]
pub struct BeforeHooks {
    hooks: Vec<Registration>,
}

impl BeforeHooks {
    /// Creates the transform out of `hooks` in registration order.
    #[must_use]
    pub fn new(hooks: Vec<Registration>) -> Self {
        Self { hooks }
    }

    /// Returns `steps` with one hook step per registration prepended, in
    /// registration order.
    #[must_use]
    pub fn apply_to(&self, steps: &[TestStep]) -> Vec<TestStep> {
        self.hooks
            .iter()
            .map(|h| h.as_step(HookType::Before))
            .chain(steps.iter().cloned())
            .collect()
    }
}

/// Appends registered after-hooks to a test case's steps.
#[derive(Clone, Debug, Default)]
pub struct AfterHooks {
    hooks: Vec<Registration>,
}

impl AfterHooks {
    /// Creates the transform out of `hooks` in registration order.
    #[must_use]
    pub fn new(hooks: Vec<Registration>) -> Self {
        Self { hooks }
    }

    /// Returns `steps` with one hook step per registration appended, in
    /// *reverse* registration order: hooks registered first run last during
    /// teardown, mirroring resource-acquisition ordering.
    #[must_use]
    pub fn apply_to(&self, steps: &[TestStep]) -> Vec<TestStep> {
        steps
            .iter()
            .cloned()
            .chain(self.hooks.iter().rev().map(|h| h.as_step(HookType::After)))
            .collect()
    }
}

/// Trails every executed step with registered after-step hooks.
#[derive(Clone, Debug, Default)]
pub struct StepHooks {
    hooks: Vec<Registration>,
}

impl StepHooks {
    /// Creates the transform out of `hooks` in registration order.
    #[must_use]
    pub fn new(hooks: Vec<Registration>) -> Self {
        Self { hooks }
    }

    /// Flat-maps every step of `steps` to itself followed by one hook step
    /// per registration, in registration order. Applied to an already
    /// before/after-wrapped list, the synthesized hook steps receive their
    /// own trailing after-step hooks too.
    #[must_use]
    pub fn apply_to(&self, steps: &[TestStep]) -> Vec<TestStep> {
        steps
            .iter()
            .flat_map(|step| {
                let trailing = self.hooks.iter().map(|h| {
                    h.as_step(HookType::AfterStep)
                        .with_ancestry(step.source().iter().cloned())
                });
                std::iter::once(step.clone()).chain(trailing)
            })
            .collect()
    }
}

/// The full set of hook registrations applying to a run.
#[derive(Clone, Debug, Default)]
pub struct Hooks {
    /// Before-hook registrations.
    pub before: BeforeHooks,

    /// After-hook registrations.
    pub after: AfterHooks,

    /// After-step-hook registrations.
    pub step: StepHooks,
}

impl Hooks {
    /// Creates the composed transform out of the three registration lists.
    #[must_use]
    pub fn new(
        before: Vec<Registration>,
        after: Vec<Registration>,
        step: Vec<Registration>,
    ) -> Self {
        Self {
            before: BeforeHooks::new(before),
            after: AfterHooks::new(after),
            step: StepHooks::new(step),
        }
    }

    /// Rewrites a test case's step list into the sequence actually executed.
    ///
    /// Before- and after-hooks wrap the list first; step-hooks then flat-map
    /// over the already-wrapped list.
    #[must_use]
    pub fn apply_to(&self, steps: &[TestStep]) -> Vec<TestStep> {
        self.step
            .apply_to(&self.after.apply_to(&self.before.apply_to(steps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{StepKind, StepSource};

    fn registration(path: &str) -> Registration {
        Registration::new(
            Location::new(path, 1),
            HookAction::new(|| {}),
        )
    }

    fn step(name: &str) -> TestStep {
        TestStep::new(vec![StepSource::new(
            "Given ",
            name,
            Location::new("features/hooks.feature", 3),
        )])
    }

    fn names(steps: &[TestStep]) -> Vec<String> {
        steps.iter().map(|s| s.own_source().name.clone()).collect()
    }

    fn locations(steps: &[TestStep]) -> Vec<String> {
        steps
            .iter()
            .map(|s| s.own_source().location.path().to_owned())
            .collect()
    }

    #[test]
    fn before_hooks_prepend_in_registration_order() {
        let transform =
            BeforeHooks::new(vec![registration("a.rs"), registration("b.rs")]);
        let rewritten = transform.apply_to(&[step("one")]);
        assert_eq!(locations(&rewritten)[..2], ["a.rs", "b.rs"]);
        assert_eq!(names(&rewritten)[2], "one");
    }

    #[test]
    fn after_hooks_append_reversed() {
        let transform =
            AfterHooks::new(vec![registration("a.rs"), registration("b.rs")]);
        let rewritten = transform.apply_to(&[step("one")]);
        assert_eq!(names(&rewritten)[0], "one");
        assert_eq!(locations(&rewritten)[1..], ["b.rs", "a.rs"]);
    }

    #[test]
    fn step_hooks_trail_every_step() {
        let transform = StepHooks::new(vec![registration("h.rs")]);
        let rewritten = transform.apply_to(&[step("one"), step("two")]);
        assert_eq!(
            names(&rewritten),
            ["one", "AfterStep hook", "two", "AfterStep hook"],
        );
        // The trailing hook carries its subject step's ancestry.
        assert_eq!(rewritten[1].source()[1].name, "one");
    }

    #[test]
    fn empty_step_hooks_leave_an_already_transformed_list_unchanged() {
        let transformed = StepHooks::new(vec![registration("h.rs")])
            .apply_to(&[step("one"), step("two")]);
        let again = StepHooks::new(vec![]).apply_to(&transformed);
        assert_eq!(names(&again), names(&transformed));
        assert_eq!(again.len(), transformed.len());
    }

    #[test]
    fn composition_wraps_before_flat_mapping() {
        let hooks = Hooks::new(
            vec![registration("before.rs")],
            vec![registration("after.rs")],
            vec![registration("step.rs")],
        );
        let rewritten = hooks.apply_to(&[step("one")]);
        assert_eq!(
            names(&rewritten),
            [
                "Before hook",
                "AfterStep hook",
                "one",
                "AfterStep hook",
                "After hook",
                "AfterStep hook",
            ],
        );
        assert_eq!(rewritten[0].kind(), StepKind::Hook(HookType::Before));
        assert_eq!(rewritten[4].kind(), StepKind::Hook(HookType::After));
    }

    #[test]
    fn transforms_do_not_touch_their_input() {
        let input = vec![step("one")];
        let hooks = Hooks::new(vec![registration("b.rs")], vec![], vec![]);
        let _ = hooks.apply_to(&input);
        assert_eq!(names(&input), ["one"]);
    }
}
