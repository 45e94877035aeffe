// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element (scenario or background) report nodes.

use serde::Serialize;

use crate::source::{Background, ExamplesRow, Scenario};

use super::{
    id,
    types::{HookResult, Step, Tag},
};

/// A scenario or background occurrence inside a feature node.
///
/// Backgrounds recur: a feature guarding two scenarios with one background
/// emits two distinct background elements, each populated independently.
#[derive(Clone, Debug, Serialize)]
pub struct Element {
    /// Hierarchical identifier. Absent for backgrounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<String>,

    /// Element keyword, verbatim from the source model.
    pub(crate) keyword: String,

    /// Element name.
    pub(crate) name: String,

    /// Free-form description block.
    pub(crate) description: String,

    /// Line of the element declaration; for outline-generated scenarios, the
    /// line of the generating examples row.
    pub(crate) line: u32,

    /// `"scenario"` or `"background"`.
    pub(crate) r#type: &'static str,

    /// Tags attached to the scenario. Backgrounds carry none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<Tag>,

    /// Before-hook entries of this element.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) before: Vec<HookResult>,

    /// After-hook entries of this element.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) after: Vec<HookResult>,

    /// Steps executed under this element, in execution order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) steps: Vec<Step>,
}

impl Element {
    /// Creates a scenario element out of a plain [`Scenario`].
    pub(crate) fn scenario(scenario: &Scenario) -> Self {
        Self {
            id: Some(id::slug(&scenario.name)),
            keyword: scenario.keyword.clone(),
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            line: scenario.location.line,
            r#type: "scenario",
            tags: scenario.tags.iter().map(Into::into).collect(),
            before: Vec::new(),
            after: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Creates a scenario element out of one outline row: identified by the
    /// outline slug plus the example id, located at the generating row.
    pub(crate) fn outline_row(
        outline: &Scenario,
        example_id: &str,
        row: &ExamplesRow,
    ) -> Self {
        Self {
            id: Some(id::compose(&[&id::slug(&outline.name), example_id])),
            keyword: outline.keyword.clone(),
            name: outline.name.clone(),
            description: outline.description.clone(),
            line: row.location.line,
            r#type: "scenario",
            tags: outline.tags.iter().map(Into::into).collect(),
            before: Vec::new(),
            after: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Creates a background element.
    pub(crate) fn background(background: &Background) -> Self {
        Self {
            id: None,
            keyword: background.keyword.clone(),
            name: background.name.clone(),
            description: background.description.clone(),
            line: background.location.line,
            r#type: "background",
            tags: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Prepends the owning feature's identifier onto this element's own.
    pub(crate) fn prepend_id(&mut self, feature_id: &str) {
        if let Some(own) = &self.id {
            self.id = Some(id::compose(&[feature_id, own]));
        }
    }
}
