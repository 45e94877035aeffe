// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reporting and step-orchestration layer for BDD test runs.
//!
//! Two pieces make up this crate:
//!
//! 1. An incremental [Cucumber JSON format][1] report builder: the
//!    [`writer::Json`] writer consumes the [`event::TestRun`] stream an
//!    execution engine emits while test cases run and grows one nested,
//!    ordered document out of it, emitted once at the end of the run.
//! 2. The [`hook`] ordering transforms: before a test case executes, its
//!    step list is rewritten so registered hooks run at well-defined
//!    positions, and the report builder tells those hook steps apart from
//!    real ones.
//!
//! Everything here is synchronous and single-threaded: the engine delivers
//! one event at a time for at most one in-flight test case. The source model
//! and the step execution itself stay behind the narrow [`source`] and
//! [`step::Matcher`] interfaces.
//!
//! [1]: https://github.com/cucumber/cucumber-json-schema

#![deny(rustdoc::broken_intra_doc_links, rustdoc::private_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod hook;
pub mod source;
pub mod step;
pub mod writer;

pub use self::{
    error::{ReportError, ReportResult},
    event::{Attachment, Content, Status, StepResult, TestRun},
    hook::{HookAction, Hooks, Registration},
    source::{CaseSource, SourceVisitor, TestCase},
    step::{HookType, Location, Matcher, StepKind, StepSource, TestStep},
    writer::{Json, ReportBuilder},
};
