// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in the lifecycle of a test run.
//!
//! The execution engine delivers one [`TestRun`] event at a time, strictly
//! sequentially, for at most one in-flight test case. The report writer
//! consumes them via [`Json::handle_event()`].
//!
//! [`Json::handle_event()`]: crate::writer::Json::handle_event

use std::time::Duration;

use serde::Serialize;

use crate::{source::TestCase, step::TestStep};

/// Top-level lifecycle event of a single test run.
#[derive(Clone, Debug)]
pub enum TestRun {
    /// A test case began executing.
    CaseStarted(TestCase),

    /// A step (real, hook, or internal) began executing.
    StepStarted(TestStep),

    /// A step finished with the given result.
    StepFinished(TestStep, StepResult),

    /// The in-flight step or hook captured a line of output.
    Output(String),

    /// The in-flight step or hook captured an attachment.
    Embedding(Attachment),

    /// The whole run finished; the document is to be emitted.
    Finished,
}

/// Execution status of a step or hook.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The step matched a definition and it succeeded.
    Passed,

    /// The step matched a definition and it failed.
    Failed,

    /// No step definition matched.
    Undefined,

    /// The matched definition declared itself pending.
    Pending,

    /// The step was skipped due to an earlier failure.
    Skipped,
}

/// Failure details carried by a failed or pending [`StepResult`].
#[derive(Clone, Debug)]
pub struct ExecutionError {
    /// Failure message text.
    pub message: String,

    /// Type name of the thrown failure. Absent for pending results raised
    /// without an exception.
    pub kind: Option<String>,

    /// Captured backtrace lines, outermost frame first.
    pub backtrace: Vec<String>,
}

/// Result of executing one step or hook, as reported by the engine.
#[derive(Clone, Debug)]
pub struct StepResult {
    status: Status,
    error: Option<ExecutionError>,
    duration: Option<Duration>,
}

impl StepResult {
    /// Creates a bare result with the given `status`.
    #[must_use]
    pub fn new(status: Status) -> Self {
        Self { status, error: None, duration: None }
    }

    /// Attaches failure details.
    #[must_use]
    pub fn with_error(mut self, error: ExecutionError) -> Self {
        self.error = Some(error);
        self
    }

    /// Attaches a measured execution duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Execution status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Failure details, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    /// Measured duration, if the engine took one.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

/// Body of an attachment captured during a step or hook.
#[derive(Clone, Debug)]
pub enum Content {
    /// Raw bytes, to be base64-encoded into the report.
    Binary(Vec<u8>),

    /// Text, possibly pre-encoded (see [`Attachment::mime_type`]).
    Text(String),
}

/// An attachment captured during a step or hook.
#[derive(Clone, Debug)]
pub struct Attachment {
    /// Attachment body.
    pub content: Content,

    /// Declared MIME type. A `;base64` suffix marks [`Content::Text`] that is
    /// already encoded; the suffix is stripped from the stored type.
    pub mime_type: String,

    /// Display label. Accepted for interface compatibility, ignored by the
    /// JSON report.
    pub label: Option<String>,
}

impl Attachment {
    /// Creates an attachment out of raw bytes.
    #[must_use]
    pub fn binary(content: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            content: Content::Binary(content),
            mime_type: mime_type.into(),
            label: None,
        }
    }

    /// Creates an attachment out of text.
    #[must_use]
    pub fn text(
        content: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            content: Content::Text(content.into()),
            mime_type: mime_type.into(),
            label: None,
        }
    }

    /// Attaches a display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
