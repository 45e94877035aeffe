// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Basic serializable report nodes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use itertools::Itertools as _;
use serde::Serialize;

use crate::{
    event::{Attachment, Content, Status, StepResult},
    source,
    step::{Location, StepSource},
};

/// A feature or scenario tag.
#[derive(Clone, Debug, Serialize)]
pub struct Tag {
    /// Tag name, including the leading `@`.
    pub(crate) name: String,

    /// Line number of the tag.
    pub(crate) line: u32,
}

impl From<&source::Tag> for Tag {
    fn from(tag: &source::Tag) -> Self {
        Self { name: tag.name.clone(), line: tag.location.line }
    }
}

/// Multiline doc-string argument of a step.
#[derive(Clone, Debug, Serialize)]
pub struct DocString {
    /// The text content.
    pub(crate) value: String,

    /// Declared content type.
    pub(crate) content_type: String,

    /// Line of the opening delimiter.
    pub(crate) line: u32,
}

impl From<&source::DocString> for DocString {
    fn from(doc: &source::DocString) -> Self {
        Self {
            value: doc.content.clone(),
            content_type: doc.content_type.clone(),
            line: doc.location.line,
        }
    }
}

/// Location of the step definition (or hook registration) a step resolved to.
#[derive(Clone, Debug, Serialize)]
pub struct Match {
    /// `path:line` of the matched definition.
    pub(crate) location: String,
}

impl Match {
    /// Creates a [`Match`] out of a resolved [`Location`].
    pub(crate) fn new(location: &Location) -> Self {
        Self { location: location.to_string() }
    }
}

/// Outcome of running one step or hook.
#[derive(Clone, Debug, Serialize)]
pub struct RunResult {
    /// Execution [`Status`].
    pub(crate) status: Status,

    /// Failure details, present only for failed or pending results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error_message: Option<String>,

    /// Execution time in nanoseconds, present only when measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duration_ns: Option<u128>,
}

impl RunResult {
    /// Builds the serializable result out of an engine-reported
    /// [`StepResult`].
    pub(crate) fn new(result: &StepResult) -> Self {
        Self {
            status: result.status(),
            error_message: error_message(result),
            duration_ns: result.duration().map(|d| d.as_nanos()),
        }
    }
}

/// Formats the `error_message` value: `"<message> (<kind>)"` followed by the
/// backtrace, newline-joined.
fn error_message(result: &StepResult) -> Option<String> {
    if !matches!(result.status(), Status::Failed | Status::Pending) {
        return None;
    }
    let err = result.error()?;
    let kind = err.kind.as_deref().unwrap_or(result_kind(result.status()));
    Some(
        std::iter::once(format!("{} ({kind})", err.message))
            .chain(err.backtrace.iter().cloned())
            .join("\n"),
    )
}

/// Name of the result kind itself, used when a pending result carries no
/// exception.
fn result_kind(status: Status) -> &'static str {
    match status {
        Status::Passed => "Passed",
        Status::Failed => "Failed",
        Status::Undefined => "Undefined",
        Status::Pending => "Pending",
        Status::Skipped => "Skipped",
    }
}

/// An embedded attachment.
#[derive(Clone, Debug, Serialize)]
pub struct Embedding {
    /// Stored MIME type, with any `;base64` marker stripped.
    pub(crate) mime_type: String,

    /// Base64 payload.
    pub(crate) data: String,
}

impl Embedding {
    /// Encodes an [`Attachment`] for storage.
    ///
    /// Binary content is base64-encoded without embedded newlines. Text
    /// content whose MIME type carries a `;base64` suffix is stored verbatim
    /// with the suffix stripped; other text is encoded like binary.
    pub(crate) fn encode(attachment: &Attachment) -> Self {
        match &attachment.content {
            Content::Binary(bytes) => Self {
                mime_type: attachment.mime_type.clone(),
                data: STANDARD.encode(bytes),
            },
            Content::Text(text) => {
                if let Some(mime_type) =
                    attachment.mime_type.strip_suffix(";base64")
                {
                    Self { mime_type: mime_type.to_owned(), data: text.clone() }
                } else {
                    Self {
                        mime_type: attachment.mime_type.clone(),
                        data: STANDARD.encode(text),
                    }
                }
            }
        }
    }
}

/// One executed step of an element.
#[derive(Clone, Debug, Serialize)]
pub struct Step {
    /// Step keyword, verbatim from the source model.
    pub(crate) keyword: String,

    /// Step name.
    pub(crate) name: String,

    /// Line of the step inside its feature file.
    pub(crate) line: u32,

    /// Doc-string argument, only for doc-string-bearing steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) doc_string: Option<DocString>,

    /// Matched definition location. Absent until the step finishes.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub(crate) r#match: Option<Match>,

    /// Run result. Absent until the step finishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<RunResult>,

    /// After-step hook entries scoped to this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) after: Vec<HookResult>,

    /// Output lines captured while this step ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) output: Vec<String>,

    /// Attachments captured while this step ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) embeddings: Vec<Embedding>,
}

impl Step {
    /// Creates a new [`Step`] node out of the step's own source entry.
    pub(crate) fn new(source: &StepSource) -> Self {
        Self {
            keyword: source.keyword.clone(),
            name: source.name.clone(),
            line: source.location.line,
            doc_string: source.doc_string.as_ref().map(Into::into),
            r#match: None,
            result: None,
            after: Vec::new(),
            output: Vec::new(),
            embeddings: Vec::new(),
        }
    }
}

/// One executed hook of an element or step.
///
/// Structurally a [`Step`] without keyword, name and line: hooks have no
/// feature-file presence, only a registration location surfacing through
/// [`Match`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct HookResult {
    /// Registration location of the hook. Absent until the hook finishes.
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub(crate) r#match: Option<Match>,

    /// Run result. Absent until the hook finishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<RunResult>,

    /// Output lines captured while this hook ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) output: Vec<String>,

    /// Attachments captured while this hook ran.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) embeddings: Vec<Embedding>,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::event::ExecutionError;

    #[test]
    fn error_message_joins_kind_and_backtrace() {
        let result =
            StepResult::new(Status::Failed).with_error(ExecutionError {
                message: "boom".into(),
                kind: Some("RuntimeFailure".into()),
                backtrace: vec!["l1".into(), "l2".into()],
            });
        assert_eq!(
            error_message(&result).unwrap(),
            "boom (RuntimeFailure)\nl1\nl2",
        );
    }

    #[test]
    fn pending_without_exception_uses_the_result_kind() {
        let result =
            StepResult::new(Status::Pending).with_error(ExecutionError {
                message: "TODO".into(),
                kind: None,
                backtrace: vec![],
            });
        assert_eq!(error_message(&result).unwrap(), "TODO (Pending)");
    }

    #[test]
    fn passed_results_carry_no_error_message() {
        let result = StepResult::new(Status::Passed);
        assert_eq!(error_message(&result), None);
    }

    #[test]
    fn durations_serialize_as_nanoseconds() {
        let node = RunResult::new(
            &StepResult::new(Status::Passed)
                .with_duration(Duration::from_millis(1)),
        );
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"status": "passed", "duration_ns": 1_000_000}),
        );
    }

    #[test]
    fn unmeasured_durations_are_omitted() {
        let node = RunResult::new(&StepResult::new(Status::Skipped));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"status": "skipped"}),
        );
    }

    #[test]
    fn binary_attachments_are_encoded() {
        let embedding = Embedding::encode(&Attachment::binary(
            b"PNG".to_vec(),
            "image/png",
        ));
        assert_eq!(embedding.mime_type, "image/png");
        assert_eq!(embedding.data, "UE5H");
    }

    #[test]
    fn pre_encoded_text_passes_through_with_the_suffix_stripped() {
        let embedding =
            Embedding::encode(&Attachment::text("UE5H", "image/png;base64"));
        assert_eq!(embedding.mime_type, "image/png");
        assert_eq!(embedding.data, "UE5H");
    }

    #[test]
    fn plain_text_is_encoded() {
        let embedding =
            Embedding::encode(&Attachment::text("hello", "text/plain"));
        assert_eq!(embedding.mime_type, "text/plain");
        assert_eq!(embedding.data, "aGVsbG8=");
    }

    #[test]
    fn unfinished_steps_serialize_without_match_and_result() {
        let step = Step::new(&StepSource::new(
            "Given ",
            "a step",
            Location::new("features/a.feature", 3),
        ));
        assert_eq!(
            serde_json::to_value(&step).unwrap(),
            json!({"keyword": "Given ", "name": "a step", "line": 3}),
        );
    }
}
