// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consolidated error handling types for report assembly and emission.

use std::io;

use derive_more::with_trait::{Display, Error, From};

/// Convenience [`Result`] alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Top-level error type for assembling or emitting a report.
///
/// Everything here is a programming-contract violation of the event stream or
/// an emission failure. Failed or pending steps are *not* errors: they are
/// recorded inside the document itself.
#[derive(Debug, Display, Error, From)]
pub enum ReportError {
    /// A hook step carried a name that is not a known hook kind.
    ///
    /// Raised by [`HookType::from_name`] when bridging a name-tagged event
    /// stream.
    ///
    /// [`HookType::from_name`]: crate::step::HookType::from_name
    #[display("unknown hook type: {_0}")]
    #[from(ignore)]
    UnknownHook(#[error(not(source))] String),

    /// A step, output or attachment event arrived before any test case
    /// started.
    #[display("event arrived before any test case started")]
    OutsideTestCase,

    /// An output, attachment or result event arrived with no step or hook in
    /// flight.
    #[display("no step or hook is currently executing")]
    OutsideStep,

    /// An after-step hook started before any real step of the test case ran.
    #[display("an after-step hook requires a preceding step")]
    DanglingStepHook,

    /// Failed writing the serialized document.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Failed serializing the document.
    #[display("failed to serialize report: {_0}")]
    Json(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_unknown_hook_name() {
        let err = ReportError::UnknownHook("Around hook".into());
        assert_eq!(err.to_string(), "unknown hook type: Around hook");
    }

    #[test]
    fn converts_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let err = ReportError::from(io_err);
        assert!(matches!(err, ReportError::Io(_)));
    }
}
