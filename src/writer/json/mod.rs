// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [Cucumber JSON format][1] report writer.
//!
//! Organized into focused modules:
//!
//! - [`id`]: stable human-readable identifiers
//! - [`types`]: basic serializable report nodes
//! - [`element`]: element (scenario/background) nodes
//! - [`feature`]: feature nodes
//! - [`builder`]: per-test-case source-chain assembly
//! - [`writer`]: the incremental tree builder and document emitter
//!
//! [1]: https://github.com/cucumber/cucumber-json-schema

pub mod builder;
pub mod element;
pub mod feature;
pub mod id;
pub mod types;
pub mod writer;

pub use self::{
    element::Element,
    feature::Feature,
    types::{DocString, Embedding, HookResult, Match, RunResult, Step, Tag},
    writer::{Json, ReportBuilder},
};
