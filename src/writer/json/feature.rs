// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Feature report nodes.

use serde::Serialize;

use crate::source;

use super::{
    element::Element,
    id,
    types::Tag,
};

/// One feature of the report document.
///
/// Created by the first test case belonging to the feature, then mutated by
/// every later case sharing it, and retained until the document is emitted.
#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    /// Path of the feature file.
    pub(crate) uri: String,

    /// Identifier slug of the feature name.
    pub(crate) id: String,

    /// Feature keyword, verbatim from the source model.
    pub(crate) keyword: String,

    /// Feature name.
    pub(crate) name: String,

    /// Free-form description block.
    pub(crate) description: String,

    /// Line of the feature declaration.
    pub(crate) line: u32,

    /// Tags attached to the feature.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) tags: Vec<Tag>,

    /// Element occurrences, in encounter order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) elements: Vec<Element>,
}

impl Feature {
    /// Creates a new [`Feature`] node out of its source declaration.
    pub(crate) fn new(feature: &source::Feature) -> Self {
        Self {
            uri: feature.uri.clone(),
            id: id::slug(&feature.name),
            keyword: feature.keyword.clone(),
            name: feature.name.clone(),
            description: feature.description.clone(),
            line: feature.location.line,
            tags: feature.tags.iter().map(Into::into).collect(),
            elements: Vec::new(),
        }
    }

    /// The feature's identifier slug.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The element occurrences collected so far.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

// Feature identity is (uri, line): the same pair seen again means "same
// feature, next scenario", never a new node.
impl PartialEq<source::Feature> for Feature {
    fn eq(&self, feature: &source::Feature) -> bool {
        self.uri == feature.uri && self.line == feature.location.line
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::step::Location;

    fn source_feature(name: &str, line: u32) -> source::Feature {
        source::Feature {
            uri: "features/my.feature".into(),
            keyword: "Feature".into(),
            name: name.into(),
            description: "about things".into(),
            location: Location::new("features/my.feature", line),
            tags: vec![],
            background: None,
        }
    }

    #[test]
    fn identity_is_uri_and_line() {
        let node = Feature::new(&source_feature("My Feature", 1));
        assert!(node == source_feature("Renamed", 1));
        assert!(node != source_feature("My Feature", 9));
    }

    #[test]
    fn id_is_the_name_slug() {
        let node = Feature::new(&source_feature("My Feature", 1));
        assert_eq!(node.id(), "my-feature");
    }

    #[test]
    fn empty_features_serialize_without_elements() {
        let node = Feature::new(&source_feature("My Feature", 1));
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "uri": "features/my.feature",
                "id": "my-feature",
                "keyword": "Feature",
                "name": "My Feature",
                "description": "about things",
                "line": 1,
            }),
        );
    }
}
