use std::{fs, io::Read as _, sync::Arc, time::Duration};

use bdd_report::{
    event::{ExecutionError, Status, StepResult, TestRun},
    hook::{HookAction, Hooks, Registration},
    source::{
        Background, CaseSource, DocString, ExamplesRow, ExamplesTable,
        Feature, Scenario, Tag, TestCase,
    },
    step::{HookType, Location, StepKind, StepSource, TestStep},
    writer::Json,
    Attachment,
};
use serde_json::json;
use tempfile::NamedTempFile;

const MY_URI: &str = "features/my.feature";
const OUTLINE_URI: &str = "features/outline.feature";

fn my_feature() -> Arc<Feature> {
    Arc::new(Feature {
        uri: MY_URI.into(),
        keyword: "Feature".into(),
        name: "My Feature".into(),
        description: "Reporting exercises.".into(),
        location: Location::new(MY_URI, 1),
        tags: vec![Tag {
            name: "@smoke".into(),
            location: Location::new(MY_URI, 1),
        }],
        background: Some(Background {
            keyword: "Background".into(),
            name: "Setup".into(),
            description: String::new(),
            location: Location::new(MY_URI, 2),
        }),
    })
}

fn scenario_case(feature: &Arc<Feature>, name: &str, line: u32) -> TestCase {
    TestCase::new(
        Arc::clone(feature),
        CaseSource::Scenario(Scenario {
            keyword: "Scenario".into(),
            name: name.into(),
            description: String::new(),
            location: Location::new(MY_URI, line),
            tags: vec![],
        }),
    )
}

fn step(
    uri: &str,
    keyword: &str,
    name: &str,
    line: u32,
    parent: &str,
) -> TestStep {
    TestStep::new(vec![
        StepSource::new(keyword, name, Location::new(uri, line)),
        StepSource::new("", parent, Location::new(uri, 2)),
        StepSource::new("Feature", "My Feature", Location::new(uri, 1)),
    ])
}

fn matcher(name: &str) -> Option<Location> {
    match name {
        "the setup" => Some(Location::new("steps/reporting.rs", 10)),
        "an action happens" => Some(Location::new("steps/reporting.rs", 20)),
        "something breaks" => Some(Location::new("steps/reporting.rs", 30)),
        "5 cucumbers" => Some(Location::new("steps/outline.rs", 7)),
        _ => None,
    }
}

fn passed(millis: u64) -> StepResult {
    StepResult::new(Status::Passed)
        .with_duration(Duration::from_millis(millis))
}

/// Result matching each executed unit of the rewritten step streams below.
fn result_for(step: &TestStep) -> StepResult {
    match step.kind() {
        StepKind::Hook(_) => passed(1),
        StepKind::Regular | StepKind::InternalSetup => {
            match step.own_source().name.as_str() {
                "the setup" => passed(2),
                "an action happens" => passed(3),
                "something breaks" => StepResult::new(Status::Failed)
                    .with_duration(Duration::from_millis(4))
                    .with_error(ExecutionError {
                        message: "kaput".into(),
                        kind: Some("StepPanic".into()),
                        backtrace: vec!["steps/reporting.rs:31:5".into()],
                    }),
                "nobody wrote this" => StepResult::new(Status::Undefined),
                "5 cucumbers" => passed(5),
                other => panic!("unexpected step: {other}"),
            }
        }
    }
}

#[test]
fn full_run_produces_the_expected_document() {
    let mut writer = Json::with_matcher(Vec::new(), matcher);
    let feature = my_feature();

    // Scenario hooks wrap each of the two scenarios of `My Feature`.
    let scenario_hooks = Hooks::new(
        vec![Registration::new(
            Location::new("features/support/hooks.rs", 3),
            HookAction::new(|| {}),
        )],
        vec![Registration::new(
            Location::new("features/support/hooks.rs", 9),
            HookAction::new(|| {}),
        )],
        vec![],
    );

    let first = [
        step(MY_URI, "Given ", "the setup", 3, "Setup"),
        step(MY_URI, "When ", "an action happens", 5, "First"),
    ];
    writer
        .handle_event(TestRun::CaseStarted(scenario_case(
            &feature, "First", 4,
        )))
        .unwrap();
    for executed in scenario_hooks.apply_to(&first) {
        let result = result_for(&executed);
        writer
            .handle_event(TestRun::StepStarted(executed.clone()))
            .unwrap();
        if executed.own_source().name == "an action happens" {
            writer
                .handle_event(TestRun::Output("acted".into()))
                .unwrap();
            writer
                .handle_event(TestRun::Embedding(Attachment::text(
                    "hello",
                    "text/plain",
                )))
                .unwrap();
        }
        writer
            .handle_event(TestRun::StepFinished(executed, result))
            .unwrap();
    }

    let second = [
        step(MY_URI, "Given ", "the setup", 3, "Setup"),
        step(MY_URI, "When ", "something breaks", 8, "Second"),
        step(MY_URI, "Then ", "nobody wrote this", 9, "Second"),
    ];
    writer
        .handle_event(TestRun::CaseStarted(scenario_case(
            &feature, "Second", 7,
        )))
        .unwrap();
    for executed in scenario_hooks.apply_to(&second) {
        let result = result_for(&executed);
        writer
            .handle_event(TestRun::StepStarted(executed.clone()))
            .unwrap();
        writer
            .handle_event(TestRun::StepFinished(executed, result))
            .unwrap();
    }

    // An outline-generated case in another feature, with after-step hooks.
    let outline_feature = Arc::new(Feature {
        uri: OUTLINE_URI.into(),
        keyword: "Feature".into(),
        name: "Outline Feature".into(),
        description: String::new(),
        location: Location::new(OUTLINE_URI, 1),
        tags: vec![],
        background: None,
    });
    let outline_case = TestCase::new(
        Arc::clone(&outline_feature),
        CaseSource::OutlineRow {
            outline: Scenario {
                keyword: "Scenario Outline".into(),
                name: "Eat cucumbers".into(),
                description: String::new(),
                location: Location::new(OUTLINE_URI, 3),
                tags: vec![Tag {
                    name: "@rows".into(),
                    location: Location::new(OUTLINE_URI, 2),
                }],
            },
            table: ExamplesTable {
                name: "Examples".into(),
                location: Location::new(OUTLINE_URI, 6),
            },
            row: ExamplesRow {
                location: Location::new(OUTLINE_URI, 8),
                number: 1,
            },
        },
    );
    let step_hooks = Hooks::new(
        vec![],
        vec![],
        vec![Registration::new(
            Location::new("features/support/steps.rs", 12),
            HookAction::new(|| {}),
        )],
    );
    let outline_step = TestStep::new(vec![
        StepSource::new("Given ", "5 cucumbers", Location::new(OUTLINE_URI, 4))
            .with_doc_string(DocString {
                content: "crunchy".into(),
                content_type: "text/x.note".into(),
                location: Location::new(OUTLINE_URI, 5),
            }),
        StepSource::new("", "Eat cucumbers", Location::new(OUTLINE_URI, 3)),
    ]);
    writer.handle_event(TestRun::CaseStarted(outline_case)).unwrap();
    for executed in step_hooks.apply_to(&[outline_step]) {
        let result = result_for(&executed);
        writer
            .handle_event(TestRun::StepStarted(executed.clone()))
            .unwrap();
        if executed.kind() == StepKind::Hook(HookType::AfterStep) {
            writer
                .handle_event(TestRun::Output("checked".into()))
                .unwrap();
            writer
                .handle_event(TestRun::Embedding(Attachment::text(
                    "UE5H",
                    "image/png;base64",
                )))
                .unwrap();
        }
        writer
            .handle_event(TestRun::StepFinished(executed, result))
            .unwrap();
    }

    writer.handle_event(TestRun::Finished).unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&writer.into_inner()).unwrap();
    let before_hook = json!({
        "match": {"location": "features/support/hooks.rs:3"},
        "result": {"status": "passed", "duration_ns": 1_000_000},
    });
    let after_hook = json!({
        "match": {"location": "features/support/hooks.rs:9"},
        "result": {"status": "passed", "duration_ns": 1_000_000},
    });
    let background_steps = json!([{
        "keyword": "Given ",
        "name": "the setup",
        "line": 3,
        "match": {"location": "steps/reporting.rs:10"},
        "result": {"status": "passed", "duration_ns": 2_000_000},
    }]);
    let expected = json!([
        {
            "uri": "features/my.feature",
            "id": "my-feature",
            "keyword": "Feature",
            "name": "My Feature",
            "description": "Reporting exercises.",
            "line": 1,
            "tags": [{"name": "@smoke", "line": 1}],
            "elements": [
                {
                    "keyword": "Background",
                    "name": "Setup",
                    "description": "",
                    "line": 2,
                    "type": "background",
                    "before": [before_hook.clone()],
                    "steps": background_steps.clone(),
                },
                {
                    "id": "my-feature;first",
                    "keyword": "Scenario",
                    "name": "First",
                    "description": "",
                    "line": 4,
                    "type": "scenario",
                    "steps": [{
                        "keyword": "When ",
                        "name": "an action happens",
                        "line": 5,
                        "match": {"location": "steps/reporting.rs:20"},
                        "result": {
                            "status": "passed",
                            "duration_ns": 3_000_000,
                        },
                        "output": ["acted"],
                        "embeddings": [{
                            "mime_type": "text/plain",
                            "data": "aGVsbG8=",
                        }],
                    }],
                    "after": [after_hook.clone()],
                },
                {
                    "keyword": "Background",
                    "name": "Setup",
                    "description": "",
                    "line": 2,
                    "type": "background",
                    "before": [before_hook],
                    "steps": background_steps,
                },
                {
                    "id": "my-feature;second",
                    "keyword": "Scenario",
                    "name": "Second",
                    "description": "",
                    "line": 7,
                    "type": "scenario",
                    "steps": [
                        {
                            "keyword": "When ",
                            "name": "something breaks",
                            "line": 8,
                            "match": {
                                "location": "steps/reporting.rs:30",
                            },
                            "result": {
                                "status": "failed",
                                "error_message":
                                    "kaput (StepPanic)\nsteps/reporting.rs:31:5",
                                "duration_ns": 4_000_000,
                            },
                        },
                        {
                            "keyword": "Then ",
                            "name": "nobody wrote this",
                            "line": 9,
                            "match": {"location": "features/my.feature:9"},
                            "result": {"status": "undefined"},
                        },
                    ],
                    "after": [after_hook],
                },
            ],
        },
        {
            "uri": "features/outline.feature",
            "id": "outline-feature",
            "keyword": "Feature",
            "name": "Outline Feature",
            "description": "",
            "line": 1,
            "elements": [{
                "id": "outline-feature;eat-cucumbers;examples;2",
                "keyword": "Scenario Outline",
                "name": "Eat cucumbers",
                "description": "",
                "line": 8,
                "type": "scenario",
                "tags": [{"name": "@rows", "line": 2}],
                "steps": [{
                    "keyword": "Given ",
                    "name": "5 cucumbers",
                    "line": 4,
                    "doc_string": {
                        "value": "crunchy",
                        "content_type": "text/x.note",
                        "line": 5,
                    },
                    "match": {"location": "steps/outline.rs:7"},
                    "result": {"status": "passed", "duration_ns": 5_000_000},
                    "after": [{
                        "match": {
                            "location": "features/support/steps.rs:12",
                        },
                        "result": {
                            "status": "passed",
                            "duration_ns": 1_000_000,
                        },
                        "output": ["checked"],
                        "embeddings": [{
                            "mime_type": "image/png",
                            "data": "UE5H",
                        }],
                    }],
                }],
            }],
        },
    ]);
    assert_eq!(written, expected);
}

#[test]
fn document_lands_pretty_printed_in_a_file() {
    let mut file = NamedTempFile::new().unwrap();
    let mut writer = Json::new(file.reopen().unwrap());
    let feature = my_feature();
    writer
        .handle_event(TestRun::CaseStarted(scenario_case(
            &feature, "First", 4,
        )))
        .unwrap();
    let setup = step(MY_URI, "Given ", "the setup", 3, "Setup");
    writer.handle_event(TestRun::StepStarted(setup.clone())).unwrap();
    writer
        .handle_event(TestRun::StepFinished(setup, passed(2)))
        .unwrap();
    writer.handle_event(TestRun::Finished).unwrap();

    let mut buffer = String::new();
    file.read_to_string(&mut buffer).unwrap();
    // Pretty-printed, parseable, and carrying the feature node.
    assert!(buffer.contains("\n  "));
    let parsed: serde_json::Value = serde_json::from_str(&buffer).unwrap();
    assert_eq!(parsed[0]["id"], "my-feature");
    assert_eq!(
        fs::metadata(file.path()).unwrap().len(),
        buffer.len() as u64,
    );
}
