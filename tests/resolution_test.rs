//! End-to-end resolution scenarios, driven through in-memory and file-backed
//! work item sources.

mod fixtures;

use pretty_assertions::assert_eq;
use std::cell::Cell;

use fixtures::get_test_fixture_path;
use testcase_params::{
    FileSource, MemorySource, ParameterResolver, ParameterRow, ResolveError, SourceError,
    TestCaseRecord, WorkItemId, TEST_CASE,
};

fn pairs(row: &ParameterRow) -> Vec<(&str, &str)> {
    row.parameters
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

#[test]
fn test_inline_scenario() {
    let source = MemorySource::from_records([TestCaseRecord::new(10, TEST_CASE, "Inline")
        .with_data_source(
            "<DataSet><Table><Col1>a</Col1></Table><Table><Col1>b</Col1></Table></DataSet>",
        )]);
    let rows = ParameterResolver::new(source).resolve(10).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(pairs(&rows[0]), vec![("Col1", "a")]);
    assert_eq!(pairs(&rows[1]), vec![("Col1", "b")]);
    assert!(rows.iter().all(|row| row.id == 10));
}

#[test]
fn test_shared_reference_scenario() {
    let source = MemorySource::from_records([
        TestCaseRecord::new(20, TEST_CASE, "Shared").with_data_source(
            r#"{"parameterMap":[{"localParamName":"x","sharedParameterName":"X"}],"sharedParameterDataSetIds":[99]}"#,
        ),
        TestCaseRecord::new(99, "Shared Parameter", "Data").with_parameters(
            r#"<parameterSet><paramNames><param>X</param></paramNames><paramData lastId="1"><dataRow id="1"><kvp key="X" value="&amp;amp;val" /></dataRow></paramData></parameterSet>"#,
        ),
    ]);
    let rows = ParameterResolver::new(source).resolve(20).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(pairs(&rows[0]), vec![("x", "&val")]);
    assert_eq!(rows[0].id, 20);
    assert_eq!(rows[0].title, "Shared");
}

#[test]
fn test_unknown_format_scenario() {
    let source = MemorySource::from_records([
        TestCaseRecord::new(50, TEST_CASE, "Plain").with_data_source("plain text")
    ]);
    let err = ParameterResolver::new(source).resolve(50).unwrap_err();

    assert!(matches!(err, ResolveError::UnrecognizedFormat { id: 50 }));
}

#[test]
fn test_bug_is_rejected_regardless_of_payload() {
    for payload in [
        "<NewDataSet><Table1><a>1</a></Table1></NewDataSet>",
        r#"{"parameterMap":[]}"#,
        "",
    ] {
        let source = MemorySource::from_records([
            TestCaseRecord::new(30, "Bug", "Bug").with_data_source(payload)
        ]);
        let err = ParameterResolver::new(source).resolve(30).unwrap_err();
        assert!(matches!(err, ResolveError::NotATestCase { id: 30, .. }));
    }
}

#[test]
fn test_missing_data_fails_after_single_fetch() {
    let fetches = Cell::new(0);
    let source = |id: WorkItemId| -> Result<TestCaseRecord, SourceError> {
        fetches.set(fetches.get() + 1);
        Ok(TestCaseRecord::new(id, TEST_CASE, "Empty"))
    };
    let err = ParameterResolver::new(source).resolve(40).unwrap_err();

    assert!(matches!(err, ResolveError::MissingParameterData { id: 40 }));
    assert_eq!(fetches.get(), 1);
}

#[test]
fn test_second_fetch_waits_for_first() {
    let order = std::cell::RefCell::new(Vec::new());
    let source = |id: WorkItemId| -> Result<TestCaseRecord, SourceError> {
        order.borrow_mut().push(id);
        match id {
            1 => Ok(TestCaseRecord::new(1, TEST_CASE, "Case").with_data_source(
                r#"{"parameterMap":[{"localParamName":"a","sharedParameterName":"A"}],"sharedParameterDataSetIds":[2]}"#,
            )),
            2 => Ok(TestCaseRecord::new(2, "Shared Parameter", "Set").with_parameters(
                r#"<parameterSet><paramData><dataRow><kvp key="A" value="from-2" /></dataRow></paramData></parameterSet>"#,
            )),
            other => Err(SourceError::not_found(other)),
        }
    };
    let rows = ParameterResolver::new(source).resolve(1).unwrap();

    assert_eq!(*order.borrow(), vec![1, 2]);
    assert_eq!(rows[0].get("a"), Some("from-2"));
}

#[test]
fn test_transport_failure_is_surfaced_unchanged() {
    let source = |id: WorkItemId| -> Result<TestCaseRecord, SourceError> {
        Err(SourceError::transport(id, "503 Service Unavailable"))
    };
    let err = ParameterResolver::new(source).resolve(7).unwrap_err();

    match err {
        ResolveError::Fetch {
            id,
            work_item,
            source: SourceError::Transport { message, .. },
        } => {
            assert_eq!((id, work_item), (7, 7));
            assert_eq!(message, "503 Service Unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_json_records_file() {
    let source = FileSource::load(get_test_fixture_path("records.json")).unwrap();
    let resolver = ParameterResolver::new(source);

    let inline = resolver.resolve(10).unwrap();
    assert_eq!(
        inline[1].display_name("login_works"),
        "login_works (bob,two)"
    );

    let shared = resolver.resolve(20).unwrap();
    assert_eq!(shared.len(), 2);
    assert_eq!(
        pairs(&shared[0]),
        vec![("user", "carol"), ("password", "p&ss")]
    );
    assert_eq!(shared[1].get("password"), Some("<none>"));
    assert!(shared.iter().all(|row| row.title == "Shared login"));

    assert!(matches!(
        resolver.resolve(30),
        Err(ResolveError::NotATestCase { id: 30, .. })
    ));
    assert!(matches!(
        resolver.resolve(40),
        Err(ResolveError::MissingParameterData { id: 40 })
    ));
    assert!(matches!(
        resolver.resolve(50),
        Err(ResolveError::UnrecognizedFormat { id: 50 })
    ));
}

#[test]
fn test_yaml_records_file() {
    let source = FileSource::load(get_test_fixture_path("records.yaml")).unwrap();
    let resolver = ParameterResolver::new(source);

    let inline = resolver.resolve(10).unwrap();
    assert_eq!(pairs(&inline[0]), vec![("user", "alice"), ("password", "one")]);

    let shared = resolver.resolve(20).unwrap();
    assert_eq!(pairs(&shared[0]), vec![("user", "carol")]);
}
