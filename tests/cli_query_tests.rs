//! Query resolution from command-line arguments, through to rendering

use flowir_cli::{input_sources, QueryFlags};
use flowir_core::dag::{Op, Trunk};
use flowir_fmt::dag;
use flowir_planner::PlanError;
use std::fs;
use std::io::Write;

const FILTER: &str = r#"ops:
  - op: where
    expr: { kind: literal, type: bool, text: "true" }
  - { op: tail, count: 2 }"#;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn render(flags: &QueryFlags, list: &[String], format: Option<&str>) -> Result<String, PlanError> {
    let (inputs, mut query, _) = flags.parse_sources_and_inputs(list)?;
    let sources = input_sources(&inputs, format);
    if !sources.is_empty() {
        let trunks = sources.into_iter().map(Trunk::new).collect();
        query.ops.insert(0, Op::From { trunks });
    }
    Ok(dag(&Op::Sequential(query)))
}

#[test]
fn test_query_over_file_and_url_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.zng");
    fs::write(&input, b"").unwrap();
    let input = input.to_string_lossy().into_owned();

    let list = vec![
        FILTER.to_string(),
        input.clone(),
        "https://example.com/b.json".to_string(),
    ];
    let text = render(&QueryFlags::default(), &list, Some("zng")).unwrap();
    let want = format!(
        "from (\n  file {} format zng\n  get https://example.com/b.json\n)\n| where *\n| tail 2",
        input
    );
    assert_eq!(text, want);
}

#[test]
fn test_inputs_without_query_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("only.json");
    fs::write(&input, b"{}").unwrap();
    let input = input.to_string_lossy().into_owned();

    let text = render(&QueryFlags::default(), &[input.clone()], None).unwrap();
    assert_eq!(text, format!("from (file {})", input));
}

#[test]
fn test_include_files_prefix_the_query() {
    let dir = tempfile::tempdir().unwrap();
    let include = dir.path().join("lib.yaml");
    let mut f = fs::File::create(&include).unwrap();
    writeln!(
        f,
        "consts:\n  - {{ name: n, expr: {{ kind: literal, type: int64, text: \"3\" }} }}"
    )
    .unwrap();

    let flags = QueryFlags {
        includes: vec![include],
    };
    let text = render(&flags, &args(&[FILTER, "-"]), None).unwrap();
    assert_eq!(text, "const n = 3\nfrom (file -)\n| where *\n| tail 2");
}

#[test]
fn test_missing_file_is_reported_as_such() {
    let err = render(&QueryFlags::default(), &args(&["nope.json"]), None).unwrap_err();
    assert!(matches!(err, PlanError::NoSuchFile(ref s) if s == "nope.json"));
}

#[test]
fn test_implicit_yield() {
    let q = r#"ops: [{ op: yield, exprs: [{ kind: literal, type: string, text: "hi" }] }]"#;
    let (inputs, query, implicit) = QueryFlags::default()
        .parse_sources_and_inputs(&args(&[q]))
        .unwrap();
    assert!(inputs.is_empty());
    assert!(implicit);
    assert_eq!(dag(&Op::Sequential(query)), "yield \"hi\"");
}

#[test]
fn test_missing_include_is_an_io_error() {
    let flags = QueryFlags {
        includes: vec!["/no/such/include.yaml".into()],
    };
    let err = render(&flags, &args(&[FILTER, "-"]), None).unwrap_err();
    assert!(matches!(err, PlanError::Io { .. }));
    assert!(err.to_string().starts_with("/no/such/include.yaml"));
}
