//! nest_dotted over NDJSON streams

use flowir_core::config::IrConfig;
use flowir_runtime::{NestDotted, Value};

fn run(lines: &[&str]) -> Vec<String> {
    let mut nest = NestDotted::new(&IrConfig::default()).unwrap();
    lines
        .iter()
        .map(|l| {
            let v = Value::from_json_str(l).unwrap();
            nest.call(&v).to_json().to_string()
        })
        .collect()
}

#[test]
fn test_stream_of_mixed_shapes() {
    let out = run(&[
        r#"{"id.orig_h":"10.0.0.1","id.resp_h":"10.0.0.2","ts":1}"#,
        r#"{"ts":2,"msg":"plain"}"#,
        r#"{"id.orig_h":"10.0.0.3","id.resp_h":"10.0.0.4","ts":3}"#,
        r#"[1,2,3]"#,
    ]);
    assert_eq!(
        out,
        vec![
            r#"{"id":{"orig_h":"10.0.0.1","resp_h":"10.0.0.2"},"ts":1}"#,
            r#"{"ts":2,"msg":"plain"}"#,
            r#"{"id":{"orig_h":"10.0.0.3","resp_h":"10.0.0.4"},"ts":3}"#,
            r#"[1,2,3]"#,
        ]
    );
}

#[test]
fn test_conflicting_shape_does_not_stop_the_stream() {
    let out = run(&[
        r#"{"a":1,"a.b":2}"#,
        r#"{"a.b":1,"c":2}"#,
    ]);
    assert!(out[0].starts_with(r#"{"error":"unflatten:"#), "{}", out[0]);
    assert_eq!(out[1], r#"{"a":{"b":1},"c":2}"#);
}

#[test]
fn test_output_is_a_fixed_point() {
    let mut nest = NestDotted::new(&IrConfig::default()).unwrap();
    let v = Value::from_json_str(r#"{"x.y.z":1,"x.y.w":[{"k.l":2}],"q":null}"#).unwrap();
    let once = nest.call(&v);
    assert_eq!(once.to_string(), r#"{x:{y:{z:1,w:[{"k.l":2}]}},q:null}"#);
    assert_eq!(nest.call(&once), once);
}
