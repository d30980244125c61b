use clap::Parser;
use std::fs;

use super::args::CliArgs;
use super::driver::{SAMPLE_SOURCE, SourceInput, build_all, gather_sources, run};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["csymtab"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("args should parse")
}

#[test]
fn falls_back_to_sample_source() {
    let inputs = gather_sources(&args(&[])).unwrap();
    assert_eq!(inputs, vec![SourceInput::new("<sample>", SAMPLE_SOURCE)]);
}

#[test]
fn gathers_argument_then_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.c");
    let second = dir.path().join("second.c");
    fs::write(&first, "int a;").unwrap();
    fs::write(&second, "int b;").unwrap();

    let inputs = gather_sources(&args(&[
        "--file",
        second.to_str().unwrap(),
        "--file",
        first.to_str().unwrap(),
        "int inline_decl;",
    ]))
    .unwrap();

    let texts: Vec<_> = inputs.iter().map(|input| input.text.as_str()).collect();
    assert_eq!(texts, vec!["int inline_decl;", "int b;", "int a;"]);
    assert_eq!(inputs[1].name, second.display().to_string());
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.c");
    let err = gather_sources(&args(&["--file", missing.to_str().unwrap()])).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read"));
}

#[test]
fn renders_compact_tables_without_tree() {
    let out = run(&args(&["--no-tree", "--compact", "int q[100];"])).unwrap();
    assert_eq!(
        out,
        "{\"q\":{\"dimension\":\"100\",\"element\":[\"int\"]}}\n{}\n"
    );
}

#[test]
fn renders_tree_before_tables() {
    let out = run(&args(&["--compact", "int z;"])).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "TranslationUnit: <argument>");
    assert_eq!(lines[lines.len() - 2], "{\"z\":[\"int\"]}");
    assert_eq!(lines[lines.len() - 1], "{}");
}

#[test]
fn sample_source_builds_both_tables() {
    let out = run(&args(&["--no-tree", "--compact"])).unwrap();
    let mut lines = out.lines();
    let values: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    let types: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();

    assert_eq!(values["bob"], serde_json::json!(["strange_unit"]));
    assert_eq!(values["foo"]["return"], serde_json::json!(["int"]));
    assert_eq!(types["strange_unit"], serde_json::json!(["int"]));
    assert_eq!(
        types["struct foobar"][2],
        serde_json::json!(["fb", {"pointee": "struct foobar", "struct_qualified": true}])
    );
}

#[test]
fn multiple_files_get_headers() {
    let dir = tempfile::tempdir().unwrap();
    let one = dir.path().join("one.c");
    let two = dir.path().join("two.c");
    fs::write(&one, "int one;").unwrap();
    fs::write(&two, "char two;").unwrap();

    let out = run(&args(&[
        "--no-tree",
        "--compact",
        "--file",
        one.to_str().unwrap(),
        "--file",
        two.to_str().unwrap(),
    ]))
    .unwrap();

    let expected = format!(
        "==> {} <==\n{{\"one\":[\"int\"]}}\n{{}}\n==> {} <==\n{{\"two\":[\"char\"]}}\n{{}}\n",
        one.display(),
        two.display()
    );
    assert_eq!(out, expected);
}

#[test]
fn parse_failure_names_the_location() {
    let inputs = vec![
        SourceInput::new("good.c", "int ok;"),
        SourceInput::new("bad.c", "int ok;\nint broken"),
    ];
    let err = build_all(&inputs).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("failed to build bad.c:2:"), "{message}");
    assert!(message.contains("parse error"), "{message}");
}
