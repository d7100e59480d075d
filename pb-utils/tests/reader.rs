use pb_structs::core::VoteType;
use pb_utils::reader::{parse_str, read_dir, read_file, ReadError};
use std::fs;

const SAMPLE: &str = "META
key;value
description;Sample district
num_projects;3
budget;300.5
vote_type;approval
PROJECTS
project_id;cost;name;category
1;100;\"Park; north side\";green
2;250;;culture
3;40;Bike racks;transport

VOTES
voter_id;age;vote
a;31;1,2
b;45;2, 3
c;27;2
";

#[test]
fn test_parse_sample() {
    let instance = parse_str("sample.pb", SAMPLE).unwrap();
    assert_eq!(instance.meta.file_name, "sample.pb");
    assert_eq!(instance.meta.budget, 300.5);
    assert_eq!(instance.meta.vote_type, Some(VoteType::Approval));
    assert_eq!(instance.capacity().unwrap(), 300);

    assert_eq!(instance.projects.len(), 3);
    assert_eq!(instance.projects[0].id, "1");
    assert_eq!(instance.projects[0].cost, 100);
    assert_eq!(
        instance.projects[0].name.as_deref(),
        Some("Park; north side")
    );
    assert_eq!(instance.projects[1].name, None);

    assert_eq!(instance.voters.len(), 3);
    assert_eq!(instance.voters[1].id, "b");
    assert_eq!(instance.voters[1].vote, vec!["2", "3"]);
}

#[test]
fn test_invalid_cost_names_the_line() {
    let content = SAMPLE.replace("3;40;", "3;forty;");
    match parse_str("bad.pb", &content) {
        Err(ReadError::Parse { file, line, message }) => {
            assert_eq!(file, "bad.pb");
            assert_eq!(line, 11);
            assert!(message.contains("forty"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unknown_vote_type() {
    let content = SAMPLE.replace("vote_type;approval", "vote_type;plurality");
    assert!(matches!(
        parse_str("bad.pb", &content),
        Err(ReadError::Parse { line: 6, .. })
    ));
}

#[test]
fn test_missing_column() {
    let content = SAMPLE.replace("voter_id;age;vote", "voter_id;age;ballot");
    assert!(matches!(
        parse_str("bad.pb", &content),
        Err(ReadError::Parse { line: 14, .. })
    ));
}

#[test]
fn test_missing_budget() {
    let content = SAMPLE.replace("budget;300.5\n", "");
    assert!(matches!(
        parse_str("bad.pb", &content),
        Err(ReadError::Missing { what: "budget", .. })
    ));
}

#[test]
fn test_row_outside_section() {
    assert!(matches!(
        parse_str("bad.pb", "hello;world\n"),
        Err(ReadError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_read_file_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warszawa.pb");
    fs::write(&path, SAMPLE).unwrap();

    let instance = read_file(&path).unwrap();
    assert_eq!(instance.meta.file_name, "warszawa.pb");

    assert!(matches!(
        read_file(&dir.path().join("missing.pb")),
        Err(ReadError::Io { .. })
    ));
}

#[test]
fn test_read_dir_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pb"), SAMPLE).unwrap();
    fs::write(dir.path().join("b.pb"), "not a pabulib file\n").unwrap();
    fs::write(dir.path().join("c.pb"), SAMPLE).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let scan = read_dir(dir.path()).unwrap();
    let names: Vec<&str> = scan
        .instances
        .iter()
        .map(|i| i.meta.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.pb", "c.pb"]);
    assert_eq!(scan.failures.len(), 1);
    assert!(scan.failures[0].0.ends_with("b.pb"));
}

#[test]
fn test_read_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_dir(&dir.path().join("nowhere")).is_err());
}
