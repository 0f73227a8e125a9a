use std::fs;

use quadlet_core::load::{
    load_inputs, load_path, load_reader, parse_documents, parse_json_documents, LoadError,
};
use tempfile::tempdir;

#[test]
fn parses_multi_document_yaml_and_skips_empty_documents() {
    let body = "---\nkind: A\n---\n---\nkind: B\n";
    let resources = parse_documents("multi.yaml", body).unwrap();
    let kinds: Vec<&str> = resources.iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["A", "B"]);
    assert_eq!(resources[1].index, 1);
    assert_eq!(resources[1].source, "multi.yaml");
}

#[test]
fn flattens_list_documents() {
    let body = r#"
apiVersion: v1
kind: List
items:
  - kind: Deployment
    metadata:
      name: web
  - kind: ServiceList
    items:
      - kind: Service
        metadata:
          name: web
"#;
    let resources = parse_documents("list.yaml", body).unwrap();
    let kinds: Vec<&str> = resources.iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["Deployment", "Service"]);
}

#[test]
fn parses_json_streams() {
    let body = r#"{"kind":"Deployment","metadata":{"name":"web"}}
{"kind":"Service","metadata":{"name":"web"},"spec":{"ports":[{"port":80}]}}"#;
    let resources = parse_json_documents("in.json", body).unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].name(), Some("web"));
}

#[test]
fn invalid_yaml_reports_source() {
    let err = parse_documents("bad.yaml", "kind: [unclosed\n").unwrap_err();
    assert!(matches!(err, LoadError::Yaml { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn invalid_json_reports_source() {
    let err = parse_json_documents("bad.json", "{\"kind\": ").unwrap_err();
    assert!(matches!(err, LoadError::Json { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let err = load_path(&dir.path().join("nope.yaml"), false).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }), "got {err}");
}

#[test]
fn directory_loading_respects_recursion_and_extensions() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("b.yaml"), "kind: B\n").unwrap();
    fs::write(root.join("a.yml"), "kind: A\n").unwrap();
    fs::write(root.join("c.json"), "{\"kind\": \"C\"}").unwrap();
    fs::write(root.join("notes.txt"), "kind: Ignored\n").unwrap();
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("d.yaml"), "kind: D\n").unwrap();

    let flat = load_path(root, false).unwrap();
    let kinds: Vec<&str> = flat.iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["A", "B", "C"]);

    let deep = load_path(root, true).unwrap();
    let kinds: Vec<&str> = deep.iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["A", "B", "C", "D"]);
}

#[test]
fn load_inputs_keeps_argument_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("z.yaml");
    let second = dir.path().join("a.yaml");
    fs::write(&first, "kind: Z\n").unwrap();
    fs::write(&second, "kind: A\n").unwrap();

    let inputs = vec![first.display().to_string(), second.display().to_string()];
    let resources = load_inputs(&inputs, false).unwrap();
    let kinds: Vec<&str> = resources.iter().filter_map(|r| r.kind()).collect();
    assert_eq!(kinds, vec!["Z", "A"]);
}

#[test]
fn reader_input_uses_given_source_name() {
    let resources = load_reader("<stdin>", "kind: Deployment\n".as_bytes()).unwrap();
    assert_eq!(resources[0].source, "<stdin>");
    assert_eq!(resources[0].describe(), "Deployment (<stdin>#0)");
}
