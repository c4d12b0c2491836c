//! End-to-end tests for the ifacegen binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STORE: &str = r#"package store

import (
	"context"
	"fmt"
)

type Store struct{}

// Get fetches a value.
func (s *Store) Get(ctx context.Context, k string) (Value, error) { return Value{}, nil }

func (s *Store) String() string { return fmt.Sprint("store") }

func (s *Store) flush() {}
"#;

const CACHE: &str = r#"package store

type Cache struct{}

func (c Cache) Len() int { return 0 }
"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("store.go"), STORE).unwrap();
    fs::write(dir.path().join("cache.go"), CACHE).unwrap();
    dir
}

fn ifacegen() -> Command {
    Command::cargo_bin("ifacegen").unwrap()
}

fn generate_args(dir: &Path) -> Vec<String> {
    [
        "generate",
        "-f",
        dir.to_str().unwrap(),
        "-s",
        "Store",
        "-i",
        "StoreAPI",
        "-p",
        "storeapi",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[test]
fn test_generate_to_stdout() {
    let dir = project();
    ifacegen()
        .args(generate_args(dir.path()))
        .args(["-a", "example.com/store", "-r", "store"])
        .assert()
        .success()
        .stdout(
            "// Code generated by ifacegen. DO NOT EDIT.\n\
             \n\
             package storeapi\n\
             \n\
             import (\n\
             \t\"example.com/store\"\n\
             \t\"context\"\n\
             )\n\
             \n\
             var _ StoreAPI = (*store.Store)(nil)\n\
             \n\
             type StoreAPI interface {\n\
             \t// Get fetches a value.\n\
             \tGet(ctx context.Context, k string) (store.Value, error)\n\
             \tString() string\n\
             }\n",
        );
}

#[test]
fn test_generate_without_docs_or_header() {
    let dir = project();
    ifacegen()
        .args(generate_args(dir.path()))
        .args(["-d", "false", "--omit-generated-comment"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Code generated").not())
        .stdout(predicate::str::contains("// Get fetches a value.").not())
        .stdout(predicate::str::contains("var _").not())
        .stdout(predicate::str::contains(
            "\tGet(ctx context.Context, k string) (Value, error)\n",
        ));
}

#[test]
fn test_generate_to_output_file() {
    let dir = project();
    let output = dir.path().join("storeapi.txt");
    ifacegen()
        .args(generate_args(dir.path()))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("// Code generated by ifacegen. DO NOT EDIT.\n"));
    assert!(written.contains("type StoreAPI interface {"));
}

#[test]
fn test_generate_json() {
    let dir = project();
    let output = ifacegen()
        .args(generate_args(dir.path()))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let spec: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(spec["type_name"], "Store");
    assert_eq!(spec["methods"][0]["name"], "Get");
    assert_eq!(spec["methods"][1]["signature"], "String() (string)");
}

#[test]
fn test_generate_from_config() {
    let dir = project();
    let config = dir.path().join("ifacegen.json");
    let options = serde_json::json!({
        "struct_name": "Cache",
        "interface_name": "Sizer",
        "package_name": "cacheapi",
        "files": [dir.path().join("cache.go")],
    });
    fs::write(&config, serde_json::to_string_pretty(&options).unwrap()).unwrap();

    ifacegen()
        .args(["g", "--config"])
        .arg(&config)
        .args(["-i", "Lener"])
        .assert()
        .success()
        .stdout(predicate::str::contains("package cacheapi\n"))
        .stdout(predicate::str::contains("type Lener interface {\n\tLen() int\n}\n"));
}

#[test]
fn test_missing_options_fail() {
    let dir = project();
    ifacegen()
        .args(["generate", "-f", dir.path().to_str().unwrap(), "-s", "Store"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "missing required option(s): interface_name, package_name",
        ));
}

#[test]
fn test_import_conflict_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.go"),
        "package p\n\nimport \"example.com/a\"\n\nfunc (s *S) A(v a.V) {}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.go"),
        "package p\n\nimport x \"example.com/a\"\n\nfunc (s *S) B(v x.V) {}\n",
    )
    .unwrap();

    ifacegen()
        .args(["generate", "-f", dir.path().to_str().unwrap()])
        .args(["-s", "S", "-i", "I", "-p", "p"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "imported multiple times with different aliases",
        ));
}

#[test]
fn test_syntax_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.go"), "package p\n\nfunc (s *S) A(\n").unwrap();

    ifacegen()
        .args(["generate", "-f", dir.path().to_str().unwrap()])
        .args(["-s", "S", "-i", "I", "-p", "p"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.go"));
}

#[test]
fn test_types_lists_receivers() {
    let dir = project();
    ifacegen()
        .args(["types", "-f", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout("1\tCache\n3\tStore\n");
}

#[test]
fn test_types_json() {
    let dir = project();
    let output = ifacegen()
        .args(["t", "--json", "-f", dir.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let counts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(counts, serde_json::json!({ "Cache": 1, "Store": 3 }));
}
