use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const LIBRARY: &str = r#"{
  "Name": "",
  "Subcategories": [
    {
      "Name": "ProtoFlux",
      "Subcategories": [
        {
          "Name": "Runtimes",
          "Subcategories": [
            {
              "Name": "Execution",
              "Subcategories": [
                {
                  "Name": "Nodes",
                  "Subcategories": [
                    {
                      "Name": "Math",
                      "Elements": [
                        { "FullName": "ProtoFlux.Nodes.IsNaN", "NiceName": "IsNaN" },
                        { "FullName": "ProtoFlux.Nodes.ValueLerp`2", "NiceName": "ValueLerp<A,B>" }
                      ]
                    }
                  ]
                }
              ]
            }
          ]
        }
      ],
      "Elements": [
        { "FullName": "ProtoFlux.Nodes.ValueEquals`1", "NiceName": "ValueEquals<T>" }
      ]
    }
  ]
}"#;

fn command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("protoflux-catalog").unwrap();
    cmd.current_dir(dir).arg("--no-color");
    cmd
}

#[test]
fn test_exports_json_catalog() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("library.json"), LIBRARY).unwrap();

    command(dir.path())
        .arg("out")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 ProtoFlux types."));

    let json = fs::read_to_string(dir.path().join("out").join("ProtoFluxTypes.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert_eq!(value[0]["FullName"], "ProtoFlux.Nodes.IsNaN");
    assert_eq!(value[0]["NiceCategory"], "Math");
    assert_eq!(value[1]["NiceCategory"], "ProtoFlux");
    assert_eq!(value[1]["ParameterCount"], 1);
    assert_eq!(value[1]["WordsOfNiceName"], serde_json::json!(["Value", "Equals"]));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("library.json"), LIBRARY).unwrap();
    let output = dir.path().join("out").join("ProtoFluxTypes.json");

    command(dir.path()).arg("out").assert().success();
    let first = fs::read(&output).unwrap();
    command(dir.path()).arg("out").assert().success();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_list_format_and_parameter_cap() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("library.json"), LIBRARY).unwrap();

    command(dir.path())
        .args(["out", "--format", "list", "--max-parameters", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 ProtoFlux types."));

    let listing = fs::read_to_string(dir.path().join("out").join("ProtoFluxList.txt")).unwrap();
    assert!(listing.contains("#### ValueLerp<A,B>#ProtoFlux.Nodes.ValueLerp`2#Math\n"));
    assert!(listing.ends_with(" ValueEquals<T>#ProtoFlux.Nodes.ValueEquals`1#ProtoFlux\n"));
}

#[test]
fn test_local_config_is_applied() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("library.json"), LIBRARY).unwrap();
    fs::write(
        dir.path().join(".protoflux-catalog.toml"),
        "category_prefixes = []\n",
    )
    .unwrap();

    command(dir.path()).arg("out").assert().success();

    let json = fs::read_to_string(dir.path().join("out").join("ProtoFluxTypes.json")).unwrap();
    assert!(json.contains("\"NiceCategory\": \"Runtimes/Execution/Nodes/Math\""));
}

#[test]
fn test_local_rule_order_is_applied() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".protoflux-catalog.toml"),
        "rules = [\"placeholder\", \"single-capital\", \"lower-word\"]\n",
    )
    .unwrap();

    command(dir.path())
        .args(["--tokenize", "IsNaN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IsNaN\tI s NaN"));
}

#[test]
fn test_tokenize_flag() {
    let dir = tempdir().unwrap();

    command(dir.path())
        .args(["--tokenize", "HTTPServer", "--tokenize", "Compare<T>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("HTTPServer\tHTTP Server"))
        .stdout(predicate::str::contains("Compare<T>\tCompare"));
}

#[test]
fn test_tokenizer_policy_flag() {
    let dir = tempdir().unwrap();

    command(dir.path())
        .args(["--tokenizer", "merge-acronyms", "--tokenize", "ValueX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ValueX\tValueX"));
}

#[test]
fn test_missing_root_category_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("library.json"), LIBRARY).unwrap();

    command(dir.path())
        .args(["out", "--root", "Audio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to export catalog from ."))
        .stderr(predicate::str::contains("category 'Audio' not found"));
}
