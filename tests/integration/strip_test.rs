use crate::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn strip_prints_code_without_pins() {
    let app = fixture_path("snack_app").join("App.js");
    let original = std::fs::read_to_string(&app).unwrap();

    Command::cargo_bin("snack-deps")
        .unwrap()
        .arg("strip")
        .arg(&app)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "import React from 'react';\nimport { View, StyleSheet } from 'react-native';\n",
        ))
        .stdout(predicate::str::contains("const base64 = require('base64');\n"))
        .stdout(predicate::str::contains("// 1.0.0\nexport default function App()"))
        .stdout(predicate::str::contains("16.5.0").not());

    assert_eq!(std::fs::read_to_string(&app).unwrap(), original);
}

#[test]
fn strip_json_reports_dependencies_and_code() {
    Command::cargo_bin("snack-deps")
        .unwrap()
        .args(["strip", "--format", "json"])
        .arg(fixture_path("snack_app").join("App.js"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dependencies\""))
        .stdout(predicate::str::contains("\"base64\": \"2.4.1\""))
        .stdout(predicate::str::contains("\"code\""));
}

#[test]
fn strip_without_pins_is_passthrough() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("theme.ts");
    let source = "export const primary: string = '#4630eb';\n\n\n// keep\n";
    std::fs::write(&file, source).unwrap();

    Command::cargo_bin("snack-deps")
        .unwrap()
        .arg("strip")
        .arg(&file)
        .assert()
        .success()
        .stdout(source);
}

#[test]
fn strip_reports_parse_error() {
    Command::cargo_bin("snack-deps")
        .unwrap()
        .arg("strip")
        .arg(fixture_path("snack_app").join("Broken.js"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error in"));
}

#[test]
fn strip_missing_file_fails() {
    Command::cargo_bin("snack-deps")
        .unwrap()
        .args(["strip", "does/not/exist.js"])
        .assert()
        .failure();
}
