use crate::fixture_path;
use assert_cmd::Command;
use predicates::prelude::*;

fn scan() -> Command {
    let mut cmd = Command::cargo_bin("snack-deps").unwrap();
    cmd.arg("scan");
    cmd
}

#[test]
fn scan_snack_app_json() {
    let output = scan()
        .arg(fixture_path("snack_app"))
        .args(["--format", "json", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let deps = &report["dependencies"];
    assert_eq!(deps["react"], "16.5.0");
    assert!(deps["react-native"].is_null());
    assert_eq!(deps["react-native-paper"], "2.1.3");
    assert_eq!(deps["base64"], "2.4.1");
    assert!(deps["lodash"].is_null());
    assert_eq!(deps["@expo/vector-icons"], "LATEST");
    assert_eq!(deps["lodash/fp"], "4.17.11");
    assert_eq!(deps.as_object().unwrap().len(), 7);

    assert_eq!(report["metadata"]["files_parsed"], 3);
    assert_eq!(report["metadata"]["files_skipped"], 1);
    assert_eq!(report["skipped"][0]["file"], "Broken.js");
    assert_eq!(report["skipped"][0]["line"], 1);

    let files: Vec<&str> = report["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["file"].as_str().unwrap())
        .collect();
    assert_eq!(files, vec!["App.js", "components/Header.tsx", "utils/theme.ts"]);
}

#[test]
fn scan_snack_app_text() {
    scan()
        .arg(fixture_path("snack_app"))
        .args(["--format", "text", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Snack Dependency Report"))
        .stdout(predicate::str::contains("Dependencies (7)"))
        .stdout(predicate::str::contains("Broken.js:1:"));
}

#[test]
fn scan_names_only() {
    scan()
        .arg(fixture_path("snack_app"))
        .args(["--names-only", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"versions\": false"))
        .stdout(predicate::str::contains("\"react\": null"))
        .stdout(predicate::str::contains("16.5.0").not());
}

#[test]
fn scan_single_file() {
    scan()
        .arg(fixture_path("snack_app").join("App.js"))
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file\": \"App.js\""))
        .stdout(predicate::str::contains("\"base64\": \"2.4.1\""))
        .stdout(predicate::str::contains("@expo/vector-icons").not());
}

#[test]
fn scan_exclude_pattern() {
    scan()
        .arg(fixture_path("snack_app"))
        .args(["--exclude", "components/**", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@expo/vector-icons").not())
        .stdout(predicate::str::contains("\"react\": \"16.5.0\""));
}

#[test]
fn scan_skips_node_modules_and_ignore_file() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("node_modules/left-pad")).unwrap();
    std::fs::create_dir_all(root.join("web-build")).unwrap();
    std::fs::write(root.join("App.js"), "import 'expo-constants';\n").unwrap();
    std::fs::write(
        root.join("node_modules/left-pad/index.js"),
        "module.exports = require('from-node-modules');\n",
    )
    .unwrap();
    std::fs::write(
        root.join("web-build/bundle.js"),
        "require('from-web-build');\n",
    )
    .unwrap();
    std::fs::write(root.join(".snackdepsignore"), "# build output\nweb-build/**\n").unwrap();

    scan()
        .arg(root)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("expo-constants"))
        .stdout(predicate::str::contains("from-node-modules").not())
        .stdout(predicate::str::contains("from-web-build").not());

    scan()
        .arg(root)
        .args(["--include-node-modules", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-node-modules"));
}

#[test]
fn scan_empty_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    scan()
        .arg(tmp.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No source files found"));
}

#[test]
fn scan_format_from_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("App.js"), "import 'react';\n").unwrap();
    std::fs::write(
        tmp.path().join(".snackdeps.toml"),
        "[defaults]\nformat = \"text\"\nquiet = true\n",
    )
    .unwrap();

    scan()
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Snack Dependency Report"))
        .stderr(predicate::str::contains("Scanned").not());
}
