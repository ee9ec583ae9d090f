use assert_cmd::Command;
use predicates::prelude::*;

fn config_show(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("snack-deps").unwrap();
    cmd.args(["config", "show", "--path"])
        .arg(dir)
        .env_remove("SNACK_DEPS_FORMAT")
        .env_remove("SNACK_DEPS_QUIET")
        .env_remove("SNACK_DEPS_VERSIONS");
    cmd
}

#[test]
fn config_show_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    config_show(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.quiet: false <- default"))
        .stdout(predicate::str::contains("extract.versions: true <- default"))
        .stdout(predicate::str::contains("targeting.include: (all) <- default"));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".snackdeps.toml"),
        r#"
[defaults]
format = "text"

[extract]
versions = false
"#,
    )
    .unwrap();

    config_show(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".snackdeps.toml"))
        .stdout(predicate::str::contains(
            "defaults.format: text <- project config",
        ))
        .stdout(predicate::str::contains(
            "extract.versions: false <- project config",
        ));
}

#[test]
fn config_show_env_var() {
    let tmp = tempfile::tempdir().unwrap();
    config_show(tmp.path())
        .env("SNACK_DEPS_QUIET", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.quiet: true <- env var (SNACK_DEPS_QUIET)",
        ));
}

#[test]
fn config_show_invalid_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".snackdeps.toml"), "[defaults\n").unwrap();
    config_show(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn config_show_file_only() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".snackdeps.toml"), "").unwrap();
    config_show(tmp.path())
        .arg("--file-only")
        .assert()
        .success()
        .stdout(predicate::str::ends_with(".snackdeps.toml\n"));
}
