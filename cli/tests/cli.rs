use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn onescript(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("onescript").expect("Binary exists");
    cmd.current_dir(root)
        .env_remove("ONESCRIPT_PROJECT")
        .env("NO_COLOR", "1");
    cmd
}

/// Creates a project with one main file and two module files.
fn init_project(root: &Path) {
    onescript(root)
        .args(["init", "--file", "core.js", "--dir", "ext"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created"));

    fs::write(root.join("src/core.js"), "var core = {};\n").unwrap();
    fs::write(root.join("src/ext/b.js"), "core.b = 2;\n").unwrap();
    fs::write(root.join("src/ext/a.js"), "core.a = 1;\n").unwrap();
}

#[test]
fn init_writes_descriptor_and_skeleton() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());

    let descriptor: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("onescript.json")).unwrap())
            .unwrap();
    assert_eq!(descriptor["Files"], serde_json::json!(["core.js"]));
    assert_eq!(descriptor["Directories"], serde_json::json!(["ext"]));
    assert_eq!(descriptor["OutputFile"], "onescript.js");
    assert!(tmp.path().join("src/ext").is_dir());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());

    onescript(tmp.path())
        .arg("init")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already exists"));

    onescript(tmp.path())
        .args(["init", "--force", "--output", "bundle.js"])
        .assert()
        .success();
    let content = fs::read_to_string(tmp.path().join("onescript.json")).unwrap();
    assert!(content.contains("\"OutputFile\": \"bundle.js\""));
}

#[test]
fn build_writes_then_reports_unchanged() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());

    onescript(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built dist/onescript.js"));

    let artifact = fs::read_to_string(tmp.path().join("dist/onescript.js")).unwrap();
    let core = artifact.find("var core").unwrap();
    let a = artifact.find("core.a").unwrap();
    let b = artifact.find("core.b").unwrap();
    assert!(core < a && a < b);

    onescript(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}

#[test]
fn build_with_missing_main_file_exits_unreadable() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());
    fs::remove_file(tmp.path().join("src/core.js")).unwrap();

    onescript(tmp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("src/core.js"));
    assert!(!tmp.path().join("dist").exists());
}

#[test]
fn missing_descriptor_exits_unreadable() {
    let tmp = tempdir().unwrap();
    onescript(tmp.path()).arg("build").assert().code(2);
}

#[test]
fn invalid_descriptor_exits_invalid() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("onescript.json"), "{ not json").unwrap();
    onescript(tmp.path())
        .arg("show")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn print_mode_serves_with_content_type() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());

    onescript(tmp.path())
        .args(["build", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Content-type: text/javascript\n\n"))
        .stdout(predicate::str::contains("core.a = 1;"));
}

#[test]
fn files_json_lists_load_order() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());

    let output = onescript(tmp.path())
        .args(["files", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: Value = serde_json::from_slice(&output.stdout).unwrap();
    let paths: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["src/core.js", "src/ext/a.js", "src/ext/b.js"]);
    assert_eq!(listing[0]["role"], "main");
    assert_eq!(listing[1]["role"], "module");
}

#[test]
fn project_can_come_from_environment() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());
    let elsewhere = tempdir().unwrap();

    onescript(elsewhere.path())
        .env("ONESCRIPT_PROJECT", tmp.path())
        .arg("build")
        .assert()
        .success();
    assert!(tmp.path().join("dist/onescript.js").is_file());
}

#[test]
fn deploy_copies_dist_directory() {
    let tmp = tempdir().unwrap();
    init_project(tmp.path());
    onescript(tmp.path()).arg("build").assert().success();

    let dest = tempdir().unwrap();
    let target = dest.path().join("public");
    onescript(tmp.path())
        .arg("deploy")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 file(s)"));

    assert_eq!(
        fs::read_to_string(target.join("onescript.js")).unwrap(),
        fs::read_to_string(tmp.path().join("dist/onescript.js")).unwrap()
    );
}

#[test]
fn completion_prints_script() {
    let tmp = tempdir().unwrap();
    onescript(tmp.path())
        .args(["completion", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("onescript"));
}
