use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup(root: &Path, max: usize) {
    write(
        root,
        "config.toml",
        &format!(
            r#"
version = 1
[profiles.default]
sources = "sources.json"
stack_id = "s1"

[batch]
max_combinations = {max}
"#
        ),
    );
    write(
        root,
        "sources.json",
        r#"[
  {"name": "animal", "scope": "stack", "stackId": "s1", "value": ["cat", "dog"]},
  {"name": "style", "scope": "stack", "stackId": "s1",
   "value": [{"label": "ink", "enable": true}, {"label": "clay", "enable": true}]},
  {"name": "brand", "scope": "stack", "stackId": "s1", "value": {"name": "Acme"}}
]"#,
    );
}

fn svx(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("svx"));
    cmd.arg("--config").arg(root.join("config.toml"));
    cmd
}

const TEMPLATE: &str = "{{source:animal}} in {{source:style}} by {{source:brand.name}}";

#[test]
fn expand_from_template_references() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 100);

    let assert = svx(tmp.path()).args(["expand", "--text", TEMPLATE]).assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    insta::assert_snapshot!(out, @r"
    # 1 animal=cat style=ink
    cat in ink by Acme
    # 2 animal=cat style=clay
    cat in clay by Acme
    # 3 animal=dog style=ink
    dog in ink by Acme
    # 4 animal=dog style=clay
    dog in clay by Acme
    ");
}

#[test]
fn expand_with_vars_file_as_json() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 100);
    write(tmp.path(), "vars.json", r#"[{"name": "animal", "value": ["owl"]}]"#);

    svx(tmp.path())
        .args(["expand", "--json", "--text", TEMPLATE, "--vars"])
        .arg(tmp.path().join("vars.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""prompt": "owl in ink, clay by Acme""#))
        .stdout(predicate::str::contains(r#""animal": "owl""#));
}

#[test]
fn expand_rejects_over_ceiling() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 3);

    svx(tmp.path())
        .args(["expand", "--text", TEMPLATE])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("batch would generate 4 prompts, above the limit of 3"));
}

#[test]
fn expand_max_flag_overrides_config() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 3);

    svx(tmp.path())
        .args(["expand", "--max", "4", "--text", TEMPLATE])
        .assert()
        .success()
        .stdout(predicate::str::contains("# 4 animal=dog style=clay"));
}

#[test]
fn expand_without_varying_sources() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 100);

    svx(tmp.path())
        .args(["expand", "--text", "by {{source:brand.name}}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing generated"));
}

#[test]
fn count_prints_product() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 3);

    svx(tmp.path())
        .args(["count", "--text", TEMPLATE])
        .assert()
        .success()
        .stdout("4\n")
        .stderr(predicate::str::contains("exceeds the configured limit of 3"));
}

#[test]
fn expand_keeps_indexed_reference_to_varied_source() {
    let tmp = tempdir().unwrap();
    setup(tmp.path(), 100);

    svx(tmp.path())
        .args(["expand", "--text", "{{source:animal}} vs {{source:animal[1]}}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cat vs dog"))
        .stdout(predicate::str::contains("dog vs dog"))
        .stdout(predicate::str::contains("{{source:animal[1]}}").not());
}
