use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn batchren() -> Command {
    let mut cmd = Command::cargo_bin("batchren").unwrap();
    cmd.env_remove("BATCHREN_YES")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn photos() -> TempDir {
    let temp = TempDir::new().unwrap();
    temp.child("IMG_0001.jpg").write_str("one").unwrap();
    temp.child("IMG_0002.jpg").write_str("two").unwrap();
    temp.child("notes.txt").write_str("text").unwrap();
    temp
}

#[test]
fn test_help_command() {
    batchren()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rule-based batch renaming of files and folders",
        ));
}

#[test]
fn test_version_command() {
    batchren()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("batchren"));
}

#[test]
fn test_preview_does_not_rename() {
    let temp = photos();

    batchren()
        .arg("preview")
        .arg(temp.path())
        .args(["--replace", "IMG=photo", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[PREVIEW SUMMARY]"))
        .stdout(predicate::str::contains("IMG_0001.jpg -> photo_0001.jpg"))
        .stdout(predicate::str::contains("Will rename: 2"));

    temp.child("IMG_0001.jpg").assert(predicate::path::exists());
    temp.child("photo_0001.jpg").assert(predicate::path::missing());
}

#[test]
fn test_preview_json_output() {
    let temp = photos();

    let output = batchren()
        .arg("preview")
        .arg(temp.path())
        .args(["--ext", "jpg", "--prefix", "2024_", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "preview");
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["will_rename"], 2);
    assert_eq!(json["entries"][0]["proposed_name"], "2024_IMG_0001.jpg");
}

#[test]
fn test_fixed_width_needs_table_preview() {
    let temp = photos();

    batchren()
        .arg("preview")
        .arg(temp.path())
        .args(["--preview", "summary", "--fixed-table-width"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--fixed-table-width"));
}

#[test]
fn test_apply_with_yes_renames() {
    let temp = photos();

    batchren()
        .arg("apply")
        .arg(temp.path())
        .args(["--ext", "jpg", "--replace", "IMG_=img-", "--preview", "none", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 2 entries"));

    temp.child("img-0001.jpg").assert(predicate::path::exists());
    temp.child("img-0002.jpg").assert(predicate::path::exists());
    temp.child("IMG_0001.jpg").assert(predicate::path::missing());
    temp.child("notes.txt").assert(predicate::path::exists());
}

#[test]
fn test_apply_without_terminal_needs_yes() {
    let temp = photos();

    batchren()
        .arg("apply")
        .arg(temp.path())
        .args(["--suffix", "_x", "--preview", "none"])
        .write_stdin("y\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --yes"));

    temp.child("notes.txt").assert(predicate::path::exists());
    temp.child("notes_x.txt").assert(predicate::path::missing());
}

#[test]
fn test_apply_skips_conflicts() {
    let temp = TempDir::new().unwrap();
    temp.child("x.txt").write_str("x").unwrap();
    temp.child("y.txt").write_str("y").unwrap();

    batchren()
        .arg("apply")
        .arg(temp.path())
        .args(["--replace", "x=z", "--replace", "y=z", "--preview", "none", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped 2 conflicting entries"));

    temp.child("x.txt").assert(predicate::path::exists());
    temp.child("y.txt").assert(predicate::path::exists());
}

#[test]
fn test_generate_preview_only() {
    let temp = photos();

    batchren()
        .arg("generate")
        .arg(temp.path())
        .args(["--no-folders", "-t", "file_{n}{ext}", "--preview", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("IMG_0001.jpg -> file_001.jpg"))
        .stdout(predicate::str::contains("notes.txt -> file_003.txt"));

    temp.child("file_001.jpg").assert(predicate::path::missing());
}

#[test]
fn test_generate_apply() {
    let temp = photos();

    batchren()
        .arg("generate")
        .arg(temp.path())
        .args(["-t", "{n}{ext}", "--padding", "2", "--apply", "--yes", "--preview", "none"])
        .assert()
        .success();

    temp.child("01.jpg").assert(predicate::path::exists());
    temp.child("02.jpg").assert(predicate::path::exists());
    temp.child("03.txt").assert(predicate::path::exists());
}

#[test]
fn test_generate_rejects_oversized_padding() {
    let temp = photos();

    batchren()
        .arg("generate")
        .arg(temp.path())
        .args(["-t", "{n}{ext}", "--padding", "70000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("70000"));

    temp.child("IMG_0001.jpg").assert(predicate::path::exists());
}

#[test]
fn test_generate_rejects_oversized_config_padding() {
    let temp = photos();
    temp.child(".batchren/config.toml")
        .write_str("[defaults]\nindex_padding = 70000\n")
        .unwrap();

    batchren()
        .current_dir(temp.path())
        .args(["generate", ".", "-t", "{n}{ext}", "--no-hidden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 32"));
}

#[test]
fn test_generate_rejects_bad_template() {
    let temp = photos();

    batchren()
        .arg("generate")
        .arg(temp.path())
        .args(["-t", "{nope}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template"));
}

#[test]
fn test_check_valid_rules() {
    let temp = TempDir::new().unwrap();
    let rules = temp.child("rules.toml");
    rules
        .write_str(
            r#"
[[rules]]
kind = "add_prefix"
text = "2024_"

[[rules]]
kind = "case_change"
mode = "lower"
enabled = false
"#,
        )
        .unwrap();

    batchren()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rules (1 enabled)"));
}

#[test]
fn test_check_invalid_rules() {
    let temp = TempDir::new().unwrap();
    let rules = temp.child("rules.json");
    rules
        .write_str(r#"{"rules": [{"kind": "delete_chars", "start": 5, "end": 2}]}"#)
        .unwrap();

    batchren()
        .arg("check")
        .arg("--rules")
        .arg(rules.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 invalid rules"));
}

#[test]
fn test_missing_directory() {
    let temp = TempDir::new().unwrap();

    batchren()
        .arg("preview")
        .arg(temp.path().join("nowhere"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_session_script() {
    let temp = photos();

    batchren()
        .arg("session")
        .arg(temp.path())
        .args(["--ext", "txt"])
        .write_stdin("add case upper\napply\ny\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 1 entries"));

    let names: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"NOTES.txt".to_string()));
}

#[test]
fn test_completions() {
    batchren()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batchren"));
}
