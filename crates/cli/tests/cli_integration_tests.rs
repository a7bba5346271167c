//! CLI integration tests
//!
//! Drive the `hashstore` binary against a temporary store and files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn hashstore(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hashstore"))
        .current_dir(dir.path())
        .env_remove("HASHSTORE_CONFIG_FILE")
        .env("HASHSTORE_DB_PATH", dir.path().join("store.sqlite"))
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("failed to execute hashstore")
}

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_same_content_same_id() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.txt", b"abc");
    let b = write(&dir, "b.txt", b"abc");
    let c = write(&dir, "c.txt", b"abd");

    let output = hashstore(&dir, &["--save", arg(&a), arg(&b), arg(&c)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    let ids: Vec<&str> = lines.iter().map(|l| l.split('\t').next().unwrap()).collect();
    assert_eq!(ids[0], ids[1]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn test_rename_then_verify() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "notes.txt", b"abc");

    let output = hashstore(&dir, &["--rename", arg(&file)]);
    assert!(output.status.success());
    let line = stdout_lines(&output).remove(0);
    let (id, renamed) = line.split_once('\t').unwrap();
    assert_eq!(PathBuf::from(renamed), dir.path().join(format!("notes_[#{id}].txt")));
    assert!(!file.exists());

    let output = hashstore(&dir, &["--verify", renamed]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![format!("OK\t{renamed}")]);

    fs::write(renamed, b"tampered").unwrap();
    let output = hashstore(&dir, &["--verify", renamed]);
    assert_eq!(stdout_lines(&output), vec![format!("ERROR\t{renamed}")]);
}

#[test]
fn test_verify_untagged_is_unknown() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "plain.txt", b"abc");

    let output = hashstore(&dir, &["--verify", arg(&file)]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![format!("UNKNOWN\t{}", file.display())]);
}

#[test]
fn test_missing_file_aborts_run() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let present = write(&dir, "present.txt", b"abc");

    let output = hashstore(&dir, &[arg(&missing), arg(&present)]);
    assert!(!output.status.success());
    assert!(stdout_lines(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("IO_ERROR"));
}

#[test]
fn test_keep_going_continues_after_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let present = write(&dir, "present.txt", b"abc");

    let output = hashstore(&dir, &["--keep-going", arg(&missing), arg(&present)]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_lines(&output).len(), 1);
    assert!(String::from_utf8_lossy(&output.stderr).contains("FAILED"));
}
