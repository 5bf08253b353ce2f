use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch layout: `<tmp>/work` is the working directory and `<tmp>/home`
/// stands in for `$HOME`, so the default `../.bkpfile` lands in `<tmp>`.
struct Sandbox {
    temp: TempDir,
    work: PathBuf,
    home: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        let home = temp.path().join("home");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir_all(&home).unwrap();
        Self { temp, work, home }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bkpfile").unwrap();
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env_remove("BKPFILE_CONFIG")
            .env_remove("BKPFILE_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn backup_root(&self) -> PathBuf {
        self.temp.path().join(".bkpfile")
    }

    fn backup_names(&self) -> Vec<String> {
        let root = self.backup_root();
        if !root.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.work.join(name), contents).unwrap();
    }
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

#[test]
fn creates_backup_with_note() {
    let sandbox = Sandbox::new();
    sandbox.write("notes.txt", "hello");

    sandbox
        .cmd()
        .args(["notes.txt", "v1"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Created backup: ../.bkpfile/notes.txt-"))
        .stdout(predicate::str::contains("=v1"));

    let names = sandbox.backup_names();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("notes.txt-"));
    assert!(names[0].ends_with("=v1"));
    assert_eq!(
        fs::read_to_string(sandbox.backup_root().join(&names[0])).unwrap(),
        "hello"
    );
}

#[test]
fn identical_file_is_not_backed_up_again() {
    let sandbox = Sandbox::new();
    sandbox.write("notes.txt", "hello");

    sandbox.cmd().args(["notes.txt", "v1"]).assert().code(0);
    sandbox
        .cmd()
        .args(["notes.txt", "v2"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("File is identical to existing backup:"))
        .stdout(predicate::str::contains("=v1"));

    assert_eq!(sandbox.backup_names().len(), 1);
}

#[test]
fn missing_file_exits_with_not_found_status() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("missing.txt")
        .assert()
        .code(20)
        .stderr(predicate::str::contains("File not found: missing.txt"));
}

#[test]
fn directory_exits_with_invalid_type_status() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.work.join("subdir")).unwrap();

    sandbox.cmd().arg("subdir").assert().code(21);
}

#[test]
fn dry_run_writes_nothing() {
    let sandbox = Sandbox::new();
    sandbox.write("notes.txt", "hello");

    sandbox
        .cmd()
        .args(["notes.txt", "--dry-run"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Would create backup: ../.bkpfile/notes.txt-"));

    assert!(!sandbox.backup_root().exists());
}

#[test]
fn nested_source_is_mirrored() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.work.join("docs")).unwrap();
    sandbox.write("docs/plan.md", "# plan");

    sandbox
        .cmd()
        .arg("./docs/plan.md")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Created backup: ../.bkpfile/docs/plan.md-"));

    assert!(sandbox.backup_root().join("docs").is_dir());
}

#[test]
fn list_shows_backups() {
    let sandbox = Sandbox::new();
    sandbox.write("notes.txt", "hello");
    sandbox.cmd().args(["notes.txt", "v1"]).assert().code(0);
    sandbox.write("notes.txt", "hello world");
    sandbox.cmd().args(["notes.txt", "v2"]).assert().code(0);

    let output = sandbox
        .cmd()
        .args(["--list", "notes.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(stdout.contains("=v1 (created: "));
    assert!(stdout.contains("=v2 (created: "));
}

#[test]
fn list_without_backups() {
    let sandbox = Sandbox::new();
    sandbox.write("notes.txt", "hello");

    sandbox
        .cmd()
        .args(["--list", "notes.txt"])
        .assert()
        .success()
        .stdout("No backups found for notes.txt\n");
}

#[test]
fn local_config_sets_status_codes_and_backup_dir() {
    let sandbox = Sandbox::new();
    write_file(
        &sandbox.work.join(".bkpfile.yml"),
        "backup_dir_path: ./kept\nstatus_file_not_found: 5\n",
    );

    sandbox.cmd().arg("missing.txt").assert().code(5);

    sandbox.write("notes.txt", "hello");
    sandbox
        .cmd()
        .arg("notes.txt")
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("Created backup: kept/notes.txt-"));
    assert!(sandbox.work.join("kept").is_dir());
}

#[test]
fn home_config_is_used_when_no_local_config() {
    let sandbox = Sandbox::new();
    write_file(
        &sandbox.home.join(".bkpfile.yml"),
        "status_invalid_file_type: 42\n",
    );
    fs::create_dir_all(sandbox.work.join("subdir")).unwrap();

    sandbox.cmd().arg("subdir").assert().code(42);
}

#[test]
fn malformed_config_exits_with_config_error() {
    let sandbox = Sandbox::new();
    write_file(&sandbox.work.join(".bkpfile.yml"), "status_disk_full: [1,\n");
    sandbox.write("notes.txt", "hello");

    sandbox
        .cmd()
        .arg("notes.txt")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn show_config_defaults() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("--config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "backup_dir_path: ../.bkpfile (source: default)",
        ))
        .stdout(predicate::str::contains(
            "status_file_not_found: 20 (source: default)",
        ))
        .stdout(predicate::str::contains(
            "use_current_dir_name: true (source: default)",
        ));
}

#[test]
fn show_config_attributes_fields_per_file() {
    let sandbox = Sandbox::new();
    write_file(&sandbox.work.join("a.yml"), "backup_dir_path: /x\n");
    write_file(
        &sandbox.work.join("b.yml"),
        "backup_dir_path: /y\nuse_current_dir_name: false\n",
    );

    sandbox
        .cmd()
        .env("BKPFILE_CONFIG", "a.yml:b.yml")
        .arg("--config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "backup_dir_path: /x (source: ./a.yml)",
        ))
        .stdout(predicate::str::contains(
            "use_current_dir_name: false (source: ./b.yml)",
        ));
}

#[test]
fn show_config_with_malformed_file_fails() {
    let sandbox = Sandbox::new();
    write_file(&sandbox.work.join(".bkpfile.yml"), "status_disk_full: [1,\n");

    sandbox
        .cmd()
        .arg("--config")
        .assert()
        .code(10)
        .stdout(predicate::str::is_empty());
}

#[test]
fn rust_log_raises_verbosity() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .env("RUST_LOG", "debug")
        .arg("--config")
        .assert()
        .success()
        .stderr(predicate::str::contains("Config search path"));
}

#[test]
fn log_level_flag_overrides_rust_log() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .env("RUST_LOG", "debug")
        .args(["--config", "--log-level", "error"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn logging_is_quiet_by_default() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("--config")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn file_path_is_required() {
    let sandbox = Sandbox::new();

    sandbox.cmd().assert().code(2);
}

#[test]
fn version_flag() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
