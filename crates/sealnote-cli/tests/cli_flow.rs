use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sealnote"))
}

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    /// A store path and a config with cheap KDF settings, isolated from $HOME.
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = "[kdf]\nmemory_kib = 64\niterations = 1\nparallelism = 1\n";
        std::fs::write(dir.path().join("config.toml"), config).expect("write config");
        Self { dir }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("notes.sealnote")
    }

    fn command(&self, passphrase: Option<&str>) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("SEALNOTE_PATH", self.store())
            .env("SEALNOTE_CONFIG", self.dir.path().join("config.toml"))
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env_remove("SEALNOTE_PASSPHRASE")
            .env_remove("SEALNOTE_NEW_PASSPHRASE")
            .env_remove("SEALNOTE_LOG")
            .stdin(Stdio::null());
        if let Some(passphrase) = passphrase {
            cmd.env("SEALNOTE_PASSPHRASE", passphrase);
        }
        cmd
    }

    fn run(&self, passphrase: Option<&str>, args: &[&str]) -> Output {
        self.command(passphrase)
            .args(args)
            .output()
            .expect("run sealnote")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn add(env: &TestEnv, passphrase: &str, title: &str, body: &str) {
    let output = env.run(
        Some(passphrase),
        &["add", "--no-input", "--title", title, "--body", body],
    );
    assert!(output.status.success(), "add failed: {}", stderr(&output));
}

#[test]
fn test_add_list_show_flow() {
    let env = TestEnv::new();
    assert!(!env.store().exists());

    add(&env, "pw-123456", "Groceries", "milk\neggs");
    add(&env, "pw-123456", "Ideas", "write more rust");
    assert!(env.store().exists());

    let list = env.run(Some("pw-123456"), &["list", "--no-input"]);
    assert!(list.status.success(), "{}", stderr(&list));
    assert_eq!(stdout(&list), "1. Groceries\n2. Ideas\n");

    let show = env.run(Some("pw-123456"), &["show", "1", "--no-input"]);
    assert!(show.status.success());
    assert_eq!(stdout(&show), "Groceries\n\nmilk\neggs\n");
}

#[test]
fn test_store_file_is_encrypted() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "MARKER_TITLE", "MARKER_BODY");

    let on_disk = std::fs::read(env.store()).expect("read store");
    assert_eq!(&on_disk[..4], b"SNTE");
    let haystack = String::from_utf8_lossy(&on_disk);
    assert!(!haystack.contains("MARKER_TITLE"));
    assert!(!haystack.contains("MARKER_BODY"));
}

#[test]
fn test_wrong_password_exit_code() {
    let env = TestEnv::new();
    add(&env, "right-password", "T", "B");

    let output = env.run(Some("wrong-password"), &["list", "--no-input"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("Wrong password or corrupt store file"));
}

#[test]
fn test_json_list() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "One", "first");

    let output = env.run(Some("pw-123456"), &["list", "--json", "--no-input"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value[0]["number"], 1);
    assert_eq!(value[0]["title"], "One");
    assert_eq!(value[0]["body"], "first");
}

#[test]
fn test_list_missing_store_needs_no_password() {
    let env = TestEnv::new();

    let output = env.run(None, &["list", "--no-input"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No notes yet."));
    assert!(!env.store().exists());
}

#[test]
fn test_edit_replaces_note() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "Old", "old body");

    let output = env.run(
        Some("pw-123456"),
        &["edit", "1", "--no-input", "--title", "New"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let show = env.run(Some("pw-123456"), &["show", "1", "--no-input"]);
    assert_eq!(stdout(&show), "New\n\nold body\n");
}

#[test]
fn test_remove_requires_yes_without_tty() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "Keep", "body");
    let before = std::fs::read(env.store()).expect("read store");

    let refused = env.run(Some("pw-123456"), &["remove", "1", "--no-input"]);
    assert_eq!(refused.status.code(), Some(4));
    assert_eq!(std::fs::read(env.store()).expect("read store"), before);

    let removed = env.run(Some("pw-123456"), &["remove", "1", "--yes", "--no-input"]);
    assert!(removed.status.success(), "{}", stderr(&removed));

    let list = env.run(Some("pw-123456"), &["list", "--json", "--no-input"]);
    assert_eq!(stdout(&list).trim(), "[]");
}

#[test]
fn test_out_of_range_does_not_rewrite() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "Only", "note");
    let before = std::fs::read(env.store()).expect("read store");

    let output = env.run(
        Some("pw-123456"),
        &["edit", "7", "--no-input", "--title", "x", "--body", "y"],
    );
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Note 7 does not exist"));
    assert_eq!(std::fs::read(env.store()).expect("read store"), before);
}

#[test]
fn test_empty_fields_rejected() {
    let env = TestEnv::new();

    let output = env.run(
        Some("pw-123456"),
        &["add", "--no-input", "--title", "   ", "--body", "b"],
    );
    assert_eq!(output.status.code(), Some(4));

    // stdin is empty, so the body is empty
    let output = env.run(Some("pw-123456"), &["add", "--no-input", "--title", "T"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(!env.store().exists());
}

#[test]
fn test_body_from_stdin() {
    let env = TestEnv::new();

    let mut child = env
        .command(Some("pw-123456"))
        .args(["add", "--no-input", "--title", "Piped"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sealnote");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"from a pipe\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success(), "{}", stderr(&output));

    let show = env.run(Some("pw-123456"), &["show", "1", "--json", "--no-input"]);
    let value: serde_json::Value = serde_json::from_str(&stdout(&show)).expect("valid json");
    assert_eq!(value["body"], "from a pipe");
}

#[test]
fn test_passwd_rotates_password() {
    let env = TestEnv::new();
    add(&env, "old-password", "T", "B");

    let output = env
        .command(Some("old-password"))
        .env("SEALNOTE_NEW_PASSPHRASE", "new-password")
        .args(["passwd", "--no-input"])
        .output()
        .expect("run passwd");
    assert!(output.status.success(), "{}", stderr(&output));

    let old = env.run(Some("old-password"), &["list", "--no-input"]);
    assert_eq!(old.status.code(), Some(5));
    let new = env.run(Some("new-password"), &["list", "--no-input"]);
    assert!(new.status.success());
    assert_eq!(stdout(&new), "1. T\n");
}

#[test]
fn test_info_reads_header_without_password() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "T", "B");

    let output = env.run(None, &["info", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["format_version"], 2);
    assert_eq!(value["kdf"]["algorithm"], "argon2id");
    assert_eq!(value["kdf"]["memory_kib"], 64);
    assert_eq!(value["salt_bytes"], 16);
}

#[test]
fn test_info_missing_store() {
    let env = TestEnv::new();
    let output = env.run(None, &["info"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_tampered_store_rejected() {
    let env = TestEnv::new();
    add(&env, "pw-123456", "T", "B");

    let mut bytes = std::fs::read(env.store()).expect("read store");
    let middle = bytes.len() - 10;
    bytes[middle] ^= 0x40;
    std::fs::write(env.store(), &bytes).expect("write store");

    let output = env.run(Some("pw-123456"), &["list", "--no-input"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_missing_password_without_tty() {
    let env = TestEnv::new();
    let output = env.run(None, &["add", "--no-input", "--title", "T", "--body", "B"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("SEALNOTE_PASSPHRASE"));
}

#[test]
fn test_store_flag_overrides_env() {
    let env = TestEnv::new();
    let other: &Path = &env.dir.path().join("nested").join("other.sealnote");

    let output = env.run(
        Some("pw-123456"),
        &[
            "--store",
            other.to_str().expect("utf-8 path"),
            "add",
            "--no-input",
            "--title",
            "T",
            "--body",
            "B",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(other.exists());
    assert!(!env.store().exists());
}

#[test]
fn test_completions() {
    let env = TestEnv::new();
    let output = env.run(None, &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("sealnote"));
}
