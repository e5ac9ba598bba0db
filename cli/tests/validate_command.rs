use serde_json::Value;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;

fn binary() -> PathBuf {
    let name = "bookkeeper";
    if let Ok(path) = env::var(format!("CARGO_BIN_EXE_{}", name)) {
        return PathBuf::from(path);
    }
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(&manifest_dir)
        .parent()
        .map(|p| p.join("target").join("debug").join(name))
        .filter(|p| p.exists())
        .unwrap_or_else(|| panic!("Could not find {} binary. Run `cargo build` first.", name))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary())
        .args(["--config", "/nonexistent/bookkeeper.toml"])
        .args(args)
        .env_remove("BOOKKEEPER_FORMAT")
        .env_remove("BOOKKEEPER_MAX_REQUEST_BYTES")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run binary")
}

fn request_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

#[test]
fn validate_prints_canonical_request() {
    let file = request_file(
        r#"{
            "repoURL": "  https://github.com/akuity/foobar  ",
            "repoCreds": { "password": "  foobar  " },
            "ref": "  1abcdef2 ",
            "targetBranch": "  refs/heads/env/dev  ",
            "images": [" akuity/some-image "]
        }"#,
    );

    let out = run(&["validate", file.path().to_str().unwrap()]);
    assert!(out.status.success(), "exit status: {:?}", out.status);

    let canonical: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(canonical["repoURL"], "https://github.com/akuity/foobar");
    assert_eq!(canonical["repoCreds"]["password"], "foobar");
    assert_eq!(canonical["ref"], "1abcdef2");
    assert_eq!(canonical["targetBranch"], "env/dev");
    assert_eq!(canonical["images"][0], "akuity/some-image");
}

#[test]
fn validate_reads_stdin() {
    let mut child = Command::new(binary())
        .args(["--config", "/nonexistent/bookkeeper.toml", "validate", "-"])
        .env_remove("BOOKKEEPER_FORMAT")
        .env_remove("BOOKKEEPER_MAX_REQUEST_BYTES")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run binary");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(
            br#"{"repoURL":"git@github.com:akuity/foobar.git","repoCreds":{"password":"x"},"targetBranch":"main"}"#,
        )
        .unwrap();

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "exit status: {:?}", out.status);
    let canonical: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(canonical["targetBranch"], "main");
}

#[test]
fn validate_rejection_exits_with_two() {
    let file = request_file(r#"{ "repoURL": "foobar" }"#);

    let out = run(&["validate", file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("does not appear to be a valid git repository URL"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn validate_rejection_as_json() {
    let file = request_file(r#"{ "repoURL": "https://github.com/akuity/foobar" }"#);

    let out = run(&["--format", "json", "validate", file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["kind"], "MissingField");
    assert_eq!(body["field"], "RepoCreds.Password");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("RepoCreds.Password is a required field"));
    assert_eq!(body["code"], 400);
}

#[test]
fn validate_malformed_json_exits_with_one() {
    let file = request_file("{ not json");

    let out = run(&["validate", file.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed to parse render request JSON"), "stderr: {}", stderr);
}

#[test]
fn validate_payload_over_limit_exits_with_one() {
    let file = request_file(&format!(r#"{{ "repoURL": "{}" }}"#, "a".repeat(200)));

    let out = run(&[
        "--max-request-bytes",
        "64",
        "validate",
        file.path().to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("byte limit"), "stderr: {}", stderr);
}

#[test]
fn check_branch_strips_prefix() {
    let out = run(&["check-branch", "refs/heads/env/dev"]);
    assert!(out.status.success(), "exit status: {:?}", out.status);
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "env/dev");
}

#[test]
fn check_branch_explains_rule() {
    let out = run(&["check-branch", "env/dev*"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("is an invalid branch name"), "stderr: {}", stderr);
    assert!(stderr.contains("must not contain '*'"), "stderr: {}", stderr);
}

#[test]
fn check_url_json_output() {
    let out = run(&["--format", "json", "check-url", "ssh://git@github.com/akuity/foobar.git"]);
    assert!(out.status.success(), "exit status: {:?}", out.status);
    let body: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(body["repoURL"], "ssh://git@github.com/akuity/foobar.git");
}

#[test]
fn invalid_format_flag_fails() {
    let out = run(&["--format", "yaml", "check-url", "https://github.com/akuity/foobar"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Invalid output format"), "stderr: {}", stderr);
}
