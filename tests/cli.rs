use std::path::Path;
use std::process::{Command, Output};

use mockito::Matcher;

const COMPARE_PATH: &str = "/api/v4/projects/7/repository/compare";

fn branchdiff(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_branchdiff"));
    cmd.args(args)
        .current_dir(dir)
        .env_remove("GITLAB_API_TOKEN")
        .env_remove("GITLAB_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

const BRANCH_ARGS: [&str; 6] = [
    "--project-id",
    "7",
    "--source-branch",
    "feature/login",
    "--target-branch",
    "main",
];

#[test]
fn missing_token_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();
    let url = format!("{}/api/v4", server.url());

    let output = branchdiff(dir.path(), &BRANCH_ARGS, &[("GITLAB_URL", url.as_str())]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GITLAB_API_TOKEN"), "stderr: {stderr}");
    mock.assert();
}

#[test]
fn prints_pretty_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", COMPARE_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "feature/login".into()),
            Matcher::UrlEncoded("to".into(), "main".into()),
            Matcher::UrlEncoded("straight".into(), "false".into()),
        ]))
        .match_header("private-token", "glpat-cli")
        .with_status(200)
        .with_body(
            r#"{"diffs": [
                {"old_path": "a.txt", "new_path": "a.txt", "new_file": false, "renamed_file": false, "deleted_file": false},
                {"old_path": "", "new_path": "b.py", "new_file": true, "renamed_file": false, "deleted_file": false},
                {"old_path": "old.rs", "new_path": "old.rs", "new_file": false, "renamed_file": false, "deleted_file": true}
            ]}"#,
        )
        .create();
    let url = format!("{}/api/v4", server.url());

    let output = branchdiff(
        dir.path(),
        &BRANCH_ARGS,
        &[("GITLAB_API_TOKEN", "glpat-cli"), ("GITLAB_URL", url.as_str())],
    );
    mock.assert();

    assert!(
        output.status.success(),
        "branchdiff failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("{\n  \"all_files\": ["));

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["all_files"], serde_json::json!(["a.txt", "b.py", "old.rs"]));
    assert_eq!(report["added_and_changed_files"], serde_json::json!(["a.txt", "b.py"]));
    assert_eq!(report["added_files"], serde_json::json!(["b.py"]));
    assert_eq!(report["changed_files"], serde_json::json!(["a.txt"]));
    assert_eq!(report["deleted_files"], serde_json::json!(["old.rs"]));
    assert_eq!(report["renamed_files"], serde_json::json!([]));
    assert_eq!(report["type_changed_files"], serde_json::json!(["b.py"]));
    assert_eq!(report["any_deleted"], serde_json::json!(true));
    assert_eq!(report["any_renamed"], serde_json::json!(false));
    assert_eq!(report["only_changed"], serde_json::json!(false));
    assert_eq!(report.as_object().unwrap().len(), 15);
}

#[test]
fn straight_flag_and_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", COMPARE_PATH)
        .match_query(Matcher::UrlEncoded("straight".into(), "true".into()))
        .with_status(200)
        .with_body(r#"{"diffs": [{"old_path": "x.txt", "new_path": "x.md", "renamed_file": true}]}"#)
        .create();
    let url = format!("{}/api/v4", server.url());

    let mut args = BRANCH_ARGS.to_vec();
    args.extend(["--straight", "--format", "text"]);
    let output = branchdiff(
        dir.path(),
        &args,
        &[("GITLAB_API_TOKEN", "glpat-cli"), ("GITLAB_URL", url.as_str())],
    );
    mock.assert();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Renamed (1):\n  x.md"));
    assert!(stdout.contains("Type changed (1):\n  x.md"));
}

#[test]
fn failed_comparison_names_both_branches() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", COMPARE_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "404 Project Not Found"}"#)
        .create();
    let url = format!("{}/api/v4", server.url());

    let output = branchdiff(
        dir.path(),
        &BRANCH_ARGS,
        &[("GITLAB_API_TOKEN", "glpat-cli"), ("GITLAB_URL", url.as_str())],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("feature/login"), "stderr: {stderr}");
    assert!(stderr.contains("main"));
    assert!(stderr.contains("Project Not Found"));
}

#[test]
fn empty_branch_is_rejected_without_request() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();
    let url = format!("{}/api/v4", server.url());

    let output = branchdiff(
        dir.path(),
        &["--project-id", "7", "--target-branch", "main"],
        &[("GITLAB_API_TOKEN", "glpat-cli"), ("GITLAB_URL", url.as_str())],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--source-branch"), "stderr: {stderr}");
    mock.assert();
}

#[test]
fn config_file_sets_url_and_token_variable() {
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", COMPARE_PATH)
        .match_query(Matcher::Any)
        .match_header("private-token", "job-token")
        .with_status(200)
        .with_body(r#"{"diffs": []}"#)
        .create();

    std::fs::write(
        dir.path().join(".branchdiff.toml"),
        format!(
            "[gitlab]\nbase_url = \"{}/api/v4\"\ntoken_env = \"CI_TOKEN\"\n",
            server.url()
        ),
    )
    .unwrap();

    let output = branchdiff(dir.path(), &BRANCH_ARGS, &[("CI_TOKEN", "job-token")]);
    mock.assert();

    assert!(
        output.status.success(),
        "branchdiff failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["all_files"], serde_json::json!([]));
    assert_eq!(report["only_added"], serde_json::json!(true));
}
