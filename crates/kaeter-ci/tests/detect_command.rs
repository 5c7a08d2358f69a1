use std::fs;
use std::path::Path;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

macro_rules! kaeter_ci {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("kaeter-ci")
    };
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().expect("has parent")).expect("create dirs");
    fs::write(full, content).expect("write file");
}

fn commit_all(repo: &git2::Repository, message: &str) {
    let mut index = repo.index().expect("open index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("stage files");
    index
        .update_all(["*"], None)
        .expect("stage removals");
    index.write().expect("write index");

    let sig = git2::Signature::now("Test", "test@example.com").expect("signature");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit");
}

/// Two commits where the second only removes a file from the `deploy`
/// module, so no bazel query is needed.
fn create_repo_with_removal() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let repo = git2::Repository::init(dir.path()).expect("init repo");

    write(dir.path(), "deploy/versions.yaml", "id: ch.open:deploy\ntype: Makefile\n");
    write(dir.path(), "deploy/notes.txt", "obsolete\n");
    write(dir.path(), "svc/api/versions.yaml", "id: ch.open:api\ntype: Makefile\n");
    write(dir.path(), "charts/deploy/Chart.yaml", "name: deploy\n");
    commit_all(&repo, "Initial commit");

    fs::remove_file(dir.path().join("deploy/notes.txt")).expect("remove file");
    commit_all(&repo, "[deploy][cleanup] Drop notes");

    dir
}

#[test]
fn detect_writes_json_to_stdout() {
    let repo = create_repo_with_removal();

    kaeter_ci!()
        .args(["detect", "--previous", "HEAD~1", "--latest", "HEAD"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(contains("\"deploy/notes.txt\""))
        .stdout(contains("\"ch.open:deploy\""))
        .stdout(contains("\"ch.open:api\"").not())
        .stdout(contains("\"cleanup\""))
        .stdout(contains("pullRequest").not());
}

#[test]
fn detect_writes_yaml_output_file() {
    let repo = create_repo_with_removal();
    let out = TempDir::new().expect("create temp dir");
    let output = out.path().join("result.yaml");

    kaeter_ci!()
        .args(["detect", "--previous", "HEAD~1", "--latest", "HEAD", "--format", "yaml"])
        .arg("--output")
        .arg(&output)
        .args(["--pr-title", "Drop notes", "--pr-body", "No longer needed"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicates::str::is_empty());

    let document = fs::read_to_string(&output).expect("read output");
    assert!(document.contains("- deploy/notes.txt"));
    assert!(document.contains("ch.open:deploy"));
    assert!(document.contains("pullRequest:"));
    assert!(document.contains("title: Drop notes"));
}

#[test]
fn detect_outside_repository_fails_in_files_checker() {
    let dir = TempDir::new().expect("create temp dir");
    let output = dir.path().join("result.json");

    kaeter_ci!()
        .args(["detect", "--previous", "HEAD~1", "--latest", "HEAD"])
        .arg("--output")
        .arg(&output)
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(contains("error: detection failed"))
        .stderr(contains("caused by: files checker failed"));

    assert!(!output.exists());
}

#[test]
fn detect_with_missing_bazel_fails_without_output() {
    let repo = create_repo_with_removal();
    let git = git2::Repository::open(repo.path()).expect("open repo");
    write(repo.path(), "svc/api/main.go", "package main\n");
    commit_all(&git, "Add api entry point");
    let output = repo.path().join("result.json");

    kaeter_ci!()
        .args(["detect", "--previous", "HEAD~1", "--latest", "HEAD"])
        .args(["--bazel", "kaeter-ci-missing-bazel"])
        .arg("--output")
        .arg(&output)
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("caused by: bazel checker failed"))
        .stderr(contains("kaeter-ci-missing-bazel"));

    assert!(!output.exists());
}

#[test]
fn detect_requires_revisions() {
    kaeter_ci!()
        .arg("detect")
        .assert()
        .failure()
        .stderr(contains("--previous"));
}

#[test]
fn invalid_log_level_is_reported() {
    let repo = create_repo_with_removal();

    kaeter_ci!()
        .args(["--log-level", "kaeter=loud", "modules"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(contains("invalid log filter"));
}
