use std::fs;
use tempfile::TempDir;

use gw_repo::test_helpers::{git_available, ScratchRepo};
use gw_repo::{GitRepo, Identity, RepoError};

#[test]
fn repository_detection_from_nested_dir() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let nested = scratch.path.join("some").join("nested").join("dir");
    fs::create_dir_all(&nested).unwrap();

    let repo = GitRepo::new(&nested).unwrap();
    assert_eq!(
        repo.root().canonicalize().unwrap(),
        scratch.path.canonicalize().unwrap()
    );
}

#[test]
fn repository_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result = GitRepo::new(temp_dir.path());
    assert!(matches!(result, Err(RepoError::RepositoryNotFound(_))));
}

#[test]
fn current_branch_is_main() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "main");
}

#[test]
fn create_and_delete_branch() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    repo.create_branch("feature-test").unwrap();
    assert!(repo.branch_exists("feature-test").unwrap());

    // Creating a branch must not switch to it
    assert_eq!(repo.current_branch().unwrap(), "main");

    repo.delete_branch("feature-test", false).unwrap();
    assert!(!repo.branch_exists("feature-test").unwrap());
}

#[test]
fn create_branch_rejects_invalid_name() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let result = repo.create_branch("invalid branch");
    assert!(matches!(result, Err(RepoError::InvalidBranchName(_))));
}

#[test]
fn create_branch_rejects_protected_name() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let result = repo.create_branch("master");
    assert!(matches!(result, Err(RepoError::ProtectedBranch(_))));
}

#[test]
fn checkout_switches_branch() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    repo.create_branch("feature-co").unwrap();
    repo.checkout("feature-co").unwrap();
    assert_eq!(repo.current_branch().unwrap(), "feature-co");
}

#[test]
fn commit_all_records_identity() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    scratch.write_file("new.txt", "contents\n").unwrap();
    let identity = Identity::new("Committer", "committer@example.com");
    repo.commit_all("Add new file", &identity).unwrap();

    assert!(repo.status_porcelain().unwrap().is_empty());

    let author = scratch.git(&["log", "-1", "--format=%an <%ae>"]).unwrap();
    assert_eq!(author, "Committer <committer@example.com>");

    let subject = scratch.git(&["log", "-1", "--format=%s"]).unwrap();
    assert_eq!(subject, "Add new file");
}

#[test]
fn tag_creates_annotated_tag() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let identity = Identity::new("A", "a@x.com");
    repo.tag("v1.0", &identity, "Release v1.0").unwrap();

    assert!(repo.tag_exists("v1.0").unwrap());
    assert_eq!(repo.tag_message("v1.0").unwrap().as_deref(), Some("Release v1.0"));
    assert_eq!(repo.tagger("v1.0").unwrap().as_deref(), Some("A <a@x.com>"));

    // The tag points at the current HEAD
    let head = repo.rev_parse("HEAD").unwrap();
    let target = repo.rev_parse("v1.0^{commit}").unwrap();
    assert_eq!(head, target);
}

#[test]
fn tag_duplicate_fails() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let identity = Identity::new("A", "a@x.com");
    repo.tag("v1.0", &identity, "first").unwrap();

    let result = repo.tag("v1.0", &identity, "second");
    assert!(matches!(result, Err(RepoError::CommandFailed { .. })));

    // The original tag is untouched
    assert_eq!(repo.tag_message("v1.0").unwrap().as_deref(), Some("first"));
}

#[test]
fn tag_empty_name_fails_inside_git() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let identity = Identity::new("A", "a@x.com");
    let result = repo.tag("", &identity, "message");
    assert!(matches!(result, Err(RepoError::CommandFailed { .. })));
}

#[test]
fn delete_tag_removes_it() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let identity = Identity::new("A", "a@x.com");
    repo.tag("v1.0", &identity, "Release").unwrap();
    assert!(repo.tag_exists("v1.0").unwrap());

    repo.delete_tag("v1.0").unwrap();
    assert!(!repo.tag_exists("v1.0").unwrap());
    assert_eq!(repo.tag_message("v1.0").unwrap(), None);
}

#[test]
fn tag_with_fixed_timestamp() {
    if !git_available() {
        eprintln!("Git not available, skipping test");
        return;
    }

    use chrono::TimeZone;

    let scratch = ScratchRepo::create().unwrap();
    let repo = GitRepo::new(&scratch.path).unwrap();

    let ts = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let identity = Identity::new("A", "a@x.com").with_timestamp(ts);
    repo.tag("v2.0", &identity, "Pinned").unwrap();

    let date = scratch
        .git(&["for-each-ref", "--format=%(taggerdate:iso-strict)", "refs/tags/v2.0"])
        .unwrap();
    assert!(date.starts_with("2024-05-01"));
}
