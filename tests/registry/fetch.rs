//! Fetching the snapshot with git
//!
//! The tests that need git are skipped when it is not installed. They use a repository within a
//! temporary directory as the upstream repository.

#[path = "../common/mod.rs"]
mod common;

use bluenumbers::{Config, Error, FetchError, Fetcher, GitFetcher, Registry, UpdateStatus};
use std::path::Path;
use std::process::Command;

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["-c", "user.name=bluenumbers", "-c", "user.email=bluenumbers@example.com"])
        .args(args)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create an upstream repository with the files of a [`common::Snapshot`]
fn upstream() -> common::Snapshot {
    let snapshot = common::Snapshot::new();

    git(snapshot.path(), &["init", "-q"]);
    git(snapshot.path(), &["add", "."]);
    git(snapshot.path(), &["commit", "-q", "-m", "assigned numbers"]);

    snapshot
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[test]
fn unavailable_git_fails_first_lookup() {
    let dir = tempfile::tempdir().unwrap();

    let config = Config::default()
        .with_snapshot_dir(dir.path().join("bluetooth_sig_public"))
        .with_git(dir.path().join("not-git"));

    let registry = Registry::from_config(config);

    assert!(matches!(
        registry.get_uuid(0x0002),
        Err(Error::Fetch(FetchError::GitUnavailable { .. }))
    ));

    assert!(matches!(
        registry.update(),
        Err(Error::Fetch(FetchError::GitUnavailable { .. }))
    ));

    assert!(!dir.path().join("bluetooth_sig_public").exists());
}

#[test]
fn failed_clone_reports_stderr() {
    if !common::git_available() {
        eprintln!("skipping, git is not available");
        return;
    }

    let dir = tempfile::tempdir().unwrap();

    let fetcher = GitFetcher::new(file_url(&dir.path().join("no-such-repository")), dir.path().join("clone"));

    match fetcher.ensure_present() {
        Err(FetchError::Command { command, stderr }) => {
            assert!(command.contains("clone"));
            assert!(!stderr.is_empty());
        }
        other => panic!("expected a command error, got {:?}", other),
    }
}

#[test]
fn clone_then_update() {
    if !common::git_available() {
        eprintln!("skipping, git is not available");
        return;
    }

    let upstream = upstream();
    let local = tempfile::tempdir().unwrap();
    let clone_dir = local.path().join("nested").join("bluetooth_sig_public");

    let registry = Registry::new(GitFetcher::new(file_url(upstream.path()), &clone_dir));

    assert_eq!(None, registry.revision().unwrap());

    assert_eq!("UDP", registry.get_uuid(0x0002).unwrap().unwrap().name);

    let first = registry.revision().unwrap().unwrap();

    assert_eq!(40, first.as_str().len());

    assert_eq!(UpdateStatus::UpToDate, registry.update().unwrap());

    upstream.write(
        "assigned_numbers/uuids/protocol_identifiers.yaml",
        "uuids:\n  - uuid: 0x0002\n    name: User Datagram Protocol\n",
    );

    git(upstream.path(), &["commit", "-q", "-a", "-m", "rename UDP"]);

    assert_eq!(UpdateStatus::Updated, registry.update().unwrap());

    assert_ne!(first, registry.revision().unwrap().unwrap());

    assert_eq!(
        "User Datagram Protocol",
        registry.get_uuid(0x0002).unwrap().unwrap().name
    );
}

#[test]
fn update_without_snapshot_clones() {
    if !common::git_available() {
        eprintln!("skipping, git is not available");
        return;
    }

    let upstream = upstream();
    let local = tempfile::tempdir().unwrap();

    let fetcher = GitFetcher::new(file_url(upstream.path()), local.path().join("clone"));

    assert_eq!(UpdateStatus::Created, fetcher.update().unwrap());
    assert!(fetcher.snapshot_dir().join("assigned_numbers/core/ad_types.yaml").is_file());
}

/// Write a git wrapper that is slow to clone
#[cfg(unix)]
fn slow_git(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("slow-git");

    std::fs::write(
        &path,
        "#!/bin/sh\nif [ \"$1\" = clone ]; then sleep 1; fi\nexec git \"$@\"\n",
    )
    .unwrap();

    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    path
}

#[cfg(unix)]
#[test]
fn concurrent_first_lookups_clone_once() {
    if !common::git_available() {
        eprintln!("skipping, git is not available");
        return;
    }

    let upstream = upstream();
    let local = tempfile::tempdir().unwrap();

    let fetcher = GitFetcher::new(file_url(upstream.path()), local.path().join("snapshot"))
        .with_git(slow_git(local.path()));

    let registry = std::sync::Arc::new(Registry::new(fetcher));

    let uuid = {
        let registry = registry.clone();

        std::thread::spawn(move || registry.get_uuid(0x0002).map(|uuid| uuid.map(|uuid| uuid.name)))
    };

    let ad_type = {
        let registry = registry.clone();

        std::thread::spawn(move || registry.get_ad_type(0x09).map(|ad_type| ad_type.map(|ad_type| ad_type.name)))
    };

    assert_eq!(Some("UDP".to_string()), uuid.join().unwrap().unwrap());
    assert_eq!(
        Some("Complete Local Name".to_string()),
        ad_type.join().unwrap().unwrap()
    );
}
