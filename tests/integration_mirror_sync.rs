//! ミラー同期の統合テスト
//!
//! ローカルのアップストリームリポジトリに対して実際にclone/pullを行う

mod common;

use common::test_fixtures::{commit_file, read_worktree_file, UpstreamFixture};
use git2::Repository;
use gitget::common::error::GitGetError;
use gitget::domain::value_objects::sync_outcome::SyncOutcome;
use gitget::infrastructure::git::mirror::{GitMirror, MIRROR_AUTHOR_NAME};
use gitget::infrastructure::git::mirror_sync::MirrorSync;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_clone_then_pull_without_changes() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join(upstream.url().cache_id());
    let git = GitMirror::quiet();

    let first = git.sync(&upstream.url(), &mirror).unwrap();
    assert_eq!(first, SyncOutcome::ClonedFresh);
    assert!(GitMirror::is_valid(&mirror));
    assert_file_content!(mirror.join("Assets/Tools/sub/b.txt"), "tool b\n");

    let second = git.sync(&upstream.url(), &mirror).unwrap();
    assert_eq!(second, SyncOutcome::PulledNoChanges);
}

#[test]
fn test_upstream_commit_fast_forwards() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    let git = GitMirror::quiet();

    git.sync(&upstream.url(), &mirror).unwrap();
    let new_head = upstream.commit("Assets/Tools/a.txt", "tool a v2\n", "Update tool a");

    let outcome = git.sync(&upstream.url(), &mirror).unwrap();
    assert_eq!(outcome, SyncOutcome::PulledWithChanges);

    let repo = Repository::open(&mirror).unwrap();
    assert_eq!(repo.head().unwrap().target(), Some(new_head));
    assert_file_content!(mirror.join("Assets/Tools/a.txt"), "tool a v2\n");

    // 2回目は変更なし
    assert_eq!(
        git.sync(&upstream.url(), &mirror).unwrap(),
        SyncOutcome::PulledNoChanges
    );
}

#[test]
fn test_diverged_mirror_gets_merge_commit() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    let git = GitMirror::quiet();

    git.sync(&upstream.url(), &mirror).unwrap();

    let mirror_repo = Repository::open(&mirror).unwrap();
    commit_file(&mirror_repo, "local.txt", "local\n", "Local change");
    upstream.commit("Assets/Tools/c.txt", "tool c\n", "Add tool c");

    let outcome = git.sync(&upstream.url(), &mirror).unwrap();
    assert_eq!(outcome, SyncOutcome::PulledWithChanges);

    let head = mirror_repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.parent_count(), 2);
    assert_eq!(head.author().name(), Some(MIRROR_AUTHOR_NAME));
    assert_eq!(head.committer().name(), Some(MIRROR_AUTHOR_NAME));

    assert_file_content!(mirror.join("local.txt"), "local\n");
    assert_file_content!(mirror.join("Assets/Tools/c.txt"), "tool c\n");
}

#[test]
fn test_conflicting_pull_leaves_mirror_untouched() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    let git = GitMirror::quiet();

    git.sync(&upstream.url(), &mirror).unwrap();

    let mirror_repo = Repository::open(&mirror).unwrap();
    let local_head = commit_file(&mirror_repo, "a.txt", "mirror edit\n", "Edit a locally");
    upstream.commit("a.txt", "upstream edit\n", "Edit a upstream");

    let err = git.sync(&upstream.url(), &mirror).unwrap_err();
    match &err {
        GitGetError::MergeConflict {
            conflicted_paths, ..
        } => assert_eq!(conflicted_paths, &vec!["a.txt".to_string()]),
        other => panic!("expected a merge conflict, got {other:?}"),
    }
    assert!(err.to_string().contains("resolve them manually"));

    assert_eq!(mirror_repo.head().unwrap().target(), Some(local_head));
    assert_eq!(read_worktree_file(&mirror_repo, "a.txt"), "mirror edit\n");
}

#[test]
fn test_stale_directory_is_recloned() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    std::fs::create_dir_all(mirror.join(".git/objects/pack")).unwrap();
    std::fs::write(mirror.join(".git/objects/pack/partial.pack"), "junk").unwrap();

    let outcome = GitMirror::quiet().sync(&upstream.url(), &mirror).unwrap();

    assert_eq!(outcome, SyncOutcome::ClonedFresh);
    assert!(!mirror.join(".git/objects/pack/partial.pack").exists());
    assert_file_content!(mirror.join("a.txt"), "upstream a\n");
}

#[test]
fn test_empty_directory_is_cloned_into() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    std::fs::create_dir_all(&mirror).unwrap();

    let outcome = GitMirror::quiet().sync(&upstream.url(), &mirror).unwrap();

    assert_eq!(outcome, SyncOutcome::ClonedFresh);
    assert!(GitMirror::is_valid(&mirror));
}

#[test]
fn test_unrelated_directory_is_never_removed() {
    let upstream = UpstreamFixture::new();
    let cache = TempDir::new().unwrap();
    let mirror = cache.path().join("mirror");
    std::fs::create_dir_all(&mirror).unwrap();
    std::fs::write(mirror.join("precious.txt"), "user data").unwrap();

    let err = GitMirror::quiet()
        .sync(&upstream.url(), &mirror)
        .unwrap_err();

    assert!(matches!(err, GitGetError::FileSystemError { .. }));
    assert!(err.to_string().contains("is not a git mirror"));
    assert_file_content!(mirror.join("precious.txt"), "user data");
}

#[test]
fn test_unreachable_remote_is_a_git_error() {
    let cache = TempDir::new().unwrap();
    let missing = cache.path().join("no-such-upstream");
    let url = gitget::domain::value_objects::git_url::GitUrl::new(&missing.to_string_lossy())
        .unwrap();

    let err = GitMirror::quiet()
        .sync(&url, &cache.path().join("mirror"))
        .unwrap_err();
    assert!(matches!(err, GitGetError::GitError { .. }));
}
