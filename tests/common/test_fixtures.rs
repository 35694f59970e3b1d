//! Test fixtures backed by real git repositories
//!
//! The upstream is a plain (non-bare) repository in a temporary directory;
//! commits are made with git2 directly so no `git` binary is needed.

use git2::{Oid, Repository, Signature};
use gitget::domain::value_objects::git_url::GitUrl;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `relative` inside the repository and commit it on HEAD
pub fn commit_file(repo: &Repository, relative: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("repository has a working directory");
    let path = workdir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(relative)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let signature = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents = parent.iter().collect::<Vec<_>>();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap()
}

/// Read a file of the repository's working tree
pub fn read_worktree_file(repo: &Repository, relative: &str) -> String {
    let workdir = repo.workdir().expect("repository has a working directory");
    fs::read_to_string(workdir.join(relative)).unwrap()
}

/// Upstream repository that mirrors are cloned from
pub struct UpstreamFixture {
    dir: TempDir,
    pub repo: Repository,
}

impl UpstreamFixture {
    /// Repository with `a.txt` and `Assets/Tools/{a.txt,sub/b.txt}` committed
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();

        let fixture = Self { dir, repo };
        fixture.commit("a.txt", "upstream a\n", "Add a.txt");
        fixture.commit("Assets/Tools/a.txt", "tool a\n", "Add tool a");
        fixture.commit("Assets/Tools/sub/b.txt", "tool b\n", "Add tool b");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> GitUrl {
        GitUrl::new(&self.path().to_string_lossy()).unwrap()
    }

    pub fn commit(&self, relative: &str, content: &str, message: &str) -> Oid {
        commit_file(&self.repo, relative, content, message)
    }
}

/// A consuming project with its marker directory, plus a cache root
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("project").join("Assets")).unwrap();
        Self { dir }
    }

    pub fn working_dir(&self) -> PathBuf {
        self.dir.path().join("project")
    }

    pub fn cache_root(&self) -> PathBuf {
        self.dir.path().join("cache")
    }
}
