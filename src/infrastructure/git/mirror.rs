use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

use git2::{
    build::{CheckoutBuilder, RepoBuilder},
    AnnotatedCommit, BranchType, FetchOptions, Reference, RemoteCallbacks, Repository, Signature,
    Time,
};
use tracing::{debug, info, warn};

use super::mirror_sync::MirrorSync;
use super::progress::{pull_spinner, Clock, ProgressReporter};
use crate::common::error::GitGetError;
use crate::common::result::{GitGetResult, IoResultExt, OptionExt};
use crate::domain::value_objects::{GitUrl, SyncOutcome};

/// Author of merge commits created while pulling
pub const MIRROR_AUTHOR_NAME: &str = "GitGet";
pub const MIRROR_AUTHOR_EMAIL: &str = "gitget@localhost";

const ORIGIN: &str = "origin";

/// Whether clone and pull progress is drawn on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Console,
    Hidden,
}

/// libgit2-backed mirror synchronizer
#[derive(Debug, Clone)]
pub struct GitMirror {
    progress: ProgressMode,
}

impl Default for GitMirror {
    fn default() -> Self {
        Self::new(ProgressMode::Console)
    }
}

impl GitMirror {
    pub fn new(progress: ProgressMode) -> Self {
        Self { progress }
    }

    /// Mirror without console output
    pub fn quiet() -> Self {
        Self::new(ProgressMode::Hidden)
    }

    /// Whether `path` holds a repository libgit2 can open
    pub fn is_valid(path: &Path) -> bool {
        Repository::open(path).is_ok()
    }

    /// Clone `url` into `path`, feeding clone callbacks to `reporter`
    pub fn clone_fresh<W: Write, C: Clock>(
        &self,
        url: &GitUrl,
        path: &Path,
        reporter: ProgressReporter<W, C>,
    ) -> GitGetResult<()> {
        if path.exists() {
            if !Self::is_interrupted_clone(path)? {
                return Err(GitGetError::filesystem_error(
                    format!(
                        "{} exists and is not a git mirror; move it away or choose another cache root",
                        path.display()
                    ),
                    Some(path.to_path_buf()),
                ));
            }
            warn!(
                "Removing {} before cloning, it is not a valid repository",
                path.display()
            );
            std::fs::remove_dir_all(path).with_path("Failed to remove stale mirror", path)?;
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_path("Failed to create cache directory", parent)?;
        }

        let reporter = RefCell::new(reporter);

        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            reporter
                .borrow_mut()
                .transfer_progress(stats.received_objects(), stats.total_objects())
        });
        callbacks.sideband_progress(|data| {
            reporter
                .borrow_mut()
                .server_progress(&String::from_utf8_lossy(data))
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        let mut checkout = CheckoutBuilder::new();
        checkout.progress(|path, completed, total| {
            reporter
                .borrow_mut()
                .checkout_progress(path, completed, total)
        });

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);
        builder.with_checkout(checkout);

        info!("Cloning {} into {}", url, path.display());
        builder
            .clone(url.as_str(), path)
            .map_err(|e| GitGetError::git_error_with_source(format!("Failed to clone {}", url), e))?;

        Ok(())
    }

    /// Leftover of an aborted clone: an empty directory or one holding `.git`
    fn is_interrupted_clone(path: &Path) -> GitGetResult<bool> {
        if !path.is_dir() {
            return Ok(false);
        }
        if path.join(".git").exists() {
            return Ok(true);
        }
        let mut entries =
            std::fs::read_dir(path).with_path("Failed to inspect cache directory", path)?;
        Ok(entries.next().is_none())
    }

    /// Fetch from origin and merge the upstream of the checked-out branch
    pub fn pull(&self, path: &Path) -> GitGetResult<SyncOutcome> {
        let repo = Repository::open(path).map_err(|e| {
            GitGetError::git_error_with_source(format!("Failed to open mirror {}", path.display()), e)
        })?;

        let branch = Self::current_branch(&repo)?;
        debug!("Mirror {} is on branch '{}'", path.display(), branch);

        self.fetch_origin(&repo)?;

        let upstream = Self::upstream_reference(&repo, &branch)?;
        let upstream_name = upstream.shorthand().unwrap_or(ORIGIN).to_string();
        let incoming = repo.reference_to_annotated_commit(&upstream)?;

        let (analysis, _) = repo.merge_analysis(&[&incoming])?;

        if analysis.is_up_to_date() {
            info!("Mirror {} is already up to date", path.display());
            Ok(SyncOutcome::PulledNoChanges)
        } else if analysis.is_fast_forward() {
            Self::fast_forward(&repo, &branch, &incoming)?;
            info!("Fast-forwarded '{}' to {}", branch, incoming.id());
            Ok(SyncOutcome::PulledWithChanges)
        } else if analysis.is_normal() {
            Self::merge(&repo, path, &branch, &upstream_name, &incoming)?;
            info!("Merged {} into '{}'", upstream_name, branch);
            Ok(SyncOutcome::PulledWithChanges)
        } else {
            Err(GitGetError::git_error(format!(
                "Cannot merge {} into '{}'",
                upstream_name, branch
            )))
        }
    }

    fn current_branch(repo: &Repository) -> GitGetResult<String> {
        let head = repo
            .head()
            .map_err(|e| GitGetError::git_error_with_source("Mirror has no checked-out commit", e))?;

        let name = if head.is_branch() { head.shorthand() } else { None };
        name.map(str::to_string)
            .ok_or_git_error("Mirror HEAD is detached, cannot pull")
    }

    fn fetch_origin(&self, repo: &Repository) -> GitGetResult<()> {
        let mut remote = repo.find_remote(ORIGIN).map_err(|e| {
            GitGetError::git_error_with_source(format!("Remote '{}' not found", ORIGIN), e)
        })?;

        let spinner = pull_spinner(
            self.progress == ProgressMode::Console,
            "Pulling from origin. Please wait!",
        );

        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            spinner.set_message(format!(
                "Pulling from origin. Received Objects: {} / {}",
                stats.received_objects(),
                stats.total_objects()
            ));
            true
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        // An empty refspec list uses the remote's configured refspecs
        let result = remote.fetch::<&str>(&[], Some(&mut fetch_options), None);
        spinner.finish_and_clear();

        result.map_err(|e| {
            GitGetError::git_error_with_source(format!("Failed to fetch from '{}'", ORIGIN), e)
        })
    }

    fn upstream_reference<'r>(repo: &'r Repository, branch: &str) -> GitGetResult<Reference<'r>> {
        if let Ok(upstream) = repo
            .find_branch(branch, BranchType::Local)
            .and_then(|local| local.upstream())
        {
            return Ok(upstream.into_reference());
        }

        let fallback = format!("refs/remotes/{}/{}", ORIGIN, branch);
        debug!("Branch '{}' has no upstream, using {}", branch, fallback);
        repo.find_reference(&fallback).map_err(|e| {
            GitGetError::git_error_with_source(
                format!("No upstream branch found for '{}'", branch),
                e,
            )
        })
    }

    fn fast_forward(repo: &Repository, branch: &str, incoming: &AnnotatedCommit) -> GitGetResult<()> {
        let refname = format!("refs/heads/{}", branch);
        let mut reference = repo.find_reference(&refname)?;
        reference.set_target(
            incoming.id(),
            &format!("gitget: fast-forward {} to {}", branch, incoming.id()),
        )?;
        repo.set_head(&refname)?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))?;
        Ok(())
    }

    /// Merge in memory first so a conflicting pull leaves the mirror untouched
    fn merge(
        repo: &Repository,
        path: &Path,
        branch: &str,
        upstream_name: &str,
        incoming: &AnnotatedCommit,
    ) -> GitGetResult<()> {
        let local_commit = repo.head()?.peel_to_commit()?;
        let incoming_commit = repo.find_commit(incoming.id())?;

        let mut index = repo.merge_commits(&local_commit, &incoming_commit, None)?;

        if index.has_conflicts() {
            let conflicted_paths = index
                .conflicts()?
                .filter_map(Result::ok)
                .filter_map(|conflict| conflict.our.or(conflict.their).or(conflict.ancestor))
                .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
                .collect::<Vec<_>>();
            warn!("Pull into {} conflicts on {:?}", path.display(), conflicted_paths);
            return Err(GitGetError::merge_conflict(path, conflicted_paths));
        }

        let tree_id = index.write_tree_to(repo)?;
        let tree = repo.find_tree(tree_id)?;
        let signature = Self::signature()?;
        let message = format!(
            "Merge remote-tracking branch '{}' into {}",
            upstream_name, branch
        );

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &[&local_commit, &incoming_commit],
        )?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))?;
        Ok(())
    }

    /// Fixed author identity stamped with the current local time
    fn signature() -> GitGetResult<Signature<'static>> {
        let now = chrono::Local::now();
        let offset_minutes = now.offset().local_minus_utc() / 60;
        let time = Time::new(now.timestamp(), offset_minutes);
        Ok(Signature::new(MIRROR_AUTHOR_NAME, MIRROR_AUTHOR_EMAIL, &time)?)
    }
}

impl MirrorSync for GitMirror {
    fn sync(&self, url: &GitUrl, mirror_path: &Path) -> GitGetResult<SyncOutcome> {
        if Self::is_valid(mirror_path) {
            info!("Pulling {} in {}", url, mirror_path.display());
            return self.pull(mirror_path);
        }

        match self.progress {
            ProgressMode::Console => {
                println!("Cloning {}. Please wait!", url);
                self.clone_fresh(url, mirror_path, ProgressReporter::stdout())?;
                println!("Cloned into: {}", mirror_path.display());
            }
            ProgressMode::Hidden => {
                self.clone_fresh(url, mirror_path, ProgressReporter::hidden())?;
            }
        }

        Ok(SyncOutcome::ClonedFresh)
    }
}
