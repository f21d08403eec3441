//! Git operations abstraction layer
//!
//! The release workflow only needs a handful of operations from version
//! control: inspect the branch and working tree, then stage, commit, tag and
//! push. They are expressed by the [Repository] trait so the workflow can run
//! against a real repository or an in-memory mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for tests

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::PathBuf;

/// Commit message for a release commit
pub fn commit_message(version: &str) -> String {
    format!("chore: release {}", version)
}

/// Tag name for a release
pub fn tag_name(version: &str) -> String {
    format!("v{}", version)
}

/// Annotation message for a release tag
pub fn tag_message(version: &str) -> String {
    format!("Release {}", version)
}

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::BumpError] variants.
pub trait Repository: Send + Sync {
    /// Name of the checked out branch
    ///
    /// Works on a freshly initialized repository with no commits yet.
    /// Returns `HEAD` when detached.
    fn current_branch(&self) -> Result<String>;

    /// Paths with uncommitted changes, including untracked files
    ///
    /// An empty list means the working tree is clean.
    fn status_entries(&self) -> Result<Vec<String>>;

    /// Stage files for the next commit
    ///
    /// # Arguments
    /// * `paths` - Files inside the working tree, absolute or relative to it
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the index on top of HEAD
    ///
    /// # Returns
    /// * `Ok(String)` - The new commit id
    fn commit(&self, message: &str) -> Result<String>;

    /// Create an annotated tag on HEAD
    ///
    /// # Returns
    /// * `Err` - If the tag already exists or HEAD has no commit
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push the current branch together with the given tag
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `tag` - Tag to push alongside the branch
    fn push_with_tags(&self, remote: &str, tag: &str) -> Result<()>;
}
