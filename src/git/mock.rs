use crate::error::{BumpError, Result};
use crate::git::Repository;
use std::path::PathBuf;
use std::sync::Mutex;

/// A git operation recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub enum GitCall {
    Stage(Vec<PathBuf>),
    Commit(String),
    Tag { name: String, message: String },
    Push { remote: String, tag: String },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    dirty: Vec<String>,
    fail_push: bool,
    calls: Mutex<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a clean mock repository on `branch`
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: branch.into(),
            dirty: Vec::new(),
            fail_push: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report `path` as an uncommitted change
    pub fn with_dirty_path(mut self, path: impl Into<String>) -> Self {
        self.dirty.push(path.into());
        self
    }

    /// Make every push fail with a remote error
    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Operations performed so far, in order
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, call: GitCall) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("main")
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn status_entries(&self) -> Result<Vec<String>> {
        Ok(self.dirty.clone())
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(GitCall::Stage(paths.to_vec()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(GitCall::Commit(message.to_string()));
        Ok(format!("{:040x}", self.calls().len()))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(GitCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn push_with_tags(&self, remote: &str, tag: &str) -> Result<()> {
        if self.fail_push {
            return Err(BumpError::remote(format!("cannot reach '{}'", remote)));
        }
        self.record(GitCall::Push {
            remote: remote.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
