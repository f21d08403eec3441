use std::fmt;

use crate::domain::Channel;

/// Non-fatal conditions noticed while preparing a release.
/// These are reported to the user, who decides whether to continue.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Releasing from a branch that is not a configured release branch
    NotOnReleaseBranch {
        branch: String,
        release_branches: Vec<String>,
    },
    /// Working tree has uncommitted changes
    DirtyWorkingTree { entries: Vec<String> },
    /// Moving down the `dev < a < b < rc` order
    ChannelDowngrade { from: Channel, to: Channel },
    /// Version was found in setup.py rather than pyproject.toml
    SetupPyPreferred,
    /// Push was skipped by configuration or environment
    PushSkipped { remote: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NotOnReleaseBranch {
                branch,
                release_branches,
            } => write!(
                f,
                "Not on a release branch: '{}' (release branches: {})",
                branch,
                release_branches.join(", ")
            ),
            BoundaryWarning::DirtyWorkingTree { entries } => {
                write!(f, "Working tree has {} uncommitted change(s)", entries.len())?;
                for entry in entries.iter().take(10) {
                    write!(f, "\n    {}", entry)?;
                }
                if entries.len() > 10 {
                    write!(f, "\n    ... and {} more", entries.len() - 10)?;
                }
                Ok(())
            }
            BoundaryWarning::ChannelDowngrade { from, to } => write!(
                f,
                "Moving from {} back to {}: the new version sorts before the current one",
                from.label(),
                to.label()
            ),
            BoundaryWarning::SetupPyPreferred => {
                write!(f, "Found setup.py; pyproject.toml is recommended")
            }
            BoundaryWarning::PushSkipped { remote } => {
                write!(f, "Push to '{}' skipped", remote)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirty_tree_lists_entries() {
        let warning = BoundaryWarning::DirtyWorkingTree {
            entries: vec!["a.py".to_string(), "b.py".to_string()],
        };
        let msg = warning.to_string();
        assert!(msg.contains("2 uncommitted"));
        assert!(msg.contains("a.py"));
        assert!(msg.contains("b.py"));
    }

    #[test]
    fn test_dirty_tree_truncates_long_lists() {
        let entries: Vec<String> = (0..15).map(|i| format!("file{}.py", i)).collect();
        let msg = BoundaryWarning::DirtyWorkingTree { entries }.to_string();
        assert!(msg.contains("file9.py"));
        assert!(!msg.contains("file10.py"));
        assert!(msg.contains("and 5 more"));
    }

    #[test]
    fn test_downgrade_names_both_channels() {
        let msg = BoundaryWarning::ChannelDowngrade {
            from: Channel::Beta,
            to: Channel::Alpha,
        }
        .to_string();
        assert!(msg.contains("Beta"));
        assert!(msg.contains("Alpha"));
    }

    #[test]
    fn test_not_on_release_branch() {
        let msg = BoundaryWarning::NotOnReleaseBranch {
            branch: "feature/x".to_string(),
            release_branches: vec!["main".to_string(), "master".to_string()],
        }
        .to_string();
        assert!(msg.contains("feature/x"));
        assert!(msg.contains("main, master"));
    }
}
