//! Command-line workflows shared by the binaries

pub mod orchestration;

pub use orchestration::{run_release_workflow, ReleaseSummary, ReleaseWorkflowArgs, WorkflowOutcome};
