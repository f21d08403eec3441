//! Main release workflow orchestration logic
//!
//! Keeps the interactive release flow out of main.rs. The workflow talks to
//! version control through [Repository] and to the user through [Prompter],
//! so it runs the same against a real terminal and git repository or against
//! scripted answers and a mock.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{
    available_targets, is_channel_downgrade, next_from_parts, Channel, ReleaseRequest,
    ReleaseSize, ReleaseTarget, VersionParts,
};
use crate::git::{self, Repository};
use crate::manifest::{self, Manifest, ManifestKind};
use crate::ui::{self, Prompter};

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Directory holding pyproject.toml or setup.py
    pub project_root: PathBuf,

    /// Preview mode - don't touch files or git
    pub dry_run: bool,

    /// Create commit and tag but don't push
    pub no_push: bool,
}

/// What a completed release looks like
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub previous: String,
    pub version: String,
    pub tag: String,
    pub manifest: PathBuf,
    pub pushed: bool,
}

/// How the workflow ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Released(ReleaseSummary),
    DryRun(ReleaseSummary),
    /// The user stopped at a prompt, or the tree was not releasable
    Cancelled(String),
}

/// Main release workflow
///
/// 1. Locate the manifest and show the release context
/// 2. Check branch and working tree
/// 3. Ask for the release kind, then the size where it matters
/// 4. Compute the next version and confirm the plan
/// 5. Write the manifest, commit, tag and push
///
/// # Returns
/// * `Ok(WorkflowOutcome)` - Released, previewed, or cancelled
/// * `Err` - If the manifest is unreadable, the move is rejected, or git fails
pub fn run_release_workflow<R: Repository, P: Prompter>(
    args: &ReleaseWorkflowArgs,
    config: &Config,
    repo: &R,
    prompter: &mut P,
) -> Result<WorkflowOutcome> {
    let manifest = Manifest::discover(&args.project_root)?;
    let branch = repo.current_branch()?;

    ui::display_header("Bump version");
    ui::display_release_context(&manifest.version, manifest.kind.file_name(), &branch);

    if manifest.kind == ManifestKind::SetupPy {
        ui::display_boundary_warning(&BoundaryWarning::SetupPyPreferred);
    }

    if !config.is_release_branch(&branch) {
        ui::display_boundary_warning(&BoundaryWarning::NotOnReleaseBranch {
            branch: branch.clone(),
            release_branches: config.release_branches.clone(),
        });
        if !prompter.confirm("Continue releasing from this branch?", false)? {
            return Ok(cancelled("not on a release branch"));
        }
    }

    let entries = repo.status_entries()?;
    if !entries.is_empty() {
        ui::display_boundary_warning(&BoundaryWarning::DirtyWorkingTree { entries });
        ui::display_status("Commit or stash your changes before releasing");
        return Ok(cancelled("working tree has uncommitted changes"));
    }

    let current = VersionParts::parse(&manifest.version).with_context(|| {
        format!(
            "cannot release from version '{}'; check the version in {}",
            manifest.version,
            manifest.path().display()
        )
    })?;

    let Some(target) = select_target(&current, prompter)? else {
        return Ok(cancelled("no release type selected"));
    };

    let size = if asks_for_size(&current, target) {
        match select_size(&current, target, prompter)? {
            Some(size) => size,
            None => return Ok(cancelled("no release size selected")),
        }
    } else {
        ReleaseSize::Patch
    };

    let request = ReleaseRequest::for_target(size, target);
    let next = next_from_parts(&current, &request)
        .context("pick a different release type")?;
    tracing::info!(current = %manifest.version, next = %next, target = %target, "computed next version");

    if let Some(warning) = downgrade_warning(&current, target) {
        ui::display_boundary_warning(&warning);
    }

    let push = config.push && !args.no_push;
    let summary = ReleaseSummary {
        previous: manifest.version.clone(),
        version: next.clone(),
        tag: git::tag_name(&next),
        manifest: manifest.path(),
        pushed: false,
    };

    ui::display_plan(
        &summary.previous,
        &summary.version,
        &summary.tag,
        &release_kind(target),
        &plan_steps(&manifest, config, &summary, push),
    );

    if args.dry_run {
        ui::display_status("Dry run: no files or git state were changed");
        return Ok(WorkflowOutcome::DryRun(summary));
    }

    if !prompter.confirm("Proceed with this release?", true)? {
        return Ok(cancelled("release not confirmed"));
    }

    execute_release(&manifest, config, repo, summary, push).map(WorkflowOutcome::Released)
}

fn cancelled(reason: &str) -> WorkflowOutcome {
    tracing::info!(reason, "release cancelled");
    ui::display_status("Release cancelled");
    WorkflowOutcome::Cancelled(reason.to_string())
}

/// Warning for a move down the `dev < a < b < rc` order
fn downgrade_warning(current: &VersionParts, target: ReleaseTarget) -> Option<BoundaryWarning> {
    match (current.prerelease_type(), target) {
        (Some(from), ReleaseTarget::Channel(to)) if is_channel_downgrade(from, to) => {
            Some(BoundaryWarning::ChannelDowngrade { from, to })
        }
        _ => None,
    }
}

/// Size only matters when the numeric core moves
fn asks_for_size(current: &VersionParts, target: ReleaseTarget) -> bool {
    match (current.prerelease_type(), target) {
        (None, ReleaseTarget::Channel(Channel::Post)) => false,
        (None, _) => true,
        (Some(Channel::Post), ReleaseTarget::Final) => true,
        (Some(_), _) => false,
    }
}

fn select_target<P: Prompter>(current: &VersionParts, prompter: &mut P) -> Result<Option<ReleaseTarget>> {
    let targets = available_targets(current);
    let options: Vec<String> = targets.iter().map(|t| release_kind(*t)).collect();

    Ok(prompter
        .select("Select release type", &options, 0)?
        .and_then(|index| targets.get(index).copied()))
}

fn select_size<P: Prompter>(
    current: &VersionParts,
    target: ReleaseTarget,
    prompter: &mut P,
) -> Result<Option<ReleaseSize>> {
    let mut options = Vec::with_capacity(ReleaseSize::ALL.len());
    for size in ReleaseSize::ALL {
        let preview = next_from_parts(current, &ReleaseRequest::for_target(size, target))?;
        options.push(format!("{} ({} → {})", size_label(size), current, preview));
    }

    Ok(prompter
        .select("Select version bump", &options, 0)?
        .and_then(|index| ReleaseSize::ALL.get(index).copied()))
}

fn size_label(size: ReleaseSize) -> &'static str {
    match size {
        ReleaseSize::Patch => "Patch: bug fixes",
        ReleaseSize::Minor => "Minor: new features",
        ReleaseSize::Major => "Major: breaking changes",
    }
}

/// Menu text for a release kind
fn release_kind(target: ReleaseTarget) -> String {
    match target {
        ReleaseTarget::Final => "Final (production)".to_string(),
        ReleaseTarget::Channel(Channel::Dev) => "Dev (development snapshot)".to_string(),
        ReleaseTarget::Channel(Channel::Alpha) => "Alpha (internal testing)".to_string(),
        ReleaseTarget::Channel(Channel::Beta) => "Beta (public testing)".to_string(),
        ReleaseTarget::Channel(Channel::ReleaseCandidate) => "RC (release candidate)".to_string(),
        ReleaseTarget::Channel(Channel::Post) => "Post (post-release fix)".to_string(),
    }
}

fn plan_steps(manifest: &Manifest, config: &Config, summary: &ReleaseSummary, push: bool) -> Vec<String> {
    let mut steps = vec![format!(
        "Update {} to {}",
        manifest.kind.file_name(),
        summary.version
    )];

    if manifest.lockfile().is_some() && config.sync_lockfile {
        steps.push(format!("Refresh {} with `uv sync`", manifest::UV_LOCK_FILE));
    }

    let staged: Vec<String> = manifest
        .files_to_stage()
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    steps.push(format!("git add {}", staged.join(" ")));
    steps.push(format!("git commit -m \"{}\"", git::commit_message(&summary.version)));
    steps.push(format!(
        "git tag -a {} -m \"{}\"",
        summary.tag,
        git::tag_message(&summary.version)
    ));

    if push {
        steps.push(format!("git push --follow-tags {}", config.remote));
    } else {
        steps.push("Skip push".to_string());
    }

    steps
}

fn execute_release<R: Repository>(
    manifest: &Manifest,
    config: &Config,
    repo: &R,
    mut summary: ReleaseSummary,
    push: bool,
) -> Result<ReleaseSummary> {
    manifest.write_version(&summary.version)?;
    ui::display_success(&format!(
        "Updated {} to {}",
        manifest.kind.file_name(),
        summary.version
    ));

    if manifest.lockfile().is_some() && config.sync_lockfile {
        match manifest::sync_lockfile(&manifest.root) {
            Ok(()) => ui::display_success(&format!("Refreshed {}", manifest::UV_LOCK_FILE)),
            Err(e) => {
                tracing::warn!(error = %e, "lockfile refresh failed");
                ui::display_status(&format!(
                    "Could not refresh {} ({}); committing it unchanged",
                    manifest::UV_LOCK_FILE,
                    e
                ));
            }
        }
    }

    repo.stage(&manifest.files_to_stage())?;
    let commit = repo.commit(&git::commit_message(&summary.version))?;
    ui::display_success(&format!("Committed release {} ({})", summary.version, short_id(&commit)));

    repo.create_annotated_tag(&summary.tag, &git::tag_message(&summary.version))?;
    ui::display_success(&format!("Created tag {}", summary.tag));

    if push {
        repo.push_with_tags(&config.remote, &summary.tag)
            .with_context(|| {
                format!(
                    "release commit and tag {} were created locally but not pushed",
                    summary.tag
                )
            })?;
        summary.pushed = true;
        ui::display_success(&format!("Pushed {} to {}", summary.tag, config.remote));
    } else {
        ui::display_boundary_warning(&BoundaryWarning::PushSkipped {
            remote: config.remote.clone(),
        });
        ui::display_manual_push_instruction(&config.remote);
    }

    let commands = publish_commands(manifest.kind);
    if !commands.is_empty() {
        ui::display_status("To publish to PyPI:");
        for (i, command) in commands.iter().enumerate() {
            println!("  {}. {}", i + 1, command);
        }
    }

    Ok(summary)
}

/// Follow-up commands that publish a pyproject release
fn publish_commands(kind: ManifestKind) -> &'static [&'static str] {
    if kind.is_pyproject() {
        &["uv build", "uv publish"]
    } else {
        &[]
    }
}

fn short_id(id: &str) -> &str {
    id.get(..7).unwrap_or(id)
}
