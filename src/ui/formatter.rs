//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a bold section header.
pub fn display_header(title: &str) {
    println!("\n{}", style(title).bold().blue());
}

/// Show what the release starts from.
///
/// # Arguments
/// * `version` - Version currently declared in the manifest
/// * `manifest` - Manifest file name
/// * `branch` - Checked out branch
pub fn display_release_context(version: &str, manifest: &str, branch: &str) {
    println!("{} {}", style("Current version:").cyan(), version);
    println!("{} {}", style("Manifest:       ").cyan(), manifest);
    println!("{} {}", style("Branch:         ").cyan(), branch);
}

/// Display the execution plan before asking for confirmation.
///
/// # Arguments
/// * `current` - Version before the bump
/// * `next` - Version after the bump
/// * `tag` - Tag that will be created
/// * `release_kind` - Human readable release kind
/// * `steps` - Ordered list of steps that will run
pub fn display_plan(current: &str, next: &str, tag: &str, release_kind: &str, steps: &[String]) {
    display_header("Release plan");
    println!(
        "  Version:      {} → {}",
        style(current).red(),
        style(next).green()
    );
    println!("  Tag:          {}", style(tag).green());
    println!("  Release type: {}", release_kind);

    println!("\n{}", style("Steps:").bold());
    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

/// Display manual push instruction for a release.
///
/// # Arguments
/// * `remote` - The remote name (e.g., "origin")
pub fn display_manual_push_instruction(remote: &str) {
    println!(
        "\n{} To push this release later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push --follow-tags {}", remote)).cyan()
    );
}

/// One-line verdict printed by the `validate` commands.
pub fn validation_message(version: &str, valid: bool) -> String {
    if valid {
        format!("✅ Version {} is PEP 440 compliant", version)
    } else {
        format!("❌ Version '{}' is not PEP 440 compliant", version)
    }
}
