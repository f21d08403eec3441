use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bump_version::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowOutcome};
use bump_version::config;
use bump_version::domain::pep440;
use bump_version::git::Git2Repository;
use bump_version::logging;
use bump_version::ui::{self, TerminalPrompter};

#[derive(Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Bump a Python project's version, then commit, tag and push the release"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Create the release commit and tag without pushing")]
    no_push: bool,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug)"
    )]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a version string is PEP 440 compliant
    Validate {
        #[arg(value_name = "VERSION")]
        input: String,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Some(Command::Validate { input }) = &args.command {
        let valid = pep440::validate(input);
        println!("{}", ui::validation_message(input, valid));
        std::process::exit(if valid { 0 } else { 1 });
    }

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let project_root = std::env::current_dir().context("cannot determine current directory")?;
    let config = config::load_config(args.config.as_deref(), &project_root)?;

    let repo = Git2Repository::open(&project_root)
        .with_context(|| format!("{} is not inside a git repository", project_root.display()))?;
    let mut prompter = TerminalPrompter::stdin();

    let workflow_args = ReleaseWorkflowArgs {
        project_root: project_root.clone(),
        dry_run: args.dry_run,
        no_push: args.no_push,
    };

    match run_release_workflow(&workflow_args, &config, &repo, &mut prompter)? {
        WorkflowOutcome::Released(summary) => {
            ui::display_success(&format!(
                "Released {} ({} → {})",
                summary.tag, summary.previous, summary.version
            ));
        }
        WorkflowOutcome::DryRun(summary) => {
            ui::display_status(&format!("Would release {}", summary.tag));
        }
        WorkflowOutcome::Cancelled(_) => {}
    }

    Ok(())
}
