//! Standalone PEP 440 check, usable from scripts and CI.

use clap::error::ErrorKind;
use clap::Parser;

use bump_version::domain::pep440;
use bump_version::ui;

#[derive(Parser)]
#[command(name = "validate-version", version, about = "Check that a version is PEP 440 compliant")]
struct Args {
    /// Version string to check
    #[arg(value_name = "VERSION")]
    input: String,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("Usage: validate-version <version>");
            std::process::exit(1);
        }
    };

    let valid = pep440::validate(&args.input);
    println!("{}", ui::validation_message(&args.input, valid));
    std::process::exit(if valid { 0 } else { 1 });
}
