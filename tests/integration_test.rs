// tests/integration_test.rs
use std::process::Command;

fn run(bin: &str, args: &[&str]) -> std::process::Output {
    Command::new(bin)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_bump_version_help() {
    let output = run(env!("CARGO_BIN_EXE_bump-version"), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("bump-version"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("validate"));
}

#[test]
fn test_validate_subcommand() {
    let bin = env!("CARGO_BIN_EXE_bump-version");

    let output = run(bin, &["validate", "1.0.0rc1"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "✅ Version 1.0.0rc1 is PEP 440 compliant"
    );

    let output = run(bin, &["validate", "1.0.0-"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "❌ Version '1.0.0-' is not PEP 440 compliant"
    );
}

#[test]
fn test_validate_version_binary() {
    let bin = env!("CARGO_BIN_EXE_validate-version");

    let output = run(bin, &["1!1.0.0"]);
    assert!(output.status.success());

    let output = run(bin, &["1_0_0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stdout).unwrap().contains("not PEP 440 compliant"));
}

#[test]
fn test_validate_version_usage() {
    let bin = env!("CARGO_BIN_EXE_validate-version");

    for args in [&[][..], &["1.0.0", "2.0.0"][..]] {
        let output = run(bin, args);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8(output.stdout)
            .unwrap()
            .contains("Usage: validate-version <version>"));
    }
}

#[test]
fn test_validate_version_flags() {
    let bin = env!("CARGO_BIN_EXE_validate-version");

    let output = run(bin, &["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("validate-version"));

    let output = run(bin, &["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("VERSION"));
}
