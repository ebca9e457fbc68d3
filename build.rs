use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let git_hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    let git_status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(output) if output.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown-target".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown-profile".to_string());
    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());

    for (key, value) in [
        ("HASH", git_hash.as_str()),
        ("STATUS", git_status),
        ("TIMESTAMP", timestamp.as_str()),
        ("TARGET", target.as_str()),
        ("PROFILE", profile.as_str()),
        ("RUSTC", rustc.as_str()),
    ] {
        println!("cargo:rustc-env=EXPENSE_TRACKER_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command. `git status --porcelain` on a clean tree
/// yields `Some("")`, so emptiness is left to the caller.
fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
