use std::env;
use std::process::Command;

fn main() {
    let git_hash = short_git_hash();
    let build_date = chrono::Utc::now().format("%Y-%m-%d");
    let target = env::var("TARGET").unwrap_or_default();
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();

    // Shown by `gitget --version`
    println!("cargo:rustc-env=GITGET_LONG_VERSION={version} ({git_hash} {build_date} {target})");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    if target.contains("musl") {
        println!("cargo:rustc-link-arg=-static");
    }
}

fn short_git_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
