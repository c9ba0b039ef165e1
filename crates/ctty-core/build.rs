//! Build script for ctty-core
//!
//! This script checks build requirements before compilation:
//! - Minimum Rust version
//! - Whether the target kernel has a known `kinfo_proc` layout
//!
//! ## Requirements
//!
//! - **Rust**: 1.85.0 or newer, matching `rust-version` in Cargo.toml
//!   (`ctty-utils` is edition 2024; this crate alone needs 1.77 for `offset_of!`)
//! - **Target**: FreeBSD or macOS for working lookups; other targets build but
//!   report an unsupported platform at runtime

const SUPPORTED_TARGETS: &[&str] = &["freebsd", "macos"];

fn main()
{
    println!("cargo:rerun-if-changed=build.rs");

    check_rust_version();
    check_target_os();
}

fn check_rust_version()
{
    let min_rust_version = rustc_version::Version::new(1, 85, 0);

    if let Ok(rustc_version) = rustc_version::version() {
        if rustc_version < min_rust_version {
            panic!("the ctty workspace requires Rust {min_rust_version} or newer, found {rustc_version}");
        }
    } else {
        // If we can't get version (e.g., in some build environments), just warn
        println!("cargo:warning=could not verify Rust version");
    }
}

fn check_target_os()
{
    // Build scripts run on the host, so the target comes from Cargo, not #[cfg]
    let Ok(target_os) = std::env::var("CARGO_CFG_TARGET_OS") else {
        println!("cargo:warning=could not determine target OS");
        return;
    };

    if !SUPPORTED_TARGETS.contains(&target_os.as_str()) {
        println!(
            "cargo:warning=ctty-core has no kinfo_proc layout for target_os \"{target_os}\"; \
             controlling terminal lookups will report an unsupported platform"
        );
    }
}
