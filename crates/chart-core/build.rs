// File: crates/chart-core/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs when targeting Windows.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // Build scripts run on the host, so check the target OS from cargo's env instead of cfg.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
