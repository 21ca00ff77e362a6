// File: crates/chart-render-skia/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs.

fn main() {
    // the build script runs on the host; ask cargo about the target instead of cfg!
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}
