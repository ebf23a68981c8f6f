// Build script for the GDAL binding diagnostics
// Records toolchain details for the environment report

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=GDAL_HOME");
    println!("cargo:rerun-if-env-changed=GDAL_DATA");
    println!("cargo:rerun-if-env-changed=GDAL_DRIVER_PATH");

    if std::env::var("CARGO_FEATURE_GDAL").is_ok() && std::env::var("GDAL_HOME").is_err() {
        println!("cargo:warning=GDAL_HOME not set. GDAL will be detected from system paths.");
    }

    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GDALPROBE_RUSTC_VERSION={}", rustc_version);

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=GDALPROBE_TARGET={}", target);
}
