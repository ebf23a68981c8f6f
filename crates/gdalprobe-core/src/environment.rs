//! Process and toolchain details printed for operator visibility

use serde::Serialize;
use std::env;

/// Environment variable pointing at a GDAL installation prefix
pub const GDAL_HOME_VAR: &str = "GDAL_HOME";

/// Variable the platform loader searches for shared libraries
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(target_os = "windows")]
pub const LIBRARY_PATH_VAR: &str = "PATH";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: Option<String>,
}

impl EnvVar {
    pub fn read(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: env::var(name).ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentInfo {
    /// `rustc --version` of the toolchain that built this binary
    pub toolchain: String,
    pub vendor: String,
    pub os: String,
    pub arch: String,
    pub target: String,
    pub gdal_home: EnvVar,
    pub library_path: EnvVar,
}

impl EnvironmentInfo {
    pub fn capture() -> Self {
        let target = env!("GDALPROBE_TARGET").to_string();
        Self {
            toolchain: env!("GDALPROBE_RUSTC_VERSION").to_string(),
            vendor: target_vendor(&target),
            os: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            target,
            gdal_home: EnvVar::read(GDAL_HOME_VAR),
            library_path: EnvVar::read(LIBRARY_PATH_VAR),
        }
    }
}

/// Vendor field of a target triple (`x86_64-unknown-linux-gnu` -> `unknown`)
pub fn target_vendor(triple: &str) -> String {
    triple
        .split('-')
        .nth(1)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_vendor() {
        assert_eq!(target_vendor("x86_64-unknown-linux-gnu"), "unknown");
        assert_eq!(target_vendor("aarch64-apple-darwin"), "apple");
        assert_eq!(target_vendor("x86_64-pc-windows-msvc"), "pc");
        assert_eq!(target_vendor("wasm32"), "unknown");
    }

    #[test]
    fn test_capture_reports_host_platform() {
        let info = EnvironmentInfo::capture();
        assert_eq!(info.os, env::consts::OS);
        assert_eq!(info.arch, env::consts::ARCH);
        assert!(!info.toolchain.is_empty());
        assert_eq!(info.gdal_home.name, GDAL_HOME_VAR);
        assert_eq!(info.library_path.name, LIBRARY_PATH_VAR);
    }
}
