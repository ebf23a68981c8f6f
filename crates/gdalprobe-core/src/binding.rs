//! Binding seam between the checklist and the native raster library
//!
//! The checklist only talks to [`RasterLibrary`]. With the `gdal` feature
//! enabled, [`NativeLibrary`] is the GDAL-backed implementation. Without it,
//! [`NativeLibrary`] is the uninhabited [`Unbound`] type and [`load`] always
//! fails with [`crate::ProbeError::BindingUnavailable`], so no check can run.

use crate::error::Result;
use crate::report::{DriverInfo, MemoryDatasetSpec};
use serde::Serialize;

#[cfg(feature = "gdal")]
mod gdal_library;

#[cfg(feature = "gdal")]
pub use gdal_library::{GdalDataset, GdalLibrary};

/// Name of the driver used for the transient dataset
pub const MEMORY_DRIVER: &str = "MEM";

/// Read-only view of a raster library's driver registry and configuration.
pub trait RasterLibrary {
    /// Open dataset handle; the library releases it when the value is dropped
    type Dataset: RasterHandle;

    /// Query a version string such as `RELEASE_NAME` or `VERSION_NUM`
    fn version_info(&self, key: &str) -> Result<String>;

    fn driver_count(&self) -> Result<usize>;

    /// Driver at a 0-based registry index, `None` if the slot is empty
    fn driver(&self, index: usize) -> Result<Option<DriverInfo>>;

    fn driver_by_name(&self, name: &str) -> Result<Option<DriverInfo>>;

    /// Create a byte-typed dataset with the named driver and an empty filename
    fn create_dataset(&self, driver: &str, spec: &MemoryDatasetSpec) -> Result<Self::Dataset>;

    /// Read a library configuration option, `None` when unset
    fn config_option(&self, key: &str) -> Result<Option<String>>;
}

/// Properties of an open dataset.
pub trait RasterHandle {
    /// `(width, height)` in pixels
    fn raster_size(&self) -> Result<(usize, usize)>;

    fn raster_count(&self) -> Result<usize>;
}

/// Placeholder library type for builds without a native binding.
///
/// It has no values, so code holding one is unreachable.
#[derive(Debug)]
pub enum Unbound {}

impl RasterLibrary for Unbound {
    type Dataset = Unbound;

    fn version_info(&self, _key: &str) -> Result<String> {
        match *self {}
    }

    fn driver_count(&self) -> Result<usize> {
        match *self {}
    }

    fn driver(&self, _index: usize) -> Result<Option<DriverInfo>> {
        match *self {}
    }

    fn driver_by_name(&self, _name: &str) -> Result<Option<DriverInfo>> {
        match *self {}
    }

    fn create_dataset(&self, _driver: &str, _spec: &MemoryDatasetSpec) -> Result<Unbound> {
        match *self {}
    }

    fn config_option(&self, _key: &str) -> Result<Option<String>> {
        match *self {}
    }
}

impl RasterHandle for Unbound {
    fn raster_size(&self) -> Result<(usize, usize)> {
        match *self {}
    }

    fn raster_count(&self) -> Result<usize> {
        match *self {}
    }
}

#[cfg(feature = "gdal")]
pub type NativeLibrary = GdalLibrary;

#[cfg(not(feature = "gdal"))]
pub type NativeLibrary = Unbound;

/// Whether this build links a native binding
pub fn is_compiled_in() -> bool {
    cfg!(feature = "gdal")
}

/// Binding capabilities decided when the binary was built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub native_binding: bool,
}

impl Capabilities {
    pub fn detect() -> Self {
        Self {
            native_binding: is_compiled_in(),
        }
    }
}

/// Load the native binding and register its drivers.
///
/// Called once at startup; every later check borrows the returned library.
#[cfg(feature = "gdal")]
pub fn load() -> Result<NativeLibrary> {
    GdalLibrary::load()
}

/// Load the native binding and register its drivers.
///
/// Called once at startup; every later check borrows the returned library.
#[cfg(not(feature = "gdal"))]
pub fn load() -> Result<NativeLibrary> {
    tracing::debug!("Binary built without the `gdal` feature");
    Err(crate::error::ProbeError::BindingUnavailable {
        reason: "this build does not link GDAL (rebuild with `--features gdal`)".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_match_build() {
        assert_eq!(Capabilities::detect().native_binding, cfg!(feature = "gdal"));
    }

    #[cfg(not(feature = "gdal"))]
    #[test]
    fn test_load_without_binding_fails() {
        let err = load().unwrap_err();
        assert!(matches!(err, crate::ProbeError::BindingUnavailable { .. }));
        assert!(err.to_string().contains("binding unavailable"));
    }
}
