//! GDAL-backed implementation of the binding seam
//!
//! This module wraps the `gdal` crate: error conversion, driver registry
//! queries, and the scoped in-memory dataset.

use super::{RasterHandle, RasterLibrary};
use crate::error::{ProbeError, Result};
use crate::report::{DriverInfo, MemoryDatasetSpec};
use gdal::errors::GdalError;
use gdal::{Dataset, Driver, DriverManager};

/// Convert GDAL errors to probe errors with context
pub fn convert_gdal_error(err: GdalError, context: &str) -> ProbeError {
    ProbeError::library(context, err)
}

fn driver_info(driver: &Driver) -> DriverInfo {
    DriverInfo {
        short_name: driver.short_name(),
        long_name: driver.long_name(),
    }
}

/// Handle to the process-wide GDAL driver registry
#[derive(Debug)]
pub struct GdalLibrary {
    _private: (),
}

impl GdalLibrary {
    /// Register all compiled-in drivers
    pub fn load() -> Result<Self> {
        DriverManager::register_all();
        tracing::debug!(drivers = DriverManager::count(), "GDAL drivers registered");
        Ok(Self { _private: () })
    }
}

impl RasterLibrary for GdalLibrary {
    type Dataset = GdalDataset;

    fn version_info(&self, key: &str) -> Result<String> {
        Ok(gdal::version::version_info(key))
    }

    fn driver_count(&self) -> Result<usize> {
        Ok(DriverManager::count())
    }

    fn driver(&self, index: usize) -> Result<Option<DriverInfo>> {
        // GDALGetDriver only fails by returning NULL for an empty slot
        match DriverManager::get_driver(index) {
            Ok(driver) => Ok(Some(driver_info(&driver))),
            Err(GdalError::NullPointer { .. }) => Ok(None),
            Err(e) => Err(convert_gdal_error(e, &format!("driver lookup #{}", index))),
        }
    }

    fn driver_by_name(&self, name: &str) -> Result<Option<DriverInfo>> {
        match DriverManager::get_driver_by_name(name) {
            Ok(driver) => Ok(Some(driver_info(&driver))),
            Err(GdalError::NullPointer { .. }) => Ok(None),
            Err(e) => Err(convert_gdal_error(e, &format!("driver lookup '{}'", name))),
        }
    }

    fn create_dataset(&self, driver: &str, spec: &MemoryDatasetSpec) -> Result<GdalDataset> {
        let driver = DriverManager::get_driver_by_name(driver)
            .map_err(|e| convert_gdal_error(e, &format!("driver lookup '{}'", driver)))?;

        let dataset = driver
            .create_with_band_type::<u8, _>("", spec.width, spec.height, spec.bands)
            .map_err(|e| convert_gdal_error(e, "dataset creation"))?;

        Ok(GdalDataset { dataset })
    }

    fn config_option(&self, key: &str) -> Result<Option<String>> {
        let value = gdal::config::get_config_option(key, "")
            .map_err(|e| convert_gdal_error(e, &format!("config option {}", key)))?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }
}

/// Open GDAL dataset; `GDALClose` runs when this is dropped
pub struct GdalDataset {
    dataset: Dataset,
}

impl RasterHandle for GdalDataset {
    fn raster_size(&self) -> Result<(usize, usize)> {
        Ok(self.dataset.raster_size())
    }

    fn raster_count(&self) -> Result<usize> {
        Ok(self.dataset.raster_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_strings_are_non_empty() {
        let gdal = GdalLibrary::load().unwrap();
        assert!(!gdal.version_info("RELEASE_NAME").unwrap().is_empty());
        assert!(!gdal.version_info("VERSION_NUM").unwrap().is_empty());
    }

    #[test]
    fn test_driver_lookup_matches_registry() {
        let gdal = GdalLibrary::load().unwrap();
        assert!(gdal.driver_count().unwrap() > 0);

        let mem = gdal.driver_by_name("MEM").unwrap().unwrap();
        assert_eq!(mem.short_name, "MEM");
        assert!(gdal.driver_by_name("NoSuchDriver").unwrap().is_none());
    }

    #[test]
    fn test_memory_dataset_dimensions() {
        let gdal = GdalLibrary::load().unwrap();
        let dataset = gdal
            .create_dataset("MEM", &MemoryDatasetSpec::default())
            .unwrap();

        assert_eq!(dataset.raster_size().unwrap(), (100, 100));
        assert_eq!(dataset.raster_count().unwrap(), 1);
    }
}
