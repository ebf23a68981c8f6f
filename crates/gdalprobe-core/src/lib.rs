//! gdalprobe Core - binding seam, checklist, report model and configuration
//!
//! This crate checks that the GDAL native binding loads and answers a fixed
//! set of read-only queries. All raster work stays inside GDAL.

pub mod binding;
pub mod checks;
pub mod config;
pub mod environment;
pub mod error;
pub mod report;

pub use binding::{Capabilities, NativeLibrary, RasterHandle, RasterLibrary};
pub use checks::{run_checklist, CheckPlan, CheckStep};
pub use error::{ProbeError, Result};
pub use report::{CheckReport, Profile, StrictFailure};
