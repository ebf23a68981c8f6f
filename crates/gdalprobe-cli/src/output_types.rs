use gdalprobe_core::report::DriverEntry;
use gdalprobe_core::Capabilities;
use serde::Serialize;
use tabled::Tabled;

/// Output for probe command
#[derive(Debug, Serialize)]
pub struct ProbeOutput {
    pub capabilities: Capabilities,
    pub release_name: String,
}

/// Row of the drivers table
#[derive(Debug, Serialize, Tabled)]
pub struct DriverRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Driver")]
    pub short_name: String,
    #[tabled(rename = "Description")]
    pub long_name: String,
}

impl From<DriverEntry> for DriverRow {
    fn from(entry: DriverEntry) -> Self {
        Self {
            index: entry.index,
            short_name: entry.short_name,
            long_name: entry.long_name,
        }
    }
}

/// Row of the config table
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
