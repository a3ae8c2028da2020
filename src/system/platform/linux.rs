//! CPU thermal readings via `/sys/class/thermal/`, interface order via
//! `/sys/class/net/`.
//!
//! Thermal zone files report millidegrees Celsius, e.g. `54321` is 54.321 °C.

use std::path::Path;

use super::PlatformSensors;
use crate::system::error::SampleError;

pub struct Platform;

impl PlatformSensors for Platform {
    fn cpu_temperature(thermal_zone: &Path) -> Result<f32, SampleError> {
        let content = read_sysfs_file(thermal_zone)?;
        let millidegrees: i64 = content.parse().map_err(|_| SampleError::Parse {
            path: thermal_zone.display().to_string(),
            detail: format!("expected integer millidegrees, got '{content}'"),
        })?;
        Ok(millidegrees as f32 / 1000.0)
    }

    fn interface_index(name: &str) -> Option<u32> {
        let path = Path::new("/sys/class/net").join(name).join("ifindex");
        read_sysfs_file(&path).ok()?.parse().ok()
    }
}

fn read_sysfs_file(path: &Path) -> Result<String, SampleError> {
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| SampleError::Read {
            path: path.display().to_string(),
            source: e,
        })
}
