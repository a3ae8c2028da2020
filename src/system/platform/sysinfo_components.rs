use std::path::Path;

use sysinfo::Components;

use super::PlatformSensors;
use crate::system::error::SampleError;

pub struct Platform;

impl PlatformSensors for Platform {
    fn cpu_temperature(_thermal_zone: &Path) -> Result<f32, SampleError> {
        let components = Components::new_with_refreshed_list();
        components
            .iter()
            .filter(|c| {
                let label = c.label().to_lowercase();
                label.contains("cpu")
                    || label.contains("package")
                    || label.contains("tctl")
                    || label.contains("tdie")
            })
            .filter_map(|c| c.temperature())
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or(SampleError::NoSensor)
    }

    fn interface_index(_name: &str) -> Option<u32> {
        None
    }
}
