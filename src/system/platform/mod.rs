use std::path::Path;

use super::error::SampleError;

pub trait PlatformSensors {
    /// CPU temperature in degrees Celsius. `thermal_zone` is only meaningful
    /// where the kernel exposes sysfs thermal zones.
    fn cpu_temperature(thermal_zone: &Path) -> Result<f32, SampleError>;

    /// Kernel interface index, where one is exposed. Lower indexes were
    /// registered earlier.
    fn interface_index(name: &str) -> Option<u32>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod sysinfo_components;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use sysinfo_components as platform_impl;

pub fn cpu_temperature(thermal_zone: &Path) -> Result<f32, SampleError> {
    platform_impl::Platform::cpu_temperature(thermal_zone)
}

pub fn interface_index(name: &str) -> Option<u32> {
    platform_impl::Platform::interface_index(name)
}
