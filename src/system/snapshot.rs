use std::fmt;

use crate::format::format_celsius;

pub const NO_IP: &str = "No IP";
pub const TEMPERATURE_UNAVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    Celsius(f32),
    Unavailable,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Celsius(degrees) => f.write_str(&format_celsius(*degrees)),
            Temperature::Unavailable => f.write_str(TEMPERATURE_UNAVAILABLE),
        }
    }
}

/// One cycle's worth of readings. Percentages are already clamped to `0..=100`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    pub ip_address: String,
    pub cpu_usage_percent: f32,
    pub cpu_temperature: Temperature,
    pub current_time: String,
    pub ram_usage_percent: f32,
}
