use std::net::Ipv4Addr;

use chrono::NaiveTime;
use tracing::error;

use super::error::SampleError;
use super::snapshot::{MetricSnapshot, NO_IP, Temperature};
use crate::format::{clamp_percent, format_clock};

/// Raw host queries. Implementations may fail; [`Sampler`] turns failures
/// into fallback values.
pub trait MetricSource {
    fn ip_address(&mut self) -> Result<Ipv4Addr, SampleError>;
    fn cpu_temperature(&mut self) -> Result<f32, SampleError>;
    /// Utilisation since the previous call.
    fn cpu_usage(&mut self) -> f32;
    fn ram_usage(&mut self) -> f32;
    fn local_time(&mut self) -> NaiveTime;
}

pub struct Sampler<S> {
    source: S,
}

impl<S: MetricSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Sampler { source }
    }

    pub fn read_ip_address(&mut self) -> String {
        match self.source.ip_address() {
            Ok(addr) => addr.to_string(),
            Err(e) => {
                error!(
                    metric = "ip_address",
                    error = %e,
                    "metric read failed, showing fallback"
                );
                NO_IP.to_string()
            }
        }
    }

    pub fn read_cpu_temperature(&mut self) -> Temperature {
        match self.source.cpu_temperature() {
            Ok(degrees) if degrees.is_finite() => Temperature::Celsius(degrees),
            Ok(degrees) => {
                error!(
                    metric = "cpu_temperature",
                    value = degrees,
                    "sensor returned a non-finite value"
                );
                Temperature::Unavailable
            }
            Err(e) => {
                error!(
                    metric = "cpu_temperature",
                    error = %e,
                    "metric read failed, showing fallback"
                );
                Temperature::Unavailable
            }
        }
    }

    pub fn read_ram_usage(&mut self) -> f32 {
        clamp_percent(self.source.ram_usage())
    }

    pub fn read_cpu_usage(&mut self) -> f32 {
        clamp_percent(self.source.cpu_usage())
    }

    pub fn read_current_time(&mut self) -> String {
        format_clock(self.source.local_time())
    }

    /// Samples every metric exactly once.
    pub fn snapshot(&mut self) -> MetricSnapshot {
        MetricSnapshot {
            ip_address: self.read_ip_address(),
            cpu_usage_percent: self.read_cpu_usage(),
            cpu_temperature: self.read_cpu_temperature(),
            current_time: self.read_current_time(),
            ram_usage_percent: self.read_ram_usage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        ip: Option<Ipv4Addr>,
        temp: Option<f32>,
        cpu: f32,
        ram: f32,
        cpu_calls: usize,
    }

    impl FakeSource {
        fn healthy() -> Self {
            FakeSource {
                ip: Some(Ipv4Addr::new(192, 168, 1, 42)),
                temp: Some(45.3),
                cpu: 37.6,
                ram: 62.1,
                cpu_calls: 0,
            }
        }
    }

    impl MetricSource for FakeSource {
        fn ip_address(&mut self) -> Result<Ipv4Addr, SampleError> {
            self.ip.ok_or(SampleError::NoAddress)
        }

        fn cpu_temperature(&mut self) -> Result<f32, SampleError> {
            self.temp.ok_or_else(|| SampleError::Parse {
                path: "/sys/class/thermal/thermal_zone0/temp".to_string(),
                detail: "expected integer millidegrees, got ''".to_string(),
            })
        }

        fn cpu_usage(&mut self) -> f32 {
            self.cpu_calls += 1;
            self.cpu
        }

        fn ram_usage(&mut self) -> f32 {
            self.ram
        }

        fn local_time(&mut self) -> NaiveTime {
            NaiveTime::from_hms_opt(14, 5, 12).unwrap()
        }
    }

    #[test]
    fn healthy_snapshot() {
        let mut sampler = Sampler::new(FakeSource::healthy());
        let snap = sampler.snapshot();
        assert_eq!(snap.ip_address, "192.168.1.42");
        assert_eq!(snap.cpu_temperature, Temperature::Celsius(45.3));
        assert_eq!(snap.current_time, "14:05");
        assert!((snap.cpu_usage_percent - 37.6).abs() < f32::EPSILON);
        assert!((snap.ram_usage_percent - 62.1).abs() < f32::EPSILON);
    }

    #[test]
    fn failed_reads_use_fallbacks() {
        let mut source = FakeSource::healthy();
        source.ip = None;
        source.temp = None;
        let mut sampler = Sampler::new(source);
        let snap = sampler.snapshot();
        assert_eq!(snap.ip_address, "No IP");
        assert_eq!(snap.cpu_temperature, Temperature::Unavailable);
        assert_eq!(snap.current_time, "14:05");
    }

    #[test]
    fn non_finite_temperature_is_unavailable() {
        let mut source = FakeSource::healthy();
        source.temp = Some(f32::NAN);
        let mut sampler = Sampler::new(source);
        assert_eq!(sampler.read_cpu_temperature(), Temperature::Unavailable);
    }

    #[test]
    fn percentages_are_clamped() {
        let mut source = FakeSource::healthy();
        source.cpu = 104.0;
        source.ram = -1.0;
        let mut sampler = Sampler::new(source);
        assert_eq!(sampler.read_cpu_usage(), 100.0);
        assert_eq!(sampler.read_ram_usage(), 0.0);
    }

    #[test]
    fn cpu_is_sampled_once_per_snapshot() {
        let mut sampler = Sampler::new(FakeSource::healthy());
        sampler.snapshot();
        sampler.snapshot();
        assert_eq!(sampler.source.cpu_calls, 2);
    }
}
