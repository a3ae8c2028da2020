use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use chrono::{Local, NaiveTime};
use sysinfo::{Networks, System};

use super::error::SampleError;
use super::platform;
use super::sampler::MetricSource;
use crate::config::SensorsConfig;

/// Host metric source backed by `sysinfo` and the platform sensor readers.
pub struct Collector {
    sys: System,
    networks: Networks,
    thermal_zone: PathBuf,
    interface: Option<String>,
}

impl Collector {
    pub fn new(sensors: &SensorsConfig) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        // Baseline for the first cpu_usage() delta.
        sys.refresh_cpu_usage();
        Collector {
            sys,
            networks: Networks::new_with_refreshed_list(),
            thermal_zone: sensors.thermal_zone.clone(),
            interface: sensors.interface.clone(),
        }
    }
}

impl MetricSource for Collector {
    fn ip_address(&mut self) -> Result<Ipv4Addr, SampleError> {
        self.networks.refresh(true);
        let addrs = self.networks.iter().flat_map(|(name, data)| {
            data.ip_networks()
                .iter()
                .map(move |net| (name.as_str(), net.addr))
        });
        first_ipv4(addrs, self.interface.as_deref()).ok_or(SampleError::NoAddress)
    }

    fn cpu_temperature(&mut self) -> Result<f32, SampleError> {
        platform::cpu_temperature(&self.thermal_zone)
    }

    fn cpu_usage(&mut self) -> f32 {
        self.sys.refresh_cpu_usage();
        self.sys.global_cpu_usage()
    }

    fn ram_usage(&mut self) -> f32 {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return 0.0;
        }
        let used = total.saturating_sub(self.sys.available_memory());
        (used as f64 / total as f64 * 100.0) as f32
    }

    fn local_time(&mut self) -> NaiveTime {
        Local::now().time()
    }
}

/// Bridge and container links that come and go with local services.
const VIRTUAL_PREFIXES: &[&str] = &["docker", "br-", "veth", "virbr", "lxcbr"];

fn is_virtual(name: &str) -> bool {
    VIRTUAL_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Picks the address shown on the display, skipping loopback and non-IPv4
/// addresses. The preferred interface goes first, virtual links last, and
/// the rest follow kernel registration order.
pub fn first_ipv4<'a, I>(addrs: I, preferred: Option<&str>) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = (&'a str, IpAddr)>,
{
    pick_ipv4(addrs, preferred, platform::interface_index)
}

fn pick_ipv4<'a, I, F>(addrs: I, preferred: Option<&str>, index_of: F) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = (&'a str, IpAddr)>,
    F: Fn(&str) -> Option<u32>,
{
    // min_by_key keeps the first of equal ranks, so an interface's own
    // addresses stay in order. Names only break ties where no index is known.
    addrs
        .into_iter()
        .filter_map(|(name, addr)| match addr {
            IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_unspecified() => Some((name, v4)),
            _ => None,
        })
        .map(|(name, v4)| {
            let rank = (
                Some(name) != preferred,
                is_virtual(name),
                index_of(name).unwrap_or(u32::MAX),
                name,
            );
            (rank, v4)
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, addr)| addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[test]
    fn skips_loopback_and_ipv6() {
        let addrs = vec![
            ("lo", v4(127, 0, 0, 1)),
            ("eth0", IpAddr::V6(Ipv6Addr::LOCALHOST)),
            ("eth0", v4(192, 168, 1, 42)),
        ];
        assert_eq!(first_ipv4(addrs, None), Some(Ipv4Addr::new(192, 168, 1, 42)));
    }

    fn kernel_order(name: &str) -> Option<u32> {
        ["lo", "wlan0", "eth0", "docker0"]
            .iter()
            .position(|&n| n == name)
            .map(|i| i as u32 + 1)
    }

    #[test]
    fn interfaces_follow_kernel_order() {
        let addrs = vec![
            ("eth0", v4(192, 168, 1, 42)),
            ("wlan0", v4(10, 0, 0, 7)),
            ("wlan0", v4(10, 0, 0, 8)),
        ];
        assert_eq!(
            pick_ipv4(addrs, None, kernel_order),
            Some(Ipv4Addr::new(10, 0, 0, 7))
        );
    }

    #[test]
    fn unknown_indexes_fall_back_to_name_order() {
        let addrs = vec![("wlan0", v4(10, 0, 0, 7)), ("eth0", v4(192, 168, 1, 42))];
        assert_eq!(
            pick_ipv4(addrs, None, |_| None),
            Some(Ipv4Addr::new(192, 168, 1, 42))
        );
    }

    #[test]
    fn docker_bridge_is_not_shown_over_ethernet() {
        let addrs = vec![
            ("lo", v4(127, 0, 0, 1)),
            ("eth0", v4(192, 168, 1, 42)),
            ("docker0", v4(172, 17, 0, 1)),
        ];
        assert_eq!(
            first_ipv4(addrs.clone(), None),
            Some(Ipv4Addr::new(192, 168, 1, 42))
        );
        assert_eq!(
            pick_ipv4(addrs, None, |_| None),
            Some(Ipv4Addr::new(192, 168, 1, 42))
        );
    }

    #[test]
    fn virtual_links_sort_after_real_ones() {
        let addrs = vec![
            ("br-3f2a", v4(172, 18, 0, 1)),
            ("veth12ab", v4(169, 254, 3, 3)),
            ("virbr0", v4(192, 168, 122, 1)),
            ("wlan0", v4(10, 0, 0, 7)),
        ];
        assert_eq!(
            pick_ipv4(addrs, None, |_| Some(1)),
            Some(Ipv4Addr::new(10, 0, 0, 7))
        );
    }

    #[test]
    fn virtual_link_is_used_when_nothing_else_has_an_address() {
        let addrs = vec![("lo", v4(127, 0, 0, 1)), ("docker0", v4(172, 17, 0, 1))];
        assert_eq!(
            pick_ipv4(addrs, None, kernel_order),
            Some(Ipv4Addr::new(172, 17, 0, 1))
        );
    }

    #[test]
    fn preferred_interface_wins() {
        let addrs = vec![("eth0", v4(192, 168, 1, 42)), ("wlan0", v4(10, 0, 0, 7))];
        assert_eq!(
            pick_ipv4(addrs, Some("wlan0"), kernel_order),
            Some(Ipv4Addr::new(10, 0, 0, 7))
        );
    }

    #[test]
    fn missing_preferred_interface_falls_back() {
        let addrs = vec![("eth0", v4(192, 168, 1, 42))];
        assert_eq!(
            first_ipv4(addrs, Some("usb0")),
            Some(Ipv4Addr::new(192, 168, 1, 42))
        );
    }

    #[test]
    fn nothing_usable_is_none() {
        let addrs = vec![("lo", v4(127, 0, 0, 1)), ("eth0", v4(0, 0, 0, 0))];
        assert_eq!(first_ipv4(addrs, None), None);
    }

    #[test]
    fn collector_readings_are_bounded() {
        let mut collector = Collector::new(&SensorsConfig::default());
        let ram = collector.ram_usage();
        assert!((0.0..=100.0).contains(&ram), "ram out of range: {ram}");
        let cpu = collector.cpu_usage();
        assert!((0.0..=100.0).contains(&cpu), "cpu out of range: {cpu}");
        match collector.ip_address() {
            Ok(addr) => assert!(!addr.is_loopback() && !addr.is_unspecified()),
            Err(e) => assert!(matches!(e, SampleError::NoAddress), "{e}"),
        }
        if let Err(e) = collector.cpu_temperature() {
            assert!(
                matches!(
                    e,
                    SampleError::NoSensor | SampleError::Read { .. } | SampleError::Parse { .. }
                ),
                "{e}"
            );
        }
    }
}
