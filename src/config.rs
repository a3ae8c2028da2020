use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use serde::Deserialize;

pub const DEFAULT_REFRESH_SECS: u64 = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
    pub sensors: SensorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_interval_secs: u64,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl GeneralConfig {
    /// Refresh period; a zero interval falls back to the default.
    pub fn refresh_period(&self) -> Duration {
        match self.refresh_interval_secs {
            0 => {
                tracing::warn!(
                    default_secs = DEFAULT_REFRESH_SECS,
                    "refresh_interval_secs = 0 is not allowed, using default"
                );
                Duration::from_secs(DEFAULT_REFRESH_SECS)
            }
            secs => Duration::from_secs(secs),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub i2c_bus: PathBuf,
    pub address: u8,
    pub font: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            i2c_bus: PathBuf::from("/dev/i2c-1"),
            address: 0x3C,
            font: "5x8".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub thermal_zone: PathBuf,
    /// Interface tried first when picking the address to show.
    pub interface: Option<String>,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        SensorsConfig {
            thermal_zone: PathBuf::from("/sys/class/thermal/thermal_zone0/temp"),
            interface: None,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("infoscreen").join("config.toml"))
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/infoscreen/config.toml")
}

/// Loads the first config file that exists: per-user, then system-wide.
pub fn load_config() -> Result<Config> {
    let candidates = config_path().into_iter().chain([system_config_path()]);
    for path in candidates {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&contents).wrap_err_with(|| format!("parsing config file {}", path.display()))
}

/// Accepts `60`, `0x3C` or `0X3c`.
pub fn parse_address(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    let addr = parsed.map_err(|e| format!("invalid I2C address `{s}`: {e}"))?;
    if addr > 0x7F {
        return Err(format!("I2C address `{s}` does not fit in 7 bits"));
    }
    Ok(addr)
}
