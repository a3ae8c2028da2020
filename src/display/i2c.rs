use super::DisplayError;
use crate::config::DisplayConfig;

#[cfg(target_os = "linux")]
pub type Panel = super::ssd1306::Ssd1306<linux_embedded_hal::I2cdev>;

/// Opens the I2C character device and powers the panel up.
#[cfg(target_os = "linux")]
pub fn open(config: &DisplayConfig) -> Result<Panel, DisplayError> {
    let bus = linux_embedded_hal::I2cdev::new(&config.i2c_bus).map_err(|e| DisplayError::Open {
        path: config.i2c_bus.display().to_string(),
        detail: e.to_string(),
    })?;
    let mut panel = super::ssd1306::Ssd1306::new(bus, config.address);
    panel.init()?;
    tracing::info!(
        bus = %config.i2c_bus.display(),
        address = panel.address(),
        "display initialised"
    );
    Ok(panel)
}

#[cfg(not(target_os = "linux"))]
pub type Panel = super::headless::HeadlessSink;

#[cfg(not(target_os = "linux"))]
pub fn open(_config: &DisplayConfig) -> Result<Panel, DisplayError> {
    Err(DisplayError::Unsupported)
}
