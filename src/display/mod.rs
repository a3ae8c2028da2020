pub mod headless;
pub mod i2c;
pub mod ssd1306;

use crate::render::frame::Frame;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// The bus device could not be opened.
    #[error("failed to open {path}: {detail}")]
    Open { path: String, detail: String },

    /// A transfer to the controller failed.
    #[error("I2C transfer to 0x{address:02X} failed: {kind:?}")]
    Bus {
        address: u8,
        kind: embedded_hal::i2c::ErrorKind,
    },

    #[error("I2C displays are not supported on this platform")]
    Unsupported,
}

/// Where rendered frames end up.
pub trait DisplaySink {
    /// Transfers `frame` to the panel and makes it visible.
    fn push(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Blanks the whole panel immediately. Calling it twice is the same as once.
    fn clear_and_show(&mut self) -> Result<(), DisplayError>;
}
