//! SSD1306 OLED driver for 128x32 panels on I2C.

use embedded_hal::i2c::{Error as _, I2c};

use super::{DisplayError, DisplaySink};
use crate::render::frame::{Frame, PAGES, WIDTH};

/// Control byte prefixes.
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

const INIT_SEQUENCE: &[&[u8]] = &[
    &[cmd::DISPLAY_OFF],
    &[cmd::SET_CLOCK_DIV, 0x80],
    &[cmd::SET_MUX_RATIO, 0x1F], // 32 lines
    &[cmd::SET_DISPLAY_OFFSET, 0x00],
    &[cmd::SET_START_LINE],
    &[cmd::SET_CHARGE_PUMP, 0x14],
    &[cmd::SET_MEMORY_MODE, 0x00], // horizontal addressing
    &[cmd::SET_SEG_REMAP],
    &[cmd::SET_COM_SCAN_DEC],
    &[cmd::SET_COM_PINS, 0x02], // sequential, 128x32
    &[cmd::SET_CONTRAST, 0x8F],
    &[cmd::SET_PRECHARGE, 0xF1],
    &[cmd::SET_VCOM_DETECT, 0x40],
    &[cmd::RESUME_FROM_RAM],
    &[cmd::SET_NORMAL],
    &[cmd::DEACTIVATE_SCROLL],
    &[cmd::DISPLAY_ON],
];

pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Ssd1306 { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Powers the panel up with the 128x32 configuration.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for command in INIT_SEQUENCE {
            self.command(command)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut buf = [0u8; 4];
        buf[0] = CONTROL_COMMAND;
        buf[1..=bytes.len()].copy_from_slice(bytes);
        self.write(&buf[..=bytes.len()])
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let address = self.address;
        self.i2c.write(address, bytes).map_err(|e| DisplayError::Bus {
            address,
            kind: e.kind(),
        })
    }

    /// Writes a full screen of page data starting at column 0, page 0.
    fn write_pages<'a>(
        &mut self,
        pages: impl Iterator<Item = &'a [u8]>,
    ) -> Result<(), DisplayError> {
        self.command(&[cmd::SET_COLUMN_ADDR, 0, (WIDTH - 1) as u8])?;
        self.command(&[cmd::SET_PAGE_ADDR, 0, (PAGES - 1) as u8])?;

        let mut buf = [0u8; WIDTH + 1];
        buf[0] = CONTROL_DATA;
        for page in pages {
            buf[1..].copy_from_slice(page);
            self.write(&buf)?;
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplaySink for Ssd1306<I2C> {
    fn push(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.write_pages((0..PAGES).map(|p| frame.page(p)))
    }

    fn clear_and_show(&mut self) -> Result<(), DisplayError> {
        static BLANK: [u8; WIDTH] = [0; WIDTH];
        self.write_pages((0..PAGES).map(|_| &BLANK[..]))
    }
}
