pub mod font;
pub mod frame;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Drawable, Point};
use embedded_graphics::text::{Baseline, Text};

use crate::format::format_percent;
use crate::system::snapshot::MetricSnapshot;
use frame::{Frame, HEIGHT};

/// `IP:<addr> CPU:<n>%`
pub fn first_line(snapshot: &MetricSnapshot) -> String {
    format!(
        "IP:{} CPU:{}",
        snapshot.ip_address,
        format_percent(snapshot.cpu_usage_percent)
    )
}

/// `Tmp:<temp> Tm:<HH:MM> R:<n>%`
pub fn second_line(snapshot: &MetricSnapshot) -> String {
    format!(
        "Tmp:{} Tm:{} R:{}",
        snapshot.cpu_temperature,
        snapshot.current_time,
        format_percent(snapshot.ram_usage_percent)
    )
}

pub fn status_lines(snapshot: &MetricSnapshot) -> [String; 2] {
    [first_line(snapshot), second_line(snapshot)]
}

/// Owns the single frame buffer and redraws it from scratch on every call.
pub struct Renderer {
    font: &'static MonoFont<'static>,
    frame: Frame,
}

impl Renderer {
    pub fn new(font: &'static MonoFont<'static>) -> Self {
        Renderer {
            font,
            frame: Frame::new(),
        }
    }

    pub fn render(&mut self, snapshot: &MetricSnapshot) -> &Frame {
        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        let Ok(()) = self.frame.clear(BinaryColor::Off);

        let origins = [Point::zero(), Point::new(0, (HEIGHT / 2) as i32)];
        for (line, origin) in status_lines(snapshot).iter().zip(origins) {
            let Ok(_) =
                Text::with_baseline(line, origin, style, Baseline::Top).draw(&mut self.frame);
        }
        &self.frame
    }
}
