use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::iso_8859_1::{
    FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10, FONT_6X12, FONT_6X13, FONT_7X13,
};

pub const DEFAULT_FONT_NAME: &str = "5x8";
pub const DEFAULT_FONT: &MonoFont<'static> = &FONT_5X8;

pub const FONT_NAMES: [&str; 8] = ["4x6", "5x7", "5x8", "6x9", "6x10", "6x12", "6x13", "7x13"];

pub fn by_name(name: &str) -> Option<&'static MonoFont<'static>> {
    let font = match name.trim().to_ascii_lowercase().as_str() {
        "4x6" => &FONT_4X6,
        "5x7" => &FONT_5X7,
        "5x8" => &FONT_5X8,
        "6x9" => &FONT_6X9,
        "6x10" => &FONT_6X10,
        "6x12" => &FONT_6X12,
        "6x13" => &FONT_6X13,
        "7x13" => &FONT_7X13,
        _ => return None,
    };
    Some(font)
}

/// Resolves the configured font once at startup, falling back to the
/// built-in default for unknown names.
pub fn resolve(name: &str) -> &'static MonoFont<'static> {
    by_name(name).unwrap_or_else(|| {
        tracing::warn!(
            font = name,
            fallback = DEFAULT_FONT_NAME,
            available = ?FONT_NAMES,
            "unknown font, using built-in default"
        );
        DEFAULT_FONT
    })
}
