use chrono::NaiveTime;

/// Clamp a utilisation reading into `0..=100`. NaN reads as idle.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Nearest whole percent, halves rounded to even.
pub fn round_percent(value: f32) -> u8 {
    clamp_percent(value).round_ties_even() as u8
}

pub fn format_percent(value: f32) -> String {
    format!("{}%", round_percent(value))
}

pub fn format_celsius(degrees: f32) -> String {
    format!("{degrees:.1}\u{b0}C")
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
