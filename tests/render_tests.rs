use infoscreen::render::font::DEFAULT_FONT;
use infoscreen::render::{Renderer, status_lines};
use infoscreen::system::snapshot::{MetricSnapshot, Temperature};
use insta::assert_debug_snapshot;
use proptest::prelude::*;

fn example_snapshot() -> MetricSnapshot {
    MetricSnapshot {
        ip_address: "192.168.1.42".to_string(),
        cpu_usage_percent: 37.6,
        cpu_temperature: Temperature::Celsius(45.3),
        current_time: "14:05".to_string(),
        ram_usage_percent: 62.1,
    }
}

fn snapshot_strategy() -> impl Strategy<Value = MetricSnapshot> {
    let temperature = prop_oneof![
        Just(Temperature::Unavailable),
        (-40.0f32..120.0).prop_map(Temperature::Celsius),
    ];
    (
        prop_oneof![Just("No IP".to_string()), "[0-9]{1,3}(\\.[0-9]{1,3}){3}"],
        0.0f32..=100.0,
        temperature,
        "[0-2][0-9]:[0-5][0-9]",
        0.0f32..=100.0,
    )
        .prop_map(|(ip_address, cpu, cpu_temperature, current_time, ram)| MetricSnapshot {
            ip_address,
            cpu_usage_percent: cpu,
            cpu_temperature,
            current_time,
            ram_usage_percent: ram,
        })
}

fn percent_field<'a>(line: &'a str, label: &str) -> &'a str {
    line.rsplit(label).next().unwrap_or_default()
}

#[test]
fn end_to_end_lines_snapshot() {
    let lines = status_lines(&example_snapshot());
    assert_debug_snapshot!("end_to_end_lines", lines);
}

#[test]
fn default_font_fits_default_content() {
    let width = DEFAULT_FONT.character_size.width as usize;
    for line in status_lines(&example_snapshot()) {
        assert!(
            line.chars().count() * width <= 128,
            "`{line}` overflows the panel"
        );
    }
}

#[test]
fn each_render_starts_from_a_cleared_surface() {
    let mut renderer = Renderer::new(DEFAULT_FONT);
    let first = renderer.render(&example_snapshot()).clone();
    let blank_ip = MetricSnapshot {
        ip_address: String::new(),
        ..example_snapshot()
    };
    let shorter = renderer.render(&blank_ip).clone();
    assert!(shorter.lit_pixels() < first.lit_pixels());
}

proptest! {
    #[test]
    fn identical_snapshots_render_identically(
        a in snapshot_strategy(),
        b in snapshot_strategy(),
    ) {
        let expected = Renderer::new(DEFAULT_FONT).render(&a).clone();
        let mut reused = Renderer::new(DEFAULT_FONT);
        reused.render(&b);
        prop_assert_eq!(reused.render(&a), &expected);
        prop_assert_eq!(reused.render(&a), &expected);
    }

    #[test]
    fn percentages_are_whole_and_bounded(
        cpu in any::<f32>(),
        ram in any::<f32>(),
    ) {
        let snapshot = MetricSnapshot {
            cpu_usage_percent: cpu,
            ram_usage_percent: ram,
            ..example_snapshot()
        };
        let [one, two] = status_lines(&snapshot);
        for field in [percent_field(&one, "CPU:"), percent_field(&two, "R:")] {
            prop_assert!(field.ends_with('%'), "missing unit in {}", field);
            prop_assert!(!field.contains('.'), "decimal point in {}", field);
            let value: u8 = field.trim_end_matches('%').parse().unwrap();
            prop_assert!(value <= 100, "out of range: {}", value);
        }
    }
}
