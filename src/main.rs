use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use infoscreen::app::RefreshLoop;
use infoscreen::config::{Config, load_config, load_config_from_path, parse_address};
use infoscreen::display::headless::HeadlessSink;
use infoscreen::display::i2c;
use infoscreen::logging;
use infoscreen::render::font;
use infoscreen::shutdown;
use infoscreen::system::collector::Collector;

#[derive(Parser)]
#[command(
    name = "infoscreen",
    version,
    about = "Show host IP, CPU, temperature, time and RAM on a 128x32 I2C OLED"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between display refreshes
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    refresh_secs: Option<u64>,

    /// I2C character device, e.g. /dev/i2c-1
    #[arg(long)]
    i2c_bus: Option<PathBuf>,

    /// Display address on the bus, e.g. 0x3C
    #[arg(long, value_parser = parse_address)]
    address: Option<u8>,

    /// Built-in font: 4x6, 5x7, 5x8, 6x9, 6x10, 6x12, 6x13, 7x13
    #[arg(long)]
    font: Option<String>,

    /// Log filter when RUST_LOG is unset, e.g. info or debug
    #[arg(long)]
    log_level: Option<String>,

    /// Log frames instead of driving a display.
    #[arg(long, default_value_t = false)]
    headless: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli)?;
    logging::init(&config.general.log_level, config.general.log_format)?;

    let period = config.general.refresh_period();
    let font = font::resolve(&config.display.font);
    let shutdown = shutdown::listen_for_signals().wrap_err("installing signal handlers")?;
    let source = Collector::new(&config.sensors);

    if cli.headless {
        let mut app = RefreshLoop::new(source, HeadlessSink::default(), font, period);
        return app.run(shutdown).await;
    }

    let panel = i2c::open(&config.display).wrap_err_with(|| {
        format!(
            "initialising display at 0x{:02X} on {}",
            config.display.address,
            config.display.i2c_bus.display()
        )
    })?;
    let mut app = RefreshLoop::new(source, panel, font, period);
    app.run(shutdown).await
}

fn load_config_for_cli(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };

    if let Some(secs) = cli.refresh_secs {
        config.general.refresh_interval_secs = secs;
    }
    if let Some(ref bus) = cli.i2c_bus {
        config.display.i2c_bus = bus.clone();
    }
    if let Some(address) = cli.address {
        config.display.address = address;
    }
    if let Some(ref name) = cli.font {
        config.display.font = name.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }

    Ok(config)
}
