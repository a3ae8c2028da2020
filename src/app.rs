use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use embedded_graphics::mono_font::MonoFont;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::display::DisplaySink;
use crate::render::Renderer;
use crate::shutdown::Shutdown;
use crate::system::sampler::{MetricSource, Sampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Starting,
    Running,
    ShuttingDown,
}

/// Sample, render, push, wait; until shutdown is requested.
pub struct RefreshLoop<S, D> {
    sampler: Sampler<S>,
    renderer: Renderer,
    sink: D,
    period: Duration,
    state: LoopState,
    cycles: u64,
}

impl<S: MetricSource, D: DisplaySink> RefreshLoop<S, D> {
    pub fn new(source: S, sink: D, font: &'static MonoFont<'static>, period: Duration) -> Self {
        RefreshLoop {
            sampler: Sampler::new(source),
            renderer: Renderer::new(font),
            sink,
            period,
            state: LoopState::Starting,
            cycles: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Blanks whatever the panel showed at boot. Failing here is fatal.
    pub fn start(&mut self) -> Result<()> {
        self.sink
            .clear_and_show()
            .wrap_err("clearing display at startup")?;
        self.state = LoopState::Running;
        info!(period_secs = self.period.as_secs_f32(), "refresh loop running");
        Ok(())
    }

    /// One cycle. Push failures are logged and skipped.
    pub fn tick(&mut self) {
        let started = Instant::now();
        self.cycles += 1;

        let snapshot = self.sampler.snapshot();
        let frame = self.renderer.render(&snapshot);
        if let Err(e) = self.sink.push(frame) {
            warn!(cycle = self.cycles, error = %e, "display push failed, skipping update");
        }

        debug!(
            cycle = self.cycles,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ip = %snapshot.ip_address,
            cpu = snapshot.cpu_usage_percent,
            temp = %snapshot.cpu_temperature,
            ram = snapshot.ram_usage_percent,
            "cycle complete"
        );
    }

    /// Leaves the panel blank. Runs at most once.
    pub fn shut_down(&mut self) {
        if self.state == LoopState::ShuttingDown {
            return;
        }
        self.state = LoopState::ShuttingDown;
        match self.sink.clear_and_show() {
            Ok(()) => info!(cycles = self.cycles, "display cleared, exiting"),
            Err(e) => error!(error = %e, "failed to clear display on shutdown"),
        }
    }

    pub async fn run(&mut self, mut shutdown: Shutdown) -> Result<()> {
        self.start()?;

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.requested() => break,
                _ = ticker.tick() => {}
            }
            if shutdown.is_requested() {
                break;
            }
            self.tick();
        }

        self.shut_down();
        Ok(())
    }
}
