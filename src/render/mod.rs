//! Fixed-rate render loop and its output sinks.
//!
//! # Architecture
//!
//! The render loop runs on its own thread and never touches the network.
//! Each tick it takes one [`Snapshot`] of the shared [`DisplayState`] and
//! pushes that color to both sinks:
//! - [`DisplaySurface`]: `set_background` + `present`
//! - [`LightStrip`]: `set_all` + `flush`
//!
//! A sink failure is logged and the loop carries on; the next tick pushes the
//! then-current color again, so a sink that comes back recovers on its own.
//! The loop stops only when the [`ShutdownSignal`] fires, tears both sinks
//! down, and never restarts.
//!
//! # Submodules
//! - `sink`: sink traits and [`SinkError`]
//! - `terminal`: terminal background surface (OSC 11)
//! - `adalight`: serial LED strip driver
//! - `headless`: log-only sinks

mod adalight;
mod headless;
mod sink;
mod terminal;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::shutdown::ShutdownSignal;
use crate::state::{DisplayState, Snapshot};

pub use adalight::AdalightStrip;
pub use headless::{HeadlessStrip, HeadlessSurface};
pub use sink::{DisplaySurface, LightStrip, SinkError};
pub use terminal::{ResetTerminalBackground, SetTerminalBackground, TerminalBackground};

/// Default tick period (about 30Hz).
pub const DEFAULT_TICK: Duration = Duration::from_millis(33);

/// Lifecycle of a render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// Ticking, or ready to tick.
    Running,
    /// Shut down and torn down. Terminal.
    Stopped,
}

/// Counters collected while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Ticks executed.
    pub ticks: u64,
    /// Individual sink pushes that failed.
    pub failed_pushes: u64,
    /// Version of the last snapshot pushed.
    pub last_version: u64,
}

/// Tracks whether a sink is currently failing, to keep logs readable at 30Hz.
#[derive(Debug, Default)]
struct SinkHealth {
    failing: bool,
}

impl SinkHealth {
    /// Record a push result. Returns true if the push failed.
    fn record(&mut self, sink: &'static str, result: Result<(), SinkError>) -> bool {
        match result {
            Ok(()) => {
                if self.failing {
                    info!(sink, "sink recovered");
                    self.failing = false;
                }
                false
            }
            Err(error) => {
                if self.failing {
                    debug!(sink, %error, "sink push still failing");
                } else {
                    warn!(sink, %error, "sink push failed, will retry next tick");
                    self.failing = true;
                }
                true
            }
        }
    }
}

/// Reads the shared state every tick and pushes it to the sinks.
pub struct RenderLoop {
    state: Arc<DisplayState>,
    surface: Box<dyn DisplaySurface>,
    strip: Box<dyn LightStrip>,
    shutdown: ShutdownSignal,
    period: Duration,
    phase: RenderPhase,
    report: RenderReport,
    surface_health: SinkHealth,
    strip_health: SinkHealth,
}

impl RenderLoop {
    /// Create a loop at [`DEFAULT_TICK`].
    pub fn new(
        state: Arc<DisplayState>,
        surface: Box<dyn DisplaySurface>,
        strip: Box<dyn LightStrip>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            state,
            surface,
            strip,
            shutdown,
            period: DEFAULT_TICK,
            phase: RenderPhase::Running,
            report: RenderReport::default(),
            surface_health: SinkHealth::default(),
            strip_health: SinkHealth::default(),
        }
    }

    /// Set the tick period. Zero is raised to one millisecond.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn report(&self) -> RenderReport {
        self.report
    }

    /// Run one tick: read the state once and push it to both sinks.
    ///
    /// Returns the snapshot that was pushed. Does nothing once stopped.
    pub fn tick(&mut self) -> Option<Snapshot> {
        if self.phase == RenderPhase::Stopped {
            return None;
        }

        let snapshot = self.state.read();
        let color = snapshot.color;

        let surface_result = self
            .surface
            .set_background(color)
            .and_then(|_| self.surface.present());
        let strip_result = self.strip.set_all(color).and_then(|_| self.strip.flush());

        let surface_failed = self
            .surface_health
            .record(self.surface.name(), surface_result);
        let strip_failed = self.strip_health.record(self.strip.name(), strip_result);

        self.report.ticks += 1;
        self.report.failed_pushes += u64::from(surface_failed) + u64::from(strip_failed);
        self.report.last_version = snapshot.version;
        Some(snapshot)
    }

    /// Tick at the configured period until shutdown, then tear the sinks down.
    ///
    /// Shutdown is noticed within one period. Calling `run` again after it
    /// returned is a no-op.
    pub fn run(&mut self) -> RenderReport {
        if self.phase == RenderPhase::Stopped {
            return self.report;
        }

        info!(period_ms = self.period.as_millis() as u64, "render loop started");
        let mut next_tick = Instant::now();

        while !self.shutdown.is_triggered() {
            self.tick();

            let now = Instant::now();
            let wait = match next_tick.checked_add(self.period) {
                Some(next) => {
                    // Fell behind; skip missed ticks instead of bursting.
                    next_tick = next.max(now);
                    next_tick - now
                }
                None => {
                    next_tick = now;
                    self.period
                }
            };
            if self.shutdown.wait_timeout(wait) {
                break;
            }
        }

        self.stop();
        info!(
            ticks = self.report.ticks,
            failed_pushes = self.report.failed_pushes,
            "render loop stopped"
        );
        self.report
    }

    fn stop(&mut self) {
        self.phase = RenderPhase::Stopped;
        if let Err(error) = self.surface.teardown() {
            warn!(sink = self.surface.name(), %error, "display teardown failed");
        }
        if let Err(error) = self.strip.teardown() {
            warn!(sink = self.strip.name(), %error, "strip teardown failed");
        }
    }
}
