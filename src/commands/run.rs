//! Interactive run: session thread plus render loop

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use huectl::render::{
    AdalightStrip, DisplaySurface, HeadlessStrip, HeadlessSurface, LightStrip, TerminalBackground,
};
use huectl::theme::current_theme;
use huectl::{CommandSession, Config, Dispatcher, DisplayState, RenderLoop, ShutdownSignal};

use super::resolve::build_resolver;

/// How long to wait for the session thread after rendering stops.
const SESSION_GRACE: Duration = Duration::from_millis(200);

/// Open the display surface and LED strip described by `config`.
///
/// Failing to open a configured strip device is fatal; everything after
/// startup is retried by the render loop instead.
pub fn open_sinks(config: &Config) -> Result<(Box<dyn DisplaySurface>, Box<dyn LightStrip>)> {
    let surface: Box<dyn DisplaySurface> =
        if config.display.enabled && atty::is(atty::Stream::Stdout) {
            Box::new(TerminalBackground::new(io::stdout()))
        } else {
            Box::new(HeadlessSurface::new())
        };

    let strip: Box<dyn LightStrip> = if config.strip.device.is_empty() {
        Box::new(HeadlessStrip::new())
    } else {
        let device = Path::new(&config.strip.device);
        Box::new(
            AdalightStrip::open(
                device,
                config.strip.led_count,
                config.strip.brightness,
                config.strip.clear_on_exit,
            )
            .with_context(|| format!("Failed to open LED strip {}", device.display()))?,
        )
    };

    Ok((surface, strip))
}

/// Run the session on a background thread and the render loop on this one.
///
/// Returns once rendering has stopped. If shutdown came from Ctrl-C the
/// session thread may still be blocked reading stdin; it is left behind and
/// ends with the process.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: Config) -> Result<()> {
    let state = Arc::new(DisplayState::default());
    let shutdown = ShutdownSignal::new();

    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || shutdown.trigger())
            .context("Failed to install Ctrl-C handler")?;
    }

    let dispatcher = Dispatcher::new(Arc::clone(&state), build_resolver(&config));
    let agent = config.agent.backend.build(config.agent_timeout());
    let (surface, strip) = open_sinks(&config)?;
    let mut render = RenderLoop::new(Arc::clone(&state), surface, strip, shutdown.clone())
        .with_period(config.tick());

    let interactive = atty::is(atty::Stream::Stdin);
    let session_shutdown = shutdown.clone();
    let session = thread::Builder::new()
        .name("command-session".to_string())
        .spawn(move || {
            // Stdout is not locked for the whole session: the terminal surface
            // writes to it from the render thread.
            CommandSession::new(
                io::stdin().lock(),
                io::stdout(),
                agent,
                dispatcher,
                session_shutdown,
            )
            .with_theme(current_theme())
            .with_prompt(interactive)
            .run()
        })
        .context("Failed to start command session")?;

    let report = render.run();
    info!(
        ticks = report.ticks,
        failed_pushes = report.failed_pushes,
        version = report.last_version,
        "shutdown complete"
    );

    // The session triggers shutdown just before its thread returns.
    let deadline = Instant::now() + SESSION_GRACE;
    while !session.is_finished() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }

    if session.is_finished() {
        match session.join() {
            Ok(result) => {
                let outcome = result.context("Command session failed")?;
                info!(?outcome, "session ended");
            }
            Err(_) => warn!("command session panicked"),
        }
    }

    Ok(())
}
