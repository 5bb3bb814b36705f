//! Render loop resilience against failing sinks

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use huectl::render::HeadlessSurface;
use huectl::{Dispatcher, DisplayState, RenderLoop, Resolver, RgbColor, ShutdownSignal};

use crate::helpers::{last, wait_until, HangingSearch, RecordingStrip, RecordingSurface};

#[test]
fn transient_strip_failure_is_retried_with_current_state() {
    let state = Arc::new(DisplayState::default());
    let (strip, pushes) = RecordingStrip::failing(1);
    let mut render = RenderLoop::new(
        Arc::clone(&state),
        Box::new(HeadlessSurface::new()),
        Box::new(strip),
        ShutdownSignal::new(),
    );

    state.write(RgbColor::new(200, 10, 10));
    render.tick();
    assert!(pushes.lock().unwrap().is_empty());

    state.write(RgbColor::new(10, 200, 10));
    render.tick();

    assert_eq!(*pushes.lock().unwrap(), vec![RgbColor::new(10, 200, 10)]);
    assert_eq!(render.report().failed_pushes, 1);
    assert_eq!(state.read().color, RgbColor::new(10, 200, 10));
    assert_eq!(state.read().version, 2);
}

#[test]
fn persistent_failures_do_not_stop_the_loop() {
    let state = Arc::new(DisplayState::default());
    let shutdown = ShutdownSignal::new();
    let (surface, surface_pushes) = RecordingSurface::new();
    let (strip, strip_pushes) = RecordingStrip::failing(5);
    let mut render = RenderLoop::new(state, Box::new(surface), Box::new(strip), shutdown.clone())
        .with_period(Duration::from_millis(2));
    let handle = thread::spawn(move || render.run());

    assert!(wait_until(Duration::from_secs(2), || {
        last(&strip_pushes) == Some(RgbColor::WHITE)
    }));
    shutdown.trigger();
    let report = handle.join().unwrap();

    assert_eq!(report.failed_pushes, 5);
    assert!(report.ticks > 5);
    assert!(surface_pushes.lock().unwrap().len() as u64 >= report.ticks - 1);
}

#[test]
fn shutdown_is_observed_within_a_tick() {
    let shutdown = ShutdownSignal::new();
    let mut render = RenderLoop::new(
        Arc::new(DisplayState::default()),
        Box::new(HeadlessSurface::new()),
        Box::new(RecordingStrip::new().0),
        shutdown.clone(),
    )
    .with_period(Duration::from_millis(500));
    let handle = thread::spawn(move || render.run());

    thread::sleep(Duration::from_millis(50));
    let triggered = std::time::Instant::now();
    shutdown.trigger();
    handle.join().unwrap();
    // Woken by the signal rather than the next 500ms tick
    assert!(triggered.elapsed() < Duration::from_millis(400));
}

#[test]
fn slow_name_lookup_does_not_stall_rendering() {
    let state = Arc::new(DisplayState::default());
    let shutdown = ShutdownSignal::new();
    let (surface, surface_pushes) = RecordingSurface::new();
    let (strip, _) = RecordingStrip::new();
    let mut render = RenderLoop::new(
        Arc::clone(&state),
        Box::new(surface),
        Box::new(strip),
        shutdown.clone(),
    )
    .with_period(Duration::from_millis(5));
    let render_thread = thread::spawn(move || render.run());

    let dispatcher = Dispatcher::new(
        Arc::clone(&state),
        Resolver::with_timeout(Arc::new(HangingSearch), Duration::from_secs(1)),
    );
    let lookup = thread::spawn(move || dispatcher.set_by_name("teal"));

    // Let the lookup get going, then watch the render loop while it hangs
    thread::sleep(Duration::from_millis(50));
    let before = surface_pushes.lock().unwrap().len();
    thread::sleep(Duration::from_millis(300));
    let during = surface_pushes.lock().unwrap().len();
    assert!(!lookup.is_finished(), "lookup should still be in flight");
    assert!(during >= before + 10, "render stalled: {} -> {}", before, during);

    let message = lookup.join().unwrap();
    assert!(message.starts_with("Could not look up 'teal'"), "{}", message);
    assert_eq!(state.read().version, 0);

    shutdown.trigger();
    let report = render_thread.join().unwrap();
    assert!(report.ticks > during as u64);
}
