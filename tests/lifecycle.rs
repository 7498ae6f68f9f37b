use backdrop_wasm::config::{GlitchConfig, SquaresConfig};
use backdrop_wasm::lifecycle::{Debounce, Lifecycle, Phase, RESIZE_DEBOUNCE_MS};
use backdrop_wasm::surface::RecordingSurface;
use backdrop_wasm::{Background, EffectError, EffectKind, EffectRunner, FrameStatus};

type Runner = EffectRunner<Background, RecordingSurface>;

fn squares_runner() -> Runner {
    EffectRunner::new(Background::squares(SquaresConfig::default()).unwrap())
}

fn glitch_runner() -> Runner {
    EffectRunner::new(Background::glitch(GlitchConfig::default(), 3).unwrap())
}

#[test]
fn destroy_before_init_is_harmless() {
    let mut runner = squares_runner();
    assert!(runner.destroy().is_none());
    assert_eq!(runner.phase(), Phase::Destroyed);
    assert!(runner.surface().is_none());
    assert!(runner.destroy().is_none());
    assert_eq!(runner.frame(0.0), FrameStatus::Inactive);
}

#[test]
fn init_draws_once_and_runs() {
    let mut runner = squares_runner();
    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    assert_eq!(runner.phase(), Phase::Running);
    assert_eq!(runner.frames_drawn(), 1);
    assert!(!runner.surface().unwrap().is_empty());
}

#[test]
fn init_is_single_use() {
    let mut runner = squares_runner();
    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    let err = runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        EffectError::Lifecycle {
            phase: Phase::Running,
            action: "init"
        }
    ));

    runner.destroy();
    let err = runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap_err();
    assert_eq!(err.to_string(), "lifecycle error: cannot init while destroyed");
}

#[test]
fn stop_is_idempotent() {
    let mut runner = squares_runner();
    assert!(!runner.stop());
    assert_eq!(runner.phase(), Phase::Uninitialized);

    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    assert!(runner.stop());
    assert!(!runner.stop());
    assert_eq!(runner.phase(), Phase::Stopped);

    let drawn = runner.frames_drawn();
    assert_eq!(runner.frame(16.0), FrameStatus::Inactive);
    assert!(!runner.frame(32.0).keep_going());
    assert_eq!(runner.frames_drawn(), drawn);
}

#[test]
fn squares_redraw_every_frame_glitch_only_when_needed() {
    let mut squares = squares_runner();
    squares.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    assert_eq!(squares.frame(0.0), FrameStatus::Drawn);
    assert_eq!(squares.frame(16.0), FrameStatus::Drawn);
    assert_eq!(squares.frames_drawn(), 3);

    let mut glitch = glitch_runner();
    glitch.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    assert_eq!(glitch.frame(0.0), FrameStatus::Idle);
    assert_eq!(glitch.frame(16.0), FrameStatus::Idle);
    assert_eq!(glitch.frame(50.0), FrameStatus::Drawn);
    assert_eq!(glitch.frames_drawn(), 2);
}

#[test]
fn resize_applies_only_while_running() {
    let mut runner = glitch_runner();
    assert!(!runner.resize(800.0, 400.0));

    runner.init(RecordingSurface::new(), 100.0, 100.0).unwrap();
    assert!(runner.resize(800.0, 400.0));
    let diagnostics = runner.diagnostics();
    assert_eq!((diagnostics.columns, diagnostics.rows, diagnostics.cells), (80, 20, 1600));

    runner.stop();
    assert!(!runner.resize(10.0, 10.0));
    assert_eq!(runner.diagnostics().cells, 1600);
}

#[test]
fn resume_restarts_a_stopped_loop() {
    let mut runner = squares_runner();
    assert!(runner.resume().is_err());

    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    runner.stop();
    runner.resume().unwrap();
    assert_eq!(runner.phase(), Phase::Running);
    assert_eq!(runner.frame(0.0), FrameStatus::Drawn);

    runner.destroy();
    assert!(runner.resume().is_err());
}

#[test]
fn destroy_hands_back_the_surface() {
    let mut runner = squares_runner();
    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    let surface = runner.destroy();
    assert!(surface.is_some_and(|s| !s.is_empty()));
    assert_eq!(runner.phase(), Phase::Destroyed);
    assert_eq!(runner.frame(0.0), FrameStatus::Inactive);
}

#[test]
fn pointer_is_ignored_unless_running() {
    let mut runner = squares_runner();
    assert!(!runner.pointer_moved(10.0, 10.0));

    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    assert!(runner.pointer_moved(10.0, 10.0));
    runner.stop();
    assert!(!runner.pointer_left());
    assert!(runner.diagnostics().hovered.is_some());
}

#[test]
fn diagnostics_serialize_for_tooling() {
    let mut runner = squares_runner();
    runner.init(RecordingSurface::new(), 200.0, 100.0).unwrap();
    let diagnostics = runner.diagnostics();
    assert_eq!(diagnostics.kind, Some(EffectKind::Squares));
    assert_eq!(diagnostics.phase, Phase::Running);

    let json = diagnostics.to_json().unwrap();
    assert!(json.contains("\"kind\":\"squares\""), "{json}");
    assert!(json.contains("\"phase\":\"running\""), "{json}");
    assert!(json.contains("\"framesDrawn\":1"), "{json}");
    assert!(json.contains("\"offset\""), "{json}");
    assert!(!json.contains("transitioning"), "{json}");
}

#[test]
fn lifecycle_transitions() {
    let mut lifecycle = Lifecycle::new();
    assert_eq!(lifecycle.phase(), Phase::Uninitialized);
    assert!(lifecycle.resume().is_err());
    lifecycle.init().unwrap();
    assert!(lifecycle.is_running());
    assert!(lifecycle.destroy());
    assert!(!lifecycle.destroy());
    assert!(lifecycle.is_destroyed());
    assert_eq!(Phase::Stopped.to_string(), "stopped");
}

#[test]
fn debounce_keeps_only_the_latest_timer() {
    let mut debounce = Debounce::default();
    assert_eq!(debounce.delay_ms(), RESIZE_DEBOUNCE_MS);
    assert_eq!(debounce.replace(1), None);
    assert_eq!(debounce.replace(2), Some(1));
    assert_eq!(debounce.pending(), Some(2));
    assert_eq!(debounce.take(), Some(2));
    assert_eq!(debounce.take(), None);
}
