//! Platform-neutral driver: owns an effect, its surface and its lifecycle.
//!
//! The browser layer wraps this in a frame-callback loop; tests drive it by
//! hand with explicit timestamps.

use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::effect::Effect;
use crate::error::{EffectError, EffectResult};
use crate::lifecycle::{Lifecycle, Phase};
use crate::surface::Surface;

/// Outcome of one frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The runner is not running; the loop must not reschedule.
    Inactive,
    /// Ticked, nothing to redraw.
    Idle,
    Drawn,
}

impl FrameStatus {
    pub fn keep_going(self) -> bool {
        self != FrameStatus::Inactive
    }
}

#[derive(Debug)]
pub struct EffectRunner<E, S> {
    effect: E,
    surface: Option<S>,
    lifecycle: Lifecycle,
    frames_drawn: u64,
}

impl<E: Effect, S: Surface> EffectRunner<E, S> {
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            surface: None,
            lifecycle: Lifecycle::new(),
            frames_drawn: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Attach `surface`, size the effect to it, draw once and start running.
    pub fn init(&mut self, surface: S, width: f64, height: f64) -> EffectResult<()> {
        self.lifecycle.init()?;
        self.surface = Some(surface);
        self.effect.resize(width, height);
        self.redraw();
        info!(kind = ?self.effect.kind(), width, height, "effect mounted");
        Ok(())
    }

    /// One frame. The active check comes first so a callback that was
    /// already dispatched when the loop stopped does nothing.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.lifecycle.is_running() {
            return FrameStatus::Inactive;
        }
        if self.effect.tick(now_ms) {
            self.redraw();
            FrameStatus::Drawn
        } else {
            FrameStatus::Idle
        }
    }

    /// Resize and redraw. Ignored unless running; returns whether applied.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.lifecycle.is_running() {
            debug!(phase = %self.phase(), "resize ignored");
            return false;
        }
        self.effect.resize(width, height);
        self.redraw();
        true
    }

    /// Returns whether the loop was running.
    pub fn stop(&mut self) -> bool {
        let stopped = self.lifecycle.stop();
        if stopped {
            debug!(kind = ?self.effect.kind(), "effect stopped");
        }
        stopped
    }

    pub fn resume(&mut self) -> EffectResult<()> {
        if self.surface.is_none() {
            return Err(EffectError::lifecycle(self.phase(), "resume"));
        }
        self.lifecycle.resume()
    }

    /// Stop for good and hand the surface back so the caller can detach it.
    /// Safe from any phase, including before `init` and after a previous
    /// `destroy`.
    pub fn destroy(&mut self) -> Option<S> {
        self.lifecycle.stop();
        if self.lifecycle.destroy() {
            debug!(kind = ?self.effect.kind(), "effect destroyed");
        }
        self.surface.take()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        self.lifecycle.is_running() && self.effect.pointer_moved(x, y)
    }

    pub fn pointer_left(&mut self) -> bool {
        self.lifecycle.is_running() && self.effect.pointer_left()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let mut diagnostics = Diagnostics {
            kind: Some(self.effect.kind()),
            phase: self.phase(),
            frames_drawn: self.frames_drawn,
            ..Diagnostics::default()
        };
        self.effect.describe(&mut diagnostics);
        diagnostics
    }

    fn redraw(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.effect.draw(surface);
            self.frames_drawn += 1;
        }
    }
}
