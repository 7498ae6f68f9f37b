use std::fmt;

use serde::Serialize;

use crate::error::{EffectError, EffectResult};

/// Delay used to coalesce bursts of window resize events.
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

/// Phase of a mounted effect.
///
/// `Uninitialized -> Running <-> Stopped`, and any phase `-> Destroyed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Uninitialized,
    Running,
    Stopped,
    Destroyed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
            Phase::Destroyed => "destroyed",
        })
    }
}

/// Explicit "still active" flag of a frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// First mount. Only valid once, from `Uninitialized`.
    pub fn init(&mut self) -> EffectResult<()> {
        match self.phase {
            Phase::Uninitialized => {
                self.phase = Phase::Running;
                Ok(())
            }
            phase => Err(EffectError::lifecycle(phase, "init")),
        }
    }

    /// Restart a stopped loop.
    pub fn resume(&mut self) -> EffectResult<()> {
        match self.phase {
            Phase::Stopped | Phase::Running => {
                self.phase = Phase::Running;
                Ok(())
            }
            phase => Err(EffectError::lifecycle(phase, "resume")),
        }
    }

    /// Returns whether the loop was running. Stopping twice is a no-op.
    pub fn stop(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Stopped;
            true
        } else {
            false
        }
    }

    /// Returns whether this call did the transition.
    pub fn destroy(&mut self) -> bool {
        if self.phase == Phase::Destroyed {
            return false;
        }
        self.phase = Phase::Destroyed;
        true
    }
}

/// Pending debounce timer, stored as the token the platform timer handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: i32,
    pending: Option<i32>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl Debounce {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// Record a newly scheduled timer; the previous one, if any, is returned
    /// so the caller can cancel it.
    pub fn replace(&mut self, token: i32) -> Option<i32> {
        self.pending.replace(token)
    }

    /// Clear the pending timer, either because it fired or to cancel it.
    pub fn take(&mut self) -> Option<i32> {
        self.pending.take()
    }
}
