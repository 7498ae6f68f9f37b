//! The contract every canvas background fulfils, and the enum the mount
//! layer drives.

use std::str::FromStr;

use serde::Serialize;

use crate::config::{GlitchConfig, SquaresConfig};
use crate::diagnostics::Diagnostics;
use crate::error::{EffectError, EffectResult};
use crate::glitch::GlitchEffect;
use crate::squares::SquaresEffect;
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    LetterGlitch,
    Squares,
}

impl FromStr for EffectKind {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letterGlitch" | "letters" => Ok(EffectKind::LetterGlitch),
            "squares" => Ok(EffectKind::Squares),
            other => Err(EffectError::config(format!("unknown background `{other}`"))),
        }
    }
}

/// How the canvas sits in the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Fixed to the window, sized from the viewport, backing store scaled by
    /// the device pixel ratio.
    Viewport,
    /// Absolutely positioned in its container and sized from the container box.
    Container,
}

/// Per-frame state machine of one animated background.
///
/// All methods run on the single frame/event queue. `tick` is the only place
/// time enters; `draw` never mutates.
pub trait Effect {
    fn kind(&self) -> EffectKind;

    fn placement(&self) -> Placement;

    /// Recompute derived geometry for a new drawing area, in CSS pixels.
    fn resize(&mut self, width: f64, height: f64);

    /// Advance to `now_ms`. Returns whether the surface must be redrawn.
    fn tick(&mut self, now_ms: f64) -> bool;

    fn draw(&self, surface: &mut dyn Surface);

    /// Pointer at surface-local coordinates. Returns whether state changed.
    fn pointer_moved(&mut self, _x: f64, _y: f64) -> bool {
        false
    }

    fn pointer_left(&mut self) -> bool {
        false
    }

    /// CSS backgrounds of overlay layers stacked above the canvas.
    fn overlays(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn describe(&self, diagnostics: &mut Diagnostics);
}

/// Either background, so one driver can mount whichever the page selects.
#[derive(Debug)]
pub enum Background {
    Glitch(GlitchEffect),
    Squares(SquaresEffect),
}

impl Background {
    pub fn glitch(config: GlitchConfig, seed: u64) -> EffectResult<Self> {
        GlitchEffect::new(config, seed).map(Background::Glitch)
    }

    pub fn squares(config: SquaresConfig) -> EffectResult<Self> {
        SquaresEffect::new(config).map(Background::Squares)
    }

    /// The background a content page mounts for `kind`.
    pub fn page_preset(kind: EffectKind, seed: u64) -> EffectResult<Self> {
        match kind {
            EffectKind::LetterGlitch => Self::glitch(GlitchConfig::page_preset(), seed),
            EffectKind::Squares => Self::squares(SquaresConfig::page_preset()),
        }
    }

    fn inner(&self) -> &dyn Effect {
        match self {
            Background::Glitch(e) => e,
            Background::Squares(e) => e,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Effect {
        match self {
            Background::Glitch(e) => e,
            Background::Squares(e) => e,
        }
    }
}

impl Effect for Background {
    fn kind(&self) -> EffectKind {
        self.inner().kind()
    }

    fn placement(&self) -> Placement {
        self.inner().placement()
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.inner_mut().resize(width, height)
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        self.inner_mut().tick(now_ms)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.inner().draw(surface)
    }

    fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        self.inner_mut().pointer_moved(x, y)
    }

    fn pointer_left(&mut self) -> bool {
        self.inner_mut().pointer_left()
    }

    fn overlays(&self) -> Vec<&'static str> {
        self.inner().overlays()
    }

    fn describe(&self, diagnostics: &mut Diagnostics) {
        self.inner().describe(diagnostics)
    }
}
