//! Effect options as handed over by page scripts.
//!
//! Options travel as JSON objects with camelCase keys. Every key is optional;
//! an empty string or `{}` yields the defaults below.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{EffectError, EffectResult};

pub const DEFAULT_GLITCH_COLORS: [&str; 3] = ["#2b4539", "#61dca3", "#61b3dc"];
pub const DEFAULT_CHARACTERS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ!@#$&*()-_+=/[]{};:<>.,0123456789";

/// Squares never scroll slower than this many pixels per frame.
pub const MIN_SCROLL_SPEED: f64 = 0.1;

/// Options for the letter glitch effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlitchConfig {
    pub glitch_colors: Vec<String>,
    /// Minimum milliseconds between heavy updates.
    pub glitch_speed: f64,
    pub center_vignette: bool,
    pub outer_vignette: bool,
    pub smooth: bool,
    pub characters: String,
    pub font_size: f64,
    pub char_width: f64,
    pub char_height: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            glitch_colors: DEFAULT_GLITCH_COLORS.iter().map(|c| c.to_string()).collect(),
            glitch_speed: 50.0,
            center_vignette: false,
            outer_vignette: true,
            smooth: true,
            characters: DEFAULT_CHARACTERS.to_string(),
            font_size: 16.0,
            char_width: 10.0,
            char_height: 20.0,
        }
    }
}

impl GlitchConfig {
    /// Settings the content pages mount with.
    pub fn page_preset() -> Self {
        Self {
            glitch_speed: 150.0,
            ..Self::default()
        }
    }

    pub fn font(&self) -> String {
        format!("{}px monospace", self.font_size)
    }
}

/// Scroll direction of the squares grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
    Diagonal,
    None,
}

impl Direction {
    /// Sign applied to the speed on each axis of the grid offset.
    pub fn offset_step(self) -> (f64, f64) {
        match self {
            Direction::Right => (-1.0, 0.0),
            Direction::Left => (1.0, 0.0),
            Direction::Up => (0.0, 1.0),
            Direction::Down => (0.0, -1.0),
            Direction::Diagonal => (-1.0, -1.0),
            Direction::None => (0.0, 0.0),
        }
    }
}

/// Options for the scrolling squares effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SquaresConfig {
    pub direction: Direction,
    pub speed: f64,
    pub border_color: String,
    pub square_size: f64,
    pub hover_fill_color: String,
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            speed: 1.0,
            border_color: "#999".to_string(),
            square_size: 40.0,
            hover_fill_color: "#222".to_string(),
        }
    }
}

impl SquaresConfig {
    pub fn page_preset() -> Self {
        Self {
            direction: Direction::Diagonal,
            speed: 0.5,
            border_color: "#333".to_string(),
            square_size: 50.0,
            hover_fill_color: "#444".to_string(),
        }
    }

    /// Per-frame step, never below [`MIN_SCROLL_SPEED`].
    pub fn effective_speed(&self) -> f64 {
        if self.speed.is_nan() {
            return MIN_SCROLL_SPEED;
        }
        self.speed.max(MIN_SCROLL_SPEED)
    }
}

/// Checks run once when options are accepted.
pub trait Validate {
    fn validate(&self) -> EffectResult<()>;
}

fn positive(name: &str, value: f64) -> EffectResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EffectError::config(format!("{name} must be a positive number, got {value}")))
    }
}

impl Validate for GlitchConfig {
    fn validate(&self) -> EffectResult<()> {
        if self.glitch_colors.is_empty() {
            return Err(EffectError::config("glitchColors must not be empty"));
        }
        if self.characters.is_empty() {
            return Err(EffectError::config("characters must not be empty"));
        }
        positive("glitchSpeed", self.glitch_speed)?;
        positive("fontSize", self.font_size)?;
        positive("charWidth", self.char_width)?;
        positive("charHeight", self.char_height)
    }
}

impl Validate for SquaresConfig {
    fn validate(&self) -> EffectResult<()> {
        positive("squareSize", self.square_size)
    }
}

/// Parse and validate options from a JSON object. Blank input means defaults.
pub fn from_json<T>(json: &str) -> EffectResult<T>
where
    T: DeserializeOwned + Default + Validate,
{
    let config = if json.trim().is_empty() {
        T::default()
    } else {
        serde_json::from_str(json)?
    };
    config.validate()?;
    Ok(config)
}
