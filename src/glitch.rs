//! Letter glitch: a viewport-filling grid of characters where a small random
//! share of cells is re-rolled on every gated tick, optionally fading to its
//! new color over the following frames.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::color::interpolate;
use crate::config::{GlitchConfig, Validate};
use crate::diagnostics::Diagnostics;
use crate::effect::{Effect, EffectKind, Placement};
use crate::error::EffectResult;
use crate::grid::GridDims;
use crate::surface::Surface;

/// Share of cells re-rolled per gated tick.
pub const UPDATE_RATIO: f64 = 0.05;
/// Transition progress added per frame.
pub const TRANSITION_STEP: f64 = 0.05;

pub const OUTER_VIGNETTE_CSS: &str =
    "radial-gradient(circle, rgba(0,0,0,0) 60%, rgba(0,0,0,1) 100%)";
pub const CENTER_VIGNETTE_CSS: &str =
    "radial-gradient(circle, rgba(0,0,0,0.8) 0%, rgba(0,0,0,0) 60%)";

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub character: char,
    /// Color drawn this frame.
    pub current_color: String,
    /// Color the running transition started from.
    pub start_color: String,
    pub target_color: String,
    /// `0.0` at the start of a transition, `1.0` once settled.
    pub color_progress: f64,
}

impl Cell {
    pub fn in_transition(&self) -> bool {
        self.color_progress < 1.0
    }
}

/// Cells re-rolled per gated tick for a grid of `total` cells.
pub fn update_count(total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    ((total as f64 * UPDATE_RATIO).floor() as usize).max(1)
}

fn pick_char(rng: &mut StdRng, glyphs: &[char]) -> char {
    glyphs[rng.gen_range(0..glyphs.len())]
}

fn pick_color(rng: &mut StdRng, palette: &[String]) -> String {
    palette[rng.gen_range(0..palette.len())].clone()
}

#[derive(Debug)]
pub struct GlitchEffect {
    config: GlitchConfig,
    glyphs: Vec<char>,
    width: f64,
    height: f64,
    dims: GridDims,
    cells: Vec<Cell>,
    last_glitch_ms: Option<f64>,
    rng: StdRng,
}

impl GlitchEffect {
    pub fn new(config: GlitchConfig, seed: u64) -> EffectResult<Self> {
        config.validate()?;
        let glyphs = config.characters.chars().collect();
        Ok(Self {
            config,
            glyphs,
            width: 0.0,
            height: 0.0,
            dims: GridDims::default(),
            cells: Vec::new(),
            last_glitch_ms: None,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if column >= self.dims.columns {
            return None;
        }
        self.cells.get(row * self.dims.columns + column)
    }

    fn allocate(&mut self) {
        let total = self.dims.len();
        let mut cells = Vec::with_capacity(total);
        for _ in 0..total {
            let current = pick_color(&mut self.rng, &self.config.glitch_colors);
            cells.push(Cell {
                character: pick_char(&mut self.rng, &self.glyphs),
                start_color: current.clone(),
                current_color: current,
                target_color: pick_color(&mut self.rng, &self.config.glitch_colors),
                color_progress: 1.0,
            });
        }
        self.cells = cells;
    }

    /// Re-roll [`update_count`] distinct cells: new character, new target
    /// color. Without smoothing the color snaps; with it the cell restarts its
    /// transition from the color it currently shows.
    pub fn glitch(&mut self) -> usize {
        let total = self.cells.len();
        let count = update_count(total);
        if count == 0 {
            return 0;
        }
        let picks = rand::seq::index::sample(&mut self.rng, total, count);
        for index in picks.iter() {
            let character = pick_char(&mut self.rng, &self.glyphs);
            let target = pick_color(&mut self.rng, &self.config.glitch_colors);
            let cell = &mut self.cells[index];
            cell.character = character;
            if self.config.smooth {
                cell.start_color = cell.current_color.clone();
                cell.target_color = target;
                cell.color_progress = 0.0;
            } else {
                cell.current_color = target.clone();
                cell.start_color = target.clone();
                cell.target_color = target;
                cell.color_progress = 1.0;
            }
        }
        trace!(count, total, "glitched cells");
        count
    }

    /// Step every in-flight transition. A cell whose endpoints do not parse
    /// keeps its displayed color. Returns whether any displayed color changed.
    pub fn advance_transitions(&mut self) -> bool {
        let mut changed = false;
        for cell in self.cells.iter_mut().filter(|c| c.in_transition()) {
            cell.color_progress = (cell.color_progress + TRANSITION_STEP).min(1.0);
            if let Some(rgb) = interpolate(&cell.start_color, &cell.target_color, cell.color_progress)
            {
                cell.current_color = rgb.to_string();
                changed = true;
            }
        }
        changed
    }
}

impl Effect for GlitchEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::LetterGlitch
    }

    fn placement(&self) -> Placement {
        Placement::Viewport
    }

    /// Reallocates every cell; previous characters and transitions are lost.
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.dims = GridDims::covering(
            width,
            height,
            self.config.char_width,
            self.config.char_height,
        );
        self.allocate();
        debug!(
            columns = self.dims.columns,
            rows = self.dims.rows,
            "letter glitch grid resized"
        );
    }

    fn tick(&mut self, now_ms: f64) -> bool {
        let mut redraw = false;
        match self.last_glitch_ms {
            None => self.last_glitch_ms = Some(now_ms),
            Some(last) if now_ms - last >= self.config.glitch_speed => {
                self.glitch();
                self.last_glitch_ms = Some(now_ms);
                redraw = true;
            }
            Some(_) => {}
        }
        if self.config.smooth && self.advance_transitions() {
            redraw = true;
        }
        redraw
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.cells.is_empty() || self.dims.columns == 0 {
            return;
        }
        surface.clear(self.width, self.height);
        surface.set_font(&self.config.font());
        let mut text = [0u8; 4];
        for (index, cell) in self.cells.iter().enumerate() {
            let (column, row) = self.dims.position(index);
            surface.fill_text(
                cell.character.encode_utf8(&mut text),
                column as f64 * self.config.char_width,
                row as f64 * self.config.char_height,
                &cell.current_color,
            );
        }
    }

    fn overlays(&self) -> Vec<&'static str> {
        let mut layers = Vec::new();
        if self.config.outer_vignette {
            layers.push(OUTER_VIGNETTE_CSS);
        }
        if self.config.center_vignette {
            layers.push(CENTER_VIGNETTE_CSS);
        }
        layers
    }

    fn describe(&self, diagnostics: &mut Diagnostics) {
        diagnostics.width = self.width;
        diagnostics.height = self.height;
        diagnostics.columns = self.dims.columns;
        diagnostics.rows = self.dims.rows;
        diagnostics.cells = self.cells.len();
        diagnostics.transitioning = Some(self.cells.iter().filter(|c| c.in_transition()).count());
    }
}
