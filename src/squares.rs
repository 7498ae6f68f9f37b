//! Scrolling squares: an endlessly drifting grid of outlined squares with a
//! pointer-highlighted cell and a darkened-corner vignette.

use serde::Serialize;
use tracing::debug;

use crate::config::{SquaresConfig, Validate};
use crate::diagnostics::Diagnostics;
use crate::effect::{Effect, EffectKind, Placement};
use crate::error::EffectResult;
use crate::grid::span;
use crate::surface::{Surface, Vignette};

pub const CORNER_SHADE: &str = "rgba(0, 0, 0, 0.3)";

/// Scroll position of the grid. Both axes stay in `[0, square_size)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GridOffset {
    pub x: f64,
    pub y: f64,
}

/// Grid coordinate under the pointer, counted from the top-left visible square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HoveredCell {
    pub x: i64,
    pub y: i64,
}

/// One square of the current frame, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub column: usize,
    pub row: usize,
    pub hovered: bool,
}

fn wrap(value: f64, size: f64) -> f64 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug)]
pub struct SquaresEffect {
    config: SquaresConfig,
    width: f64,
    height: f64,
    columns: usize,
    rows: usize,
    offset: GridOffset,
    hovered: Option<HoveredCell>,
}

impl SquaresEffect {
    pub fn new(config: SquaresConfig) -> EffectResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            width: 0.0,
            height: 0.0,
            columns: 0,
            rows: 0,
            offset: GridOffset::default(),
            hovered: None,
        })
    }

    pub fn config(&self) -> &SquaresConfig {
        &self.config
    }

    pub fn offset(&self) -> GridOffset {
        self.offset
    }

    pub fn hovered(&self) -> Option<HoveredCell> {
        self.hovered
    }

    /// Squares drawn per row and column: enough to cover the area plus one
    /// for the partial square scrolled in at the edge.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Move the grid one frame along the configured direction.
    pub fn advance(&mut self) {
        let size = self.config.square_size;
        let speed = self.config.effective_speed();
        let (dx, dy) = self.config.direction.offset_step();
        self.offset.x = wrap(self.offset.x + dx * speed, size);
        self.offset.y = wrap(self.offset.y + dy * speed, size);
    }

    /// Grid coordinate of the square under surface-local `(x, y)`.
    pub fn cell_at(&self, x: f64, y: f64) -> HoveredCell {
        // The offset is already wrapped, so the first visible square starts at
        // grid origin.
        let size = self.config.square_size;
        HoveredCell {
            x: ((x + self.offset.x) / size).floor() as i64,
            y: ((y + self.offset.y) / size).floor() as i64,
        }
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        let size = self.config.square_size;
        (0..self.columns).flat_map(move |column| {
            (0..self.rows).map(move |row| Square {
                x: column as f64 * size - self.offset.x,
                y: row as f64 * size - self.offset.y,
                column,
                row,
                hovered: self
                    .hovered
                    .is_some_and(|h| h.x == column as i64 && h.y == row as i64),
            })
        })
    }
}

impl Effect for SquaresEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Squares
    }

    fn placement(&self) -> Placement {
        Placement::Container
    }

    /// Keeps the offset and hovered cell.
    fn resize(&mut self, width: f64, height: f64) {
        let size = self.config.square_size;
        self.width = width;
        self.height = height;
        self.columns = match span(width, size) {
            0 => 0,
            n => n + 1,
        };
        self.rows = match span(height, size) {
            0 => 0,
            n => n + 1,
        };
        debug!(columns = self.columns, rows = self.rows, "squares grid resized");
    }

    /// Always redraws: the grid moves every frame.
    fn tick(&mut self, _now_ms: f64) -> bool {
        self.advance();
        true
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        let size = self.config.square_size;
        surface.clear(self.width, self.height);
        for square in self.squares() {
            if square.hovered {
                surface.fill_rect(square.x, square.y, size, size, &self.config.hover_fill_color);
            }
            surface.stroke_rect(square.x, square.y, size, size, &self.config.border_color);
        }
        surface.radial_vignette(&Vignette::corners(self.width, self.height, CORNER_SHADE));
    }

    fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        let cell = self.cell_at(x, y);
        if self.hovered == Some(cell) {
            return false;
        }
        self.hovered = Some(cell);
        true
    }

    fn pointer_left(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    fn describe(&self, diagnostics: &mut Diagnostics) {
        diagnostics.width = self.width;
        diagnostics.height = self.height;
        diagnostics.columns = self.columns;
        diagnostics.rows = self.rows;
        diagnostics.cells = self.columns * self.rows;
        diagnostics.offset = Some(self.offset);
        diagnostics.hovered = self.hovered;
    }
}
