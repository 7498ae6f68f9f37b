//! Drawing seam between effects and whatever backs the canvas.
//!
//! Effects only ever talk to [`Surface`]. The browser build implements it on
//! top of a 2D canvas context; tests and diagnostics use [`RecordingSurface`].
//! Operations cannot fail from the effect's point of view: a backend that
//! hits an error logs it and drops the call.

/// Two-stop radial gradient laid over the whole surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Vignette {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub inner_color: &'static str,
    pub outer_color: &'static str,
}

impl Vignette {
    /// Transparent center fading to `outer_color` at the corners.
    pub fn corners(width: f64, height: f64, outer_color: &'static str) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            inner_radius: 0.0,
            outer_radius: (width * width + height * height).sqrt() / 2.0,
            inner_color: "rgba(0, 0, 0, 0)",
            outer_color,
        }
    }
}

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn radial_vignette(&mut self, vignette: &Vignette);
}

/// One recorded [`Surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Font(String),
    Text { text: String, x: f64, y: f64, color: String },
    FillRect { x: f64, y: f64, width: f64, height: f64, color: String },
    StrokeRect { x: f64, y: f64, width: f64, height: f64, color: String },
    Vignette(Vignette),
}

/// Surface that keeps every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color: color.to_string(),
        });
    }

    fn radial_vignette(&mut self, vignette: &Vignette) {
        self.commands.push(DrawCommand::Vignette(vignette.clone()));
    }
}
