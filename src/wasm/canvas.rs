use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::surface::{Surface, Vignette};

fn report(op: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(op, error = ?err, "canvas call failed");
    }
}

/// [`Surface`] over a `CanvasRenderingContext2d`.
pub(crate) struct Canvas2d {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub(crate) fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Map CSS pixels onto a backing store `scale` times larger. Must be
    /// reapplied after every backing-store resize, which resets the transform.
    pub(crate) fn set_scale(&self, scale: f64) {
        report(
            "set_transform",
            self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0),
        );
    }
}

impl Surface for Canvas2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_baseline("top");
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        report("fill_text", self.ctx.fill_text(text, x, y));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn radial_vignette(&mut self, vignette: &Vignette) {
        let gradient = match self.ctx.create_radial_gradient(
            vignette.center_x,
            vignette.center_y,
            vignette.inner_radius,
            vignette.center_x,
            vignette.center_y,
            vignette.outer_radius,
        ) {
            Ok(gradient) => gradient,
            Err(err) => {
                warn!(error = ?err, "radial gradient unavailable");
                return;
            }
        };
        report("add_color_stop", gradient.add_color_stop(0.0, vignette.inner_color));
        report("add_color_stop", gradient.add_color_stop(1.0, vignette.outer_color));
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(0.0, 0.0, vignette.center_x * 2.0, vignette.center_y * 2.0);
    }
}
