// Renderer side of the canvas layers: the surface size, the handful of
// drawing calls a frame needs, and the 2D canvas implementation of them.

use crate::color::Paint;
use crate::error::FieldError;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Pixel dimensions of a drawing target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Surface { width, height }
    }

    pub fn contains(&self, pos: Vector2<f64>) -> bool {
        pos[0] >= 0.0
            && pos[0] <= self.width as f64
            && pos[1] >= 0.0
            && pos[1] <= self.height as f64
    }
}

pub trait DrawTarget {
    fn clear(&mut self, surface: Surface) -> Result<(), FieldError>;
    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, paint: &Paint) -> Result<(), FieldError>;
    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        paint: &Paint,
    ) -> Result<(), FieldError>;
    /// Called when the host surface changes size.
    fn resize(&mut self, _surface: Surface) {}
}

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // Grabs the 2d context from a canvas already found on the DOM
    pub fn new(canvas: HtmlCanvasElement, label: &str) -> Result<Self, FieldError> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| FieldError::NoContext(label.to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::NoContext(label.to_owned()))?;
        Ok(CanvasRenderer { canvas, context })
    }
}

impl DrawTarget for CanvasRenderer {
    fn clear(&mut self, surface: Surface) -> Result<(), FieldError> {
        self.context
            .clear_rect(0.0, 0.0, surface.width as f64, surface.height as f64);
        Ok(())
    }

    fn fill_disc(&mut self, center: Vector2<f64>, radius: f64, paint: &Paint) -> Result<(), FieldError> {
        self.context.begin_path();
        self.context.arc(center[0], center[1], radius.max(0.0), 0.0, PI * 2.0)?;
        self.context.set_fill_style_str(&paint.to_css());
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        width: f64,
        paint: &Paint,
    ) -> Result<(), FieldError> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style_str(&paint.to_css());
        self.context.set_line_width(width);
        self.context.stroke();
        Ok(())
    }

    // Setting the canvas size also resets its backing store
    fn resize(&mut self, surface: Surface) {
        self.canvas.set_width(surface.width);
        self.canvas.set_height(surface.height);
    }
}
