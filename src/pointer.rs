// Pointer position as seen by the canvas layers, and the attraction it
// exerts on nearby particles

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub pos: Vector2<f64>,
}

impl PointerState {
    pub fn new(x: f64, y: f64) -> Self {
        PointerState { pos: [x, y] }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = [x, y];
    }

    /// Velocity nudge toward the pointer for a point at `point`.
    ///
    /// Inside `radius` the pull grows linearly from nothing at the edge to
    /// `strength` at the center, and is applied along the raw offset so
    /// farther points inside the radius still move noticeably. A point
    /// sitting exactly on the pointer has no direction to move in and gets
    /// no nudge.
    pub fn attraction(&self, point: Vector2<f64>, radius: f64, strength: f64) -> Vector2<f64> {
        let to_pointer = vecmath::vec2_sub(self.pos, point);
        let distance = vecmath::vec2_len(to_pointer);
        if distance <= 0.0 || !(distance < radius) {
            return [0.0, 0.0];
        }
        let falloff = (radius - distance) / radius;
        vecmath::vec2_scale(to_pointer, falloff * strength)
    }
}
