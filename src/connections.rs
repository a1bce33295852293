// Connection pass shared by every point source: each unordered pair of
// points closer than the style radius gets one line, fading out with
// distance.

use crate::config::ConnectionStyle;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    /// Lower index of the pair; drives the rainbow hue.
    pub from_index: usize,
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub alpha: f64,
}

/// Alpha of a line between two points `distance` apart: `base` at zero,
/// falling linearly to exactly zero at `radius` and beyond.
pub fn connection_alpha(distance: f64, radius: f64, base: f64) -> f64 {
    if !(distance < radius) || radius <= 0.0 {
        return 0.0;
    }
    base * (1.0 - distance.max(0.0) / radius)
}

/// Calls `draw` for every pair with a visible connection, each pair once.
/// Quadratic in the number of points.
pub fn for_each_connection<F>(points: &[Vector2<f64>], style: &ConnectionStyle, mut draw: F)
where
    F: FnMut(Connection),
{
    for (i, &from) in points.iter().enumerate() {
        for &to in &points[i + 1..] {
            let distance = vecmath::vec2_len(vecmath::vec2_sub(to, from));
            let alpha = connection_alpha(distance, style.radius, style.base_alpha);
            if alpha > 0.0 {
                draw(Connection {
                    from_index: i,
                    from,
                    to,
                    alpha,
                });
            }
        }
    }
}
