//! The frame routine shared by both canvas layers.
//!
//! A [`Field`] owns a [`PointSource`] and a surface size. Every frame it
//! clears the target, lets the source move its points, draws discs for
//! sources that have them, then runs the connection pass over all points.
//! The hero backdrop plugs in a [`ParticleSwarm`]; the skills constellation
//! plugs in an [`AnchorSet`] fed from page layout.

use crate::color::{paint_for, Color, HueCycle};
use crate::config::{ConnectionStyle, ConstellationConfig, HeroConfig, SwarmPhysics};
use crate::connections;
use crate::error::FieldError;
use crate::input::InputState;
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::renderer::{DrawTarget, Surface};
use rand::Rng;
use vecmath::Vector2;

/// A disc drawn at a point: its radius and the opacity of its base color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Disc {
    pub radius: f64,
    pub opacity: f64,
}

pub trait PointSource {
    /// Moves the points for one frame.
    fn advance(&mut self, pointer: &PointerState, surface: Surface);
    fn positions(&self) -> &[Vector2<f64>];
    /// The disc to draw at point `index`, if this source draws any.
    fn disc(&self, _index: usize) -> Option<Disc> {
        None
    }
}

pub struct ParticleSwarm {
    particles: Vec<Particle>,
    positions: Vec<Vector2<f64>>,
    physics: SwarmPhysics,
}

impl ParticleSwarm {
    pub fn new<R: Rng>(rng: &mut R, count: usize, surface: Surface, physics: SwarmPhysics) -> Self {
        let particles: Vec<Particle> = (0..count)
            .map(|_| Particle::random(rng, surface, &physics))
            .collect();
        ParticleSwarm::from_particles(particles, physics)
    }

    pub fn from_particles(particles: Vec<Particle>, physics: SwarmPhysics) -> Self {
        let positions = particles.iter().map(|p| p.pos).collect();
        ParticleSwarm {
            particles,
            positions,
            physics,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl PointSource for ParticleSwarm {
    fn advance(&mut self, pointer: &PointerState, surface: Surface) {
        for (particle, pos) in self.particles.iter_mut().zip(self.positions.iter_mut()) {
            particle.step(pointer, surface, &self.physics);
            *pos = particle.pos;
        }
    }

    fn positions(&self) -> &[Vector2<f64>] {
        &self.positions
    }

    fn disc(&self, index: usize) -> Option<Disc> {
        self.particles.get(index).map(|p| Disc {
            radius: p.size,
            opacity: p.opacity(),
        })
    }
}

/// Where the anchor points currently sit, in surface coordinates.
pub trait AnchorLayout {
    /// Replaces the contents of `out` with the current anchor positions.
    fn read(&self, out: &mut Vec<Vector2<f64>>);
}

impl AnchorLayout for Vec<Vector2<f64>> {
    fn read(&self, out: &mut Vec<Vector2<f64>>) {
        out.clear();
        out.extend_from_slice(self);
    }
}

/// Anchor points that do not simulate anything; they are re-read from
/// layout every frame so they follow reflow.
pub struct AnchorSet<L: AnchorLayout> {
    layout: L,
    anchors: Vec<Vector2<f64>>,
}

impl<L: AnchorLayout> AnchorSet<L> {
    pub fn new(layout: L) -> Self {
        let mut anchors = Vec::new();
        layout.read(&mut anchors);
        AnchorSet { layout, anchors }
    }
}

impl<L: AnchorLayout> PointSource for AnchorSet<L> {
    fn advance(&mut self, _pointer: &PointerState, _surface: Surface) {
        self.layout.read(&mut self.anchors);
    }

    fn positions(&self) -> &[Vector2<f64>] {
        &self.anchors
    }
}

/// Colors and line style of a field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
    pub color: Color,
    pub hues: HueCycle,
    pub connections: ConnectionStyle,
}

impl From<&HeroConfig> for FieldStyle {
    fn from(config: &HeroConfig) -> Self {
        FieldStyle {
            color: config.color,
            hues: config.hues,
            connections: config.connections.clone(),
        }
    }
}

impl From<&ConstellationConfig> for FieldStyle {
    fn from(config: &ConstellationConfig) -> Self {
        FieldStyle {
            color: config.color,
            hues: config.hues,
            connections: config.connections.clone(),
        }
    }
}

pub struct Field<P: PointSource> {
    source: P,
    surface: Surface,
    style: FieldStyle,
}

impl<P: PointSource> Field<P> {
    pub fn new(source: P, surface: Surface, style: FieldStyle) -> Self {
        Field {
            source,
            surface,
            style,
        }
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Positions are left where they are; the boundary step reins in
    /// anything now outside on the next frame.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Runs one frame at `elapsed_ms` against `target`.
    pub fn render_frame<T: DrawTarget + ?Sized>(
        &mut self,
        target: &mut T,
        input: &InputState,
        elapsed_ms: f64,
    ) -> Result<(), FieldError> {
        target.clear(self.surface)?;
        self.source.advance(&input.pointer, self.surface);

        let rainbow = input.mode.is_rainbow();
        let style = &self.style;
        let positions = self.source.positions();

        for (index, &pos) in positions.iter().enumerate() {
            if let Some(disc) = self.source.disc(index) {
                // Rainbow discs are drawn fully opaque
                let alpha = if rainbow { 1.0 } else { disc.opacity };
                let paint = paint_for(style.color, &style.hues, rainbow, index, elapsed_ms, alpha);
                target.fill_disc(pos, disc.radius, &paint)?;
            }
        }

        // One line per unordered pair, not one from each end
        let mut result = Ok(());
        connections::for_each_connection(positions, &style.connections, |c| {
            if result.is_err() {
                return;
            }
            let paint = paint_for(style.color, &style.hues, rainbow, c.from_index, elapsed_ms, c.alpha);
            result = target.stroke_line(c.from, c.to, style.connections.line_width, &paint);
        });
        result
    }
}
