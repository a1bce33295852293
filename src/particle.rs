// Simple particle struct to keep track of position, velocity, the point it
// springs back to, and its fixed look

use crate::config::SwarmPhysics;
use crate::pointer::PointerState;
use crate::Surface;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub origin: Vector2<f64>,
    pub size: f64,
    opacity: f64,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, size: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            origin: pos,
            size,
            opacity: opacity.max(0.0).min(1.0),
        }
    }

    /// Scatters a particle uniformly over `surface`.
    pub fn random<R: Rng>(rng: &mut R, surface: Surface, physics: &SwarmPhysics) -> Particle {
        let pos = [
            rng.gen::<f64>() * surface.width as f64,
            rng.gen::<f64>() * surface.height as f64,
        ];
        let vel = [
            sample(rng, -physics.max_speed, physics.max_speed),
            sample(rng, -physics.max_speed, physics.max_speed),
        ];
        let size = sample(rng, physics.size_range[0], physics.size_range[1]);
        let opacity = sample(rng, physics.opacity_range[0], physics.opacity_range[1]);
        Particle::new(pos, vel, size, opacity)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// One frame of motion: pointer pull, spring to origin, integrate,
    /// damp, then keep inside the surface.
    pub fn step(&mut self, pointer: &PointerState, surface: Surface, physics: &SwarmPhysics) {
        let pull = pointer.attraction(self.pos, physics.influence_radius, physics.attraction);
        self.vel = vecmath::vec2_add(self.vel, pull);

        let home = vecmath::vec2_sub(self.origin, self.pos);
        self.vel = vecmath::vec2_add(self.vel, vecmath::vec2_scale(home, physics.spring));

        self.pos = vecmath::vec2_add(self.pos, self.vel);
        self.vel = vecmath::vec2_scale(self.vel, physics.damping);

        reflect(&mut self.pos[0], &mut self.vel[0], surface.width as f64);
        reflect(&mut self.pos[1], &mut self.vel[1], surface.height as f64);
    }
}

// Points the velocity back inside on this axis and pulls the position onto
// the edge. Also catches particles left outside by a shrinking resize.
fn reflect(pos: &mut f64, vel: &mut f64, extent: f64) {
    if *pos < 0.0 {
        *vel = vel.abs();
        *pos = 0.0;
    } else if *pos > extent {
        *vel = -vel.abs();
        *pos = extent;
    }
}

fn sample<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min, max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn surface(width: u32, height: u32) -> Surface {
        Surface { width, height }
    }

    #[test]
    fn random_particle_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let physics = SwarmPhysics::default();
        for _ in 0..200 {
            let p = Particle::random(&mut rng, surface(640, 480), &physics);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 480.0);
            assert!(p.vel[0].abs() <= 0.5 && p.vel[1].abs() <= 0.5);
            assert!(p.size >= 1.0 && p.size <= 3.0);
            assert!(p.opacity() >= 0.3 && p.opacity() <= 0.8);
            assert_eq!(p.origin, p.pos);
        }
    }

    #[test]
    fn resting_particle_at_origin_stays_put() {
        let physics = SwarmPhysics::default();
        let mut p = Particle::new([10.0, 10.0], [0.0, 0.0], 2.0, 0.5);
        let far_pointer = PointerState::new(500.0, 500.0);
        p.step(&far_pointer, surface(100, 100), &physics);
        assert_eq!(p.pos, [10.0, 10.0]);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn spring_pulls_back_toward_origin() {
        let physics = SwarmPhysics::default();
        let mut p = Particle::new([50.0, 50.0], [0.0, 0.0], 2.0, 0.5);
        p.pos = [80.0, 50.0];
        let far_pointer = PointerState::new(1000.0, 1000.0);
        p.step(&far_pointer, surface(100, 100), &physics);
        assert!(p.vel[0] < 0.0);
        assert!(p.pos[0] < 80.0);
    }

    #[test]
    fn velocity_is_damped() {
        let physics = SwarmPhysics {
            spring: 0.0,
            ..SwarmPhysics::default()
        };
        let mut p = Particle::new([50.0, 50.0], [1.0, 0.0], 2.0, 0.5);
        let far_pointer = PointerState::new(1000.0, 1000.0);
        p.step(&far_pointer, surface(100, 100), &physics);
        assert_eq!(p.pos, [51.0, 50.0]);
        assert_eq!(p.vel, [0.99, 0.0]);
    }

    #[test]
    fn reflects_off_edges() {
        let physics = SwarmPhysics {
            spring: 0.0,
            damping: 1.0,
            ..SwarmPhysics::default()
        };
        let far_pointer = PointerState::new(1000.0, 1000.0);

        let mut p = Particle::new([0.5, 50.0], [-2.0, 0.0], 2.0, 0.5);
        p.step(&far_pointer, surface(100, 100), &physics);
        assert_eq!(p.pos[0], 0.0);
        assert_eq!(p.vel[0], 2.0);

        let mut p = Particle::new([50.0, 99.0], [0.0, 3.0], 2.0, 0.5);
        p.step(&far_pointer, surface(100, 100), &physics);
        assert_eq!(p.pos[1], 100.0);
        assert_eq!(p.vel[1], -3.0);
    }

    #[test]
    fn opacity_is_clamped_at_creation() {
        assert_eq!(Particle::new([0.0, 0.0], [0.0, 0.0], 1.0, 1.7).opacity(), 1.0);
        assert_eq!(Particle::new([0.0, 0.0], [0.0, 0.0], 1.0, -0.2).opacity(), 0.0);
    }
}
