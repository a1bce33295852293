// Drives a full field through the animation loop with a manual scheduler,
// the way the page does with requestAnimationFrame.

use particle_backdrop::color::Paint;
use particle_backdrop::config::HeroConfig;
use particle_backdrop::field::{Field, FieldStyle, ParticleSwarm};
use particle_backdrop::input::{self, RAINBOW_SEQUENCE};
use particle_backdrop::renderer::DrawTarget;
use particle_backdrop::scheduler::{AnimationLoop, ManualScheduler};
use particle_backdrop::{FieldError, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use vecmath::Vector2;

#[derive(Default)]
struct Counts {
    clears: usize,
    discs: usize,
    lines: usize,
    rainbow_discs: usize,
}

impl DrawTarget for Counts {
    fn clear(&mut self, _surface: Surface) -> Result<(), FieldError> {
        self.clears += 1;
        Ok(())
    }

    fn fill_disc(&mut self, _center: Vector2<f64>, _radius: f64, paint: &Paint) -> Result<(), FieldError> {
        self.discs += 1;
        if let Paint::Hsla { .. } = paint {
            self.rainbow_discs += 1;
        }
        Ok(())
    }

    fn stroke_line(
        &mut self,
        _from: Vector2<f64>,
        _to: Vector2<f64>,
        _width: f64,
        _paint: &Paint,
    ) -> Result<(), FieldError> {
        self.lines += 1;
        Ok(())
    }
}

fn hero(surface: Surface) -> Rc<RefCell<Field<ParticleSwarm>>> {
    let config = HeroConfig {
        particle_count: 20,
        ..HeroConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);
    let swarm = ParticleSwarm::new(&mut rng, config.particle_count, surface, config.physics.clone());
    Rc::new(RefCell::new(Field::new(swarm, surface, FieldStyle::from(&config))))
}

#[test]
fn loop_renders_until_stopped() {
    let scheduler = Rc::new(ManualScheduler::new());
    let shared = input::shared();
    let field = hero(Surface::new(320, 240));
    let counts = Rc::new(RefCell::new(Counts::default()));

    let animation = {
        let (field, counts, shared) = (field.clone(), counts.clone(), shared.clone());
        AnimationLoop::new(scheduler.clone(), move |t| {
            field
                .borrow_mut()
                .render_frame(&mut *counts.borrow_mut(), &shared.borrow(), t)
                .unwrap();
        })
    };
    animation.start().unwrap();

    for frame in 0..30 {
        shared.borrow_mut().on_pointer_move(frame as f64 * 10.0, 120.0);
        scheduler.fire(frame as f64 * 16.7);
    }
    assert_eq!(counts.borrow().clears, 30);
    assert_eq!(counts.borrow().discs, 30 * 20);

    animation.stop();
    scheduler.fire(1000.0);
    assert_eq!(counts.borrow().clears, 30);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn key_sequence_mid_run_switches_colors_only() {
    let scheduler = Rc::new(ManualScheduler::new());
    let shared = input::shared();
    let field = hero(Surface::new(320, 240));
    let counts = Rc::new(RefCell::new(Counts::default()));

    let animation = {
        let (field, counts, shared) = (field.clone(), counts.clone(), shared.clone());
        AnimationLoop::new(scheduler.clone(), move |t| {
            field
                .borrow_mut()
                .render_frame(&mut *counts.borrow_mut(), &shared.borrow(), t)
                .unwrap();
        })
    };
    animation.start().unwrap();
    scheduler.fire(0.0);
    assert_eq!(counts.borrow().rainbow_discs, 0);

    let toggled = RAINBOW_SEQUENCE
        .iter()
        .filter(|code| shared.borrow_mut().on_key(code))
        .count();
    assert_eq!(toggled, 1);

    scheduler.fire(16.0);
    assert_eq!(counts.borrow().rainbow_discs, 20);
    assert_eq!(field.borrow().source().particles().len(), 20);
}

#[test]
fn resize_to_zero_keeps_loop_alive() {
    let scheduler = Rc::new(ManualScheduler::new());
    let shared = input::shared();
    let field = hero(Surface::new(640, 480));
    let counts = Rc::new(RefCell::new(Counts::default()));

    let animation = {
        let (field, counts, shared) = (field.clone(), counts.clone(), shared.clone());
        AnimationLoop::new(scheduler.clone(), move |t| {
            field
                .borrow_mut()
                .render_frame(&mut *counts.borrow_mut(), &shared.borrow(), t)
                .unwrap();
        })
    };
    animation.start().unwrap();
    scheduler.fire(0.0);
    field.borrow_mut().resize(Surface::new(0, 0));
    for frame in 1..10 {
        scheduler.fire(frame as f64 * 16.0);
    }
    assert!(animation.is_running());
    assert_eq!(counts.borrow().clears, 10);
    assert_eq!(scheduler.pending(), 1);
}
