// entities/missile.rs

use crate::entities::particle::Particle;
use crate::utils::math::{lerp_angle, safe_gen_range};
use crate::utils::vec2d::Vec2d;
use piston_window::*;
use rand::Rng;

const TRAIL_INTERVAL: f64 = 0.05;

/// Homing missile. Flies straight until its turn delay elapses, then steers
/// toward the target at a capped turn rate.
pub struct Missile {
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub speed: f64,
    pub turn_rate: f64,
    pub radius: f64,
    pub life: f64,
    pub turn_delay: f64,
    turn_timer: f64,
    trail_timer: f64,
}

impl Missile {
    pub fn new(
        pos: Vec2d,
        target: Vec2d,
        speed: f64,
        turn_rate: f64,
        initial_direction: Option<Vec2d>,
        turn_delay: f64,
    ) -> Self {
        let dir = match initial_direction {
            Some(d) if d.length() > 0.0 => d.normalized(),
            _ => (target - pos).normalized(),
        };
        Missile {
            pos,
            vel: dir.scale(speed),
            speed,
            turn_rate,
            radius: 8.0,
            life: 4.2,
            turn_delay: turn_delay.max(0.0),
            turn_timer: 0.0,
            trail_timer: 0.0,
        }
    }

    /// Returns true when the missile's lifetime has run out.
    pub fn update(&mut self, dt: f64, target: Vec2d, particles: &mut Vec<Particle>) -> bool {
        self.turn_timer += dt;
        let mut heading = self.vel.angle();
        if self.turn_timer >= self.turn_delay {
            let desired = target - self.pos;
            if desired.length() > 1e-6 {
                heading = lerp_angle(heading, desired.angle(), self.turn_rate * dt);
                self.vel = Vec2d::from_angle(heading, self.speed);
            }
        }
        self.pos += self.vel.scale(dt);
        self.life -= dt;
        self.trail_timer += dt;
        if self.trail_timer >= TRAIL_INTERVAL {
            self.trail_timer = 0.0;
            let mut rng = rand::rng();
            let back = Vec2d::from_angle(
                heading + std::f64::consts::PI,
                safe_gen_range(80.0, 200.0, "missile trail"),
            );
            let color = if rng.random_bool(0.5) {
                [1.0, 0.85, 0.66, 1.0]
            } else {
                [1.0, 0.67, 0.39, 1.0]
            };
            particles.push(Particle::new(
                self.pos,
                back,
                safe_gen_range(0.4, 0.65, "missile trail life"),
                color,
                2.4,
            ));
        }
        self.life <= 0.0
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let transform = context
            .transform
            .trans(self.pos.x, self.pos.y)
            .rot_rad(self.vel.angle());
        let body = [[12.0, 0.0], [-10.0, -6.0], [-4.0, 0.0], [-10.0, 6.0]];
        polygon([1.0, 1.0, 1.0, 1.0], &body, transform, g);
    }
}
