// boss/debris.rs

use crate::entities::particle::Particle;
use crate::utils::math::safe_gen_range;
use crate::utils::vec2d::Vec2d;
use piston_window::*;
use rand::Rng;

const GRAVITY: f64 = 60.0;

/// A severed piece of the boss body, tumbling away under light gravity and
/// shedding sparks until it burns up.
pub struct DebrisChunk {
    /// Polygon outlines relative to the chunk origin.
    pub shapes: Vec<Vec<Vec2d>>,
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub angular_velocity: f64,
    pub rotation: f64,
    pub life: f64,
}

impl DebrisChunk {
    pub fn new(shapes: Vec<Vec<Vec2d>>, pos: Vec2d) -> Self {
        DebrisChunk {
            shapes,
            pos,
            vel: Vec2d::new(
                safe_gen_range(-110.0, 110.0, "debris vx"),
                safe_gen_range(-40.0, 80.0, "debris vy"),
            ),
            angular_velocity: safe_gen_range(-1.2, 1.2, "debris spin"),
            rotation: 0.0,
            life: 3.4,
        }
    }

    /// Returns true once the chunk has expired.
    pub fn update(&mut self, dt: f64, particles: &mut Vec<Particle>) -> bool {
        self.life -= dt;
        self.rotation += self.angular_velocity * dt;
        self.pos += self.vel.scale(dt);
        self.vel.y += GRAVITY * dt;
        if self.life <= 0.0 {
            return true;
        }
        let mut rng = rand::rng();
        if rng.random_bool(0.3) {
            let color = if rng.random_bool(0.5) {
                [1.0, 0.67, 0.31, 1.0]
            } else {
                [1.0, 0.91, 0.66, 1.0]
            };
            let vel = Vec2d::from_angle(
                self.rotation + rng.random_range(0.0..0.8),
                safe_gen_range(120.0, 240.0, "debris trail"),
            );
            particles.push(Particle::new(self.pos, vel, 0.4, color, 2.8));
        }
        false
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let alpha = (self.life / 3.4).clamp(0.0, 1.0) as f32;
        let transform = context
            .transform
            .trans(self.pos.x, self.pos.y)
            .rot_rad(self.rotation);
        for shape in &self.shapes {
            let points: Vec<[f64; 2]> = shape.iter().map(|p| [p.x, p.y]).collect();
            polygon([0.65, 0.2, 0.1, 0.8 * alpha], &points, transform, g);
        }
    }
}
