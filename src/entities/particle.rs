// entities/particle.rs

use crate::utils::vec2d::Vec2d;
use piston_window::*;

/// Short-lived streak used for exhaust, sparks and explosion debris.
pub struct Particle {
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub life: f64,
    pub remaining: f64,
    pub color: [f32; 4],
    pub size: f64,
}

impl Particle {
    pub fn new(pos: Vec2d, vel: Vec2d, life: f64, color: [f32; 4], size: f64) -> Self {
        Particle {
            pos,
            vel,
            life,
            remaining: life,
            color,
            size,
        }
    }

    /// Returns true when the particle has expired.
    pub fn update(&mut self, dt: f64) -> bool {
        self.pos += self.vel.scale(dt);
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let alpha = (self.remaining / self.life).max(0.0) as f32;
        let color = [self.color[0], self.color[1], self.color[2], alpha];
        let tail = self.pos + self.vel.scale(0.04);
        line(
            color,
            (self.size * alpha as f64 * 0.5).max(0.5),
            [self.pos.x, self.pos.y, tail.x, tail.y],
            context.transform,
            g,
        );
    }
}
