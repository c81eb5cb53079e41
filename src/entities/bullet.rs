// entities/bullet.rs

use crate::game_state::Owner;
use crate::utils::vec2d::Vec2d;
use piston_window::*;

pub struct Bullet {
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub radius: f64,
    pub color: [f32; 4],
    pub owner: Owner,
    pub life: f64,
}

impl Bullet {
    pub fn new(pos: Vec2d, vel: Vec2d, radius: f64, color: [f32; 4], owner: Owner) -> Self {
        Bullet {
            pos,
            vel,
            radius,
            color,
            owner,
            life: 6.0,
        }
    }

    /// Returns true when the bullet has expired.
    pub fn update(&mut self, dt: f64) -> bool {
        self.pos += self.vel.scale(dt);
        self.life -= dt;
        self.life <= 0.0
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let r = self.radius;
        ellipse(
            self.color,
            [self.pos.x - r, self.pos.y - r, r * 2.0, r * 2.0],
            context.transform,
            g,
        );
        Ellipse::new_border([1.0, 1.0, 1.0, 0.8], (r * 0.3).max(1.0) * 0.5).draw(
            [self.pos.x - r, self.pos.y - r, r * 2.0, r * 2.0],
            &context.draw_state,
            context.transform,
            g,
        );
    }
}
