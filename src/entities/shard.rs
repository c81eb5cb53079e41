// entities/shard.rs

use crate::utils::math::{frame_decay, safe_gen_range};
use crate::utils::vec2d::Vec2d;
use piston_window::*;
use rand::Rng;

/// Spinning hull fragment spawned when the player ship breaks apart.
pub struct PlayerShard {
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub life: f64,
    pub max_life: f64,
    pub rotation: f64,
    pub spin: f64,
    pub length: f64,
    pub width: f64,
    pub color: [f32; 4],
}

impl PlayerShard {
    pub fn new(origin: Vec2d, color: [f32; 4]) -> Self {
        let mut rng = rand::rng();
        let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
        let life = safe_gen_range(2.4, 3.6, "shard life");
        PlayerShard {
            pos: origin,
            vel: Vec2d::from_angle(angle, safe_gen_range(140.0, 360.0, "shard speed")),
            life,
            max_life: life,
            rotation: rng.random_range(0.0..std::f64::consts::PI * 2.0),
            spin: rng.random_range(-4.0..4.0),
            length: safe_gen_range(10.0, 26.0, "shard length"),
            width: safe_gen_range(3.0, 7.0, "shard width"),
            color,
        }
    }

    /// Returns true when the shard has burned out.
    pub fn update(&mut self, dt: f64) -> bool {
        self.pos += self.vel.scale(dt);
        self.vel = self.vel.scale(frame_decay(0.94, dt));
        self.rotation += self.spin * dt;
        self.life -= dt;
        self.life <= 0.0
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let alpha = (self.life / self.max_life).clamp(0.0, 1.0) as f32;
        let color = [self.color[0], self.color[1], self.color[2], alpha];
        let transform = context
            .transform
            .trans(self.pos.x, self.pos.y)
            .rot_rad(self.rotation);
        rectangle(
            color,
            [
                -self.length * 0.5,
                -self.width * 0.5,
                self.length,
                self.width,
            ],
            transform,
            g,
        );
    }
}
