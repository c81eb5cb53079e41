// entities/player.rs

use crate::config::player as cfg;
use crate::entities::bullet::Bullet;
use crate::game_state::Owner;
use crate::utils::math::frame_decay;
use crate::utils::vec2d::Vec2d;
use piston_window::*;

/// The player ship. Thrust-and-drag movement, a fixed fire direction and a
/// small armor pool with an invulnerability window after each hit.
pub struct PlayerShip {
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub radius: f64,
    pub reload: f64,
    pub max_armor: i32,
    pub armor: i32,
    pub invulnerable: f64,
    pub fire_direction: Vec2d,
    pub hit_flash: f64,
}

impl PlayerShip {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        PlayerShip {
            pos: Vec2d::new(canvas_width * 0.28, canvas_height * 0.7),
            vel: Vec2d::zero(),
            radius: cfg::RADIUS,
            reload: 0.0,
            max_armor: cfg::MAX_ARMOR,
            armor: cfg::MAX_ARMOR,
            invulnerable: 0.0,
            fire_direction: Vec2d::new(1.0, 0.0),
            hit_flash: 0.0,
        }
    }

    pub fn update(&mut self, dt: f64, movement: Vec2d, canvas_width: f64, canvas_height: f64) {
        if movement.length() > 0.0 {
            self.vel += movement.scale(cfg::THRUST * dt);
        }
        self.vel = self.vel.scale(frame_decay(cfg::FRICTION_BASE, dt));
        if self.vel.length() > cfg::MAX_SPEED {
            self.vel = self.vel.with_length(cfg::MAX_SPEED);
        }
        self.pos += self.vel.scale(dt);
        self.pos.x = self.pos.x.clamp(self.radius, canvas_width - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, canvas_height - self.radius);
        self.reload -= dt;
        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.hit_flash = (self.hit_flash - dt).max(0.0);
    }

    /// Spawns a bullet if the reload timer allows it.
    pub fn fire(&mut self) -> Option<Bullet> {
        if self.reload > 0.0 {
            return None;
        }
        self.reload = cfg::RELOAD_TIME;
        let dir = self.fire_direction;
        let bullet_pos = self.pos + dir.scale(self.radius + 6.0);
        Some(Bullet::new(
            bullet_pos,
            dir.scale(cfg::BULLET_SPEED),
            4.0,
            [0.49, 0.96, 1.0, 1.0],
            Owner::Player,
        ))
    }

    /// Applies one hit. Returns true when the ship is lost.
    /// Hits during the invulnerability window are ignored.
    pub fn take_hit(&mut self) -> bool {
        if self.invulnerable > 0.0 {
            return false;
        }
        self.armor = (self.armor - 1).max(0);
        self.invulnerable = cfg::INVULNERABILITY_TIME;
        self.hit_flash = 0.5;
        self.armor <= 0
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let angle = if self.vel.length() > 20.0 {
            self.vel.angle()
        } else {
            0.0
        };
        let transform = context
            .transform
            .trans(self.pos.x, self.pos.y)
            .rot_rad(angle);
        let blink = self.invulnerable > 0.0 && (self.invulnerable * 12.0).floor() as i64 % 2 == 0;
        let alpha: f32 = if blink { 0.35 } else { 1.0 };
        let stroke = if self.invulnerable > 0.0 {
            [0.34, 0.79, 1.0, alpha]
        } else {
            [0.62, 0.97, 1.0, alpha]
        };
        if self.hit_flash > 0.0 {
            let t = (self.hit_flash / 0.5).clamp(0.0, 1.0);
            let radius = self.radius * (1.6 + (1.0 - t) * 0.8);
            ellipse(
                [1.0, 0.63, 0.31, (0.35 * t) as f32],
                [-radius, -radius, radius * 2.0, radius * 2.0],
                transform,
                g,
            );
        }
        let hull = [
            [18.0, 0.0],
            [-16.0, -11.0],
            [-10.0, -4.0],
            [-16.0, 0.0],
            [-10.0, 4.0],
            [-16.0, 11.0],
        ];
        for i in 0..hull.len() {
            let a = hull[i];
            let b = hull[(i + 1) % hull.len()];
            line(stroke, 1.25, [a[0], a[1], b[0], b[1]], transform, g);
        }
    }
}
