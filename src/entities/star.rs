// entities/star.rs

use crate::utils::math::safe_gen_range;
use piston_window::*;
use rand::Rng;

/// One streak of the scrolling background starfield.
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub size: f64,
    pub alpha: f32,
}

impl Star {
    pub fn new(width: f64, height: f64) -> Self {
        let mut star = Star {
            x: 0.0,
            y: 0.0,
            speed: 0.0,
            size: 0.0,
            alpha: 0.0,
        };
        star.reset(width, height, true);
        star
    }

    fn reset(&mut self, width: f64, height: f64, initial: bool) {
        let mut rng = rand::rng();
        self.x = if initial {
            rng.random_range(0.0..width)
        } else {
            width + 20.0
        };
        self.y = rng.random_range(0.0..height);
        self.speed = safe_gen_range(80.0, 240.0, "star speed");
        self.size = safe_gen_range(0.4, 2.0, "star size");
        self.alpha = safe_gen_range(0.35, 0.85, "star alpha") as f32;
    }

    pub fn update(&mut self, dt: f64, width: f64, height: f64) {
        self.x -= self.speed * dt;
        if self.x < -20.0 {
            self.reset(width, height, false);
        }
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        rectangle(
            [0.31, 0.85, 1.0, self.alpha],
            [self.x, self.y, self.size * 3.0, self.size],
            context.transform,
            g,
        );
    }
}
