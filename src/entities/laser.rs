// entities/laser.rs

use crate::entities::particle::Particle;
use crate::utils::collision::closest_point_on_segment;
use crate::utils::math::safe_gen_range;
use crate::utils::vec2d::Vec2d;
use piston_window::*;
use rand::Rng;

const TERMINATION_DURATION: f64 = 0.45;

/// Lifecycle of a beam. Transitions are one way: a beam never returns to
/// warmup, and a terminated beam never damages anything again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserState {
    Warmup,
    Active,
    Terminated,
}

/// A telegraphed beam weapon. Harmless while warming up, damaging for a
/// short active window, then fades out once it hits something.
pub struct LaserBeam {
    pub origin: Vec2d,
    pub direction: Vec2d,
    pub length: f64,
    pub active_length: f64,
    pub width: f64,
    pub warmup: f64,
    pub active_duration: f64,
    pub state: LaserState,
    state_timer: f64,
    pub termination_point: Option<Vec2d>,
}

impl LaserBeam {
    pub fn new(
        origin: Vec2d,
        direction: Vec2d,
        length: f64,
        width: f64,
        warmup: f64,
        duration: f64,
    ) -> Self {
        LaserBeam {
            origin,
            direction: direction.normalized(),
            length,
            active_length: length,
            width,
            warmup,
            active_duration: duration,
            state: LaserState::Warmup,
            state_timer: 0.0,
            termination_point: None,
        }
    }

    /// Advances the state machine. Returns true once the beam should despawn.
    pub fn update(&mut self, dt: f64) -> bool {
        self.state_timer += dt;
        match self.state {
            LaserState::Warmup => {
                if self.state_timer >= self.warmup {
                    self.state = LaserState::Active;
                    self.state_timer = 0.0;
                }
                false
            }
            LaserState::Active => self.state_timer >= self.active_duration,
            LaserState::Terminated => self.state_timer >= TERMINATION_DURATION,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == LaserState::Active
    }

    /// Far end of the damaging part of the beam.
    pub fn head(&self) -> Vec2d {
        self.origin + self.direction.scale(self.active_length)
    }

    pub fn closest_point(&self, point: Vec2d) -> Vec2d {
        closest_point_on_segment(point, self.origin, self.head())
    }

    /// Only an active beam collides. Warming-up and terminated beams always
    /// report false.
    pub fn check_collision(&self, point: Vec2d, radius: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        let dist = (self.closest_point(point) - point).length();
        dist <= radius + self.width * 0.25
    }

    /// Cuts the beam at the impact point and starts the fade-out. Idempotent.
    pub fn terminate(&mut self, point: Vec2d, particles: &mut Vec<Particle>) {
        if self.state == LaserState::Terminated {
            return;
        }
        self.state = LaserState::Terminated;
        self.state_timer = 0.0;
        self.termination_point = Some(point);
        let cutoff = (point - self.origin).length();
        self.active_length = cutoff.clamp(0.0, self.length);
        let mut rng = rand::rng();
        for i in 0..26 {
            let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
            let speed = safe_gen_range(220.0, 440.0, "laser termination burst");
            let color = if i % 2 == 0 {
                [1.0, 0.88, 0.73, 1.0]
            } else {
                [1.0, 0.54, 0.31, 1.0]
            };
            particles.push(Particle::new(
                point,
                Vec2d::from_angle(angle, speed),
                safe_gen_range(0.45, 0.8, "laser termination life"),
                color,
                2.4,
            ));
        }
    }

    fn termination_progress(&self) -> f64 {
        if self.state == LaserState::Terminated {
            (self.state_timer / TERMINATION_DURATION).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn draw(&self, context: Context, g: &mut G2d) {
        let head = self.head();
        let (fill, core, alpha) = match self.state {
            LaserState::Warmup => (
                [0.43, 0.82, 1.0, 0.55],
                [0.82, 0.98, 1.0, 0.95],
                0.85f32,
            ),
            LaserState::Active => ([1.0, 0.59, 0.27, 0.92], [1.0, 0.9, 0.78, 0.95], 0.95),
            LaserState::Terminated => {
                let fade = (0.55 + 0.3 * (1.0 - self.termination_progress())) as f32;
                ([1.0, 0.66, 0.35, 0.85], [1.0, 0.82, 0.74, 0.9], fade)
            }
        };
        let glow = [fill[0], fill[1], fill[2], fill[3] * alpha * 0.4];
        line(
            glow,
            self.width,
            [self.origin.x, self.origin.y, head.x, head.y],
            context.transform,
            g,
        );
        let body = [fill[0], fill[1], fill[2], fill[3] * alpha];
        line(
            body,
            self.width * 0.5,
            [self.origin.x, self.origin.y, head.x, head.y],
            context.transform,
            g,
        );
        line(
            core,
            self.width * 0.18,
            [self.origin.x, self.origin.y, head.x, head.y],
            context.transform,
            g,
        );
        if let Some(point) = self.termination_point {
            let progress = self.termination_progress();
            let radius = self.width * (3.5 + progress * 5.2);
            let blast = [1.0, 0.7, 0.4, (0.9 * (1.0 - progress * 0.4)) as f32];
            ellipse(
                blast,
                [point.x - radius, point.y - radius, radius * 2.0, radius * 2.0],
                context.transform,
                g,
            );
        }
    }
}
