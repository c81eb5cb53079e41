// utils/vec2d.rs

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A 2D vector implementation for game physics and positioning
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    /// Creates a new vector with the given x and y components
    pub fn new(x: f64, y: f64) -> Self {
        Vec2d { x, y }
    }

    pub fn zero() -> Self {
        Vec2d { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle`, scaled by `length`.
    pub fn from_angle(angle: f64, length: f64) -> Self {
        Vec2d {
            x: angle.cos() * length,
            y: angle.sin() * length,
        }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn length_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn dot(&self, other: Vec2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product. Used for torque from offset forces.
    pub fn cross(&self, other: Vec2d) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn scale(&self, s: f64) -> Vec2d {
        Vec2d {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Normalized copy. Vectors shorter than the epsilon come back unchanged.
    pub fn normalized(&self) -> Vec2d {
        let len = self.length();
        if len > 1e-6 {
            self.scale(1.0 / len)
        } else {
            *self
        }
    }

    pub fn with_length(&self, len: f64) -> Vec2d {
        self.normalized().scale(len)
    }
}

impl Add for Vec2d {
    type Output = Vec2d;
    fn add(self, rhs: Vec2d) -> Vec2d {
        Vec2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2d {
    fn add_assign(&mut self, rhs: Vec2d) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;
    fn sub(self, rhs: Vec2d) -> Vec2d {
        Vec2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2d {
    fn sub_assign(&mut self, rhs: Vec2d) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;
    fn mul(self, rhs: f64) -> Vec2d {
        self.scale(rhs)
    }
}

impl Neg for Vec2d {
    type Output = Vec2d;
    fn neg(self) -> Vec2d {
        Vec2d::new(-self.x, -self.y)
    }
}
