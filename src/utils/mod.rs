// utils/mod.rs

pub mod collision;
pub mod math;
pub mod vec2d;
