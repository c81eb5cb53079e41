// utils/math.rs

use crate::config::FRAME_TIME;
use rand::Rng;

/// Safely generates a random number in the given range.
/// Logs a warning if min >= max and returns min in that case.
pub fn safe_gen_range(min: f64, max: f64, context: &str) -> f64 {
    if min >= max {
        println!(
            "WARNING: Empty range detected in {}: min={}, max={}",
            context, min, max
        );
        min // Return min value if range is empty to avoid crashing
    } else {
        let mut rng = rand::rng();
        rng.random_range(min..max)
    }
}

/// Wraps an angle into (-PI, PI].
pub fn wrap_angle(mut angle: f64) -> f64 {
    while angle <= -std::f64::consts::PI {
        angle += std::f64::consts::PI * 2.0;
    }
    while angle > std::f64::consts::PI {
        angle -= std::f64::consts::PI * 2.0;
    }
    angle
}

/// Steps `current` toward `target` along the shortest arc, moving at most
/// `max_step` radians.
pub fn lerp_angle(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = wrap_angle(target - current).clamp(-max_step, max_step);
    current + diff
}

/// Converts a per-frame damping factor tuned for 60 FPS into one valid for an
/// arbitrary frame delta, so drag behaves the same at any frame rate.
pub fn frame_decay(base_factor: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 1.0;
    }
    base_factor.clamp(0.0, 1.0).powf(dt / FRAME_TIME)
}
