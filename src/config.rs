// config.rs

/// Reference frame duration the per-frame damping factors were tuned against.
pub const FRAME_TIME: f64 = 1.0 / 60.0;

/// Longest raw frame delta the simulation will accept before clamping.
pub const MAX_FRAME_DT: f64 = 0.033;

/// Game resolution constants
pub mod resolution {
    pub const WIDTH: f64 = 1280.0;
    pub const HEIGHT: f64 = 720.0;
}

/// Player ship tuning
pub mod player {
    pub const RADIUS: f64 = 14.0;
    pub const MAX_SPEED: f64 = 640.0;
    pub const THRUST: f64 = 1250.0;
    pub const FRICTION_BASE: f64 = 0.96; // per-frame damping tuned for 60 FPS
    pub const RELOAD_TIME: f64 = 0.12;
    pub const MAX_ARMOR: i32 = 5;
    pub const INVULNERABILITY_TIME: f64 = 2.0;
    pub const BULLET_SPEED: f64 = 750.0;
    pub const DEATH_DURATION: f64 = 2.8;
}

/// Combat and scoring constants
pub mod combat {
    pub const BULLET_DAMAGE: f64 = 18.0;
    pub const BRANCH_SPLASH: f64 = 0.5;
    pub const CORE_SPLASH: f64 = 0.35;
    pub const COMBO_WINDOW: f64 = 2.6;
    pub const MAX_COMBO: f64 = 8.0;
    pub const DEFEAT_DELAY: f64 = 5.0;
}

/// Background starfield
pub mod starfield {
    pub const STAR_COUNT: usize = 140;
}

/// Warmup and active window for a laser weapon, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserTiming {
    pub warmup: f64,
    pub duration: f64,
}

/// Mutable pacing knobs, passed into the simulation so overall game and
/// weapon timing are easy to tune without touching the entity code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub time_scale: f64,
    pub laser: LaserTiming,
    pub core_laser: LaserTiming,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            time_scale: 0.5,
            laser: LaserTiming {
                warmup: 2.4,
                duration: 0.05,
            },
            core_laser: LaserTiming {
                warmup: 0.35,
                duration: 0.08,
            },
        }
    }
}

impl GameConfig {
    /// Scales a raw frame delta, keeping the multiplier in a sane range.
    pub fn scale_delta(&self, raw_dt: f64) -> f64 {
        raw_dt * self.time_scale.clamp(0.05, 10.0)
    }
}
