// game_state.rs

use crate::utils::vec2d::Vec2d;

/// Which side a projectile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Boss,
}

/// Gameplay events surfaced by the boss and collision resolution.
/// The simulation folds these into score, combo and HUD state.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Score {
        points: f64,
        combo_boost: f64,
        message: &'static str,
        position: Vec2d,
    },
    Info {
        message: &'static str,
    },
}

/// Sound triggers drained by the shell each update tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    PlayerFire,
    BossVolley,
    BulletImpact,
    MissileLaunch,
    LaserFire,
    PlayerDamage,
    BossExplosion,
    Warning,
}
