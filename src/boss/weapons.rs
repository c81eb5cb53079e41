// boss/weapons.rs

use crate::config::GameConfig;
use crate::entities::bullet::Bullet;
use crate::entities::laser::LaserBeam;
use crate::entities::missile::Missile;
use crate::entities::particle::Particle;
use crate::game_state::{AudioCue, Owner};
use crate::utils::math::safe_gen_range;
use crate::utils::vec2d::Vec2d;
use rand::Rng;

const BOSS_BULLET: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Every weapon the generator can mount. Closed set: weapon behavior is
/// dispatched here, not through trait objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Cannon,
    Spread,
    Shatter,
    Missile,
    Laser,
    Storm,
    /// Only mounted on the bare core once every arm is gone.
    CoreStorm,
}

pub struct WeaponSpec {
    pub kind: WeaponKind,
    pub difficulty: u32,
    pub cooldown_range: (f64, f64),
}

pub const WEAPON_LIBRARY: [WeaponSpec; 6] = [
    WeaponSpec {
        kind: WeaponKind::Cannon,
        difficulty: 1,
        cooldown_range: (0.65, 1.1),
    },
    WeaponSpec {
        kind: WeaponKind::Spread,
        difficulty: 2,
        cooldown_range: (0.8, 1.35),
    },
    WeaponSpec {
        kind: WeaponKind::Shatter,
        difficulty: 3,
        cooldown_range: (1.1, 1.8),
    },
    WeaponSpec {
        kind: WeaponKind::Missile,
        difficulty: 4,
        cooldown_range: (1.6, 2.4),
    },
    WeaponSpec {
        kind: WeaponKind::Laser,
        difficulty: 4,
        cooldown_range: (4.4, 6.2),
    },
    WeaponSpec {
        kind: WeaponKind::Storm,
        difficulty: 5,
        cooldown_range: (1.8, 2.6),
    },
];

pub const CORE_STORM: WeaponSpec = WeaponSpec {
    kind: WeaponKind::CoreStorm,
    difficulty: 6,
    cooldown_range: (1.2, 1.6),
};

pub fn spec(kind: WeaponKind) -> &'static WeaponSpec {
    match kind {
        WeaponKind::Cannon => &WEAPON_LIBRARY[0],
        WeaponKind::Spread => &WEAPON_LIBRARY[1],
        WeaponKind::Shatter => &WEAPON_LIBRARY[2],
        WeaponKind::Missile => &WEAPON_LIBRARY[3],
        WeaponKind::Laser => &WEAPON_LIBRARY[4],
        WeaponKind::Storm => &WEAPON_LIBRARY[5],
        WeaponKind::CoreStorm => &CORE_STORM,
    }
}

/// Resamples a cooldown for the weapon, shortened as the level climbs.
pub fn next_cooldown(kind: WeaponKind, level: u32) -> f64 {
    let (min, max) = spec(kind).cooldown_range;
    let reduction = (1.0 - level as f64 * 0.03).clamp(0.5, 1.0);
    safe_gen_range(min, max, "weapon cooldown") * reduction
}

/// Weighted draw from the library, gated by level so early bosses only get
/// the simpler weapons. Missiles weigh heavier on deeper branches.
pub fn pick_weapon(level: u32, depth: usize) -> WeaponKind {
    let max_difficulty = (1 + level / 2).clamp(1, 5);
    let candidates: Vec<&WeaponSpec> = WEAPON_LIBRARY
        .iter()
        .filter(|entry| entry.difficulty <= max_difficulty)
        .collect();
    if candidates.is_empty() {
        return WEAPON_LIBRARY[0].kind;
    }
    let depth_factor = 1.0 + depth.min(4) as f64 * 0.15;
    let weights: Vec<f64> = candidates
        .iter()
        .map(|entry| {
            if entry.kind == WeaponKind::Missile {
                2.0 * depth_factor
            } else {
                1.0
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();
    let mut roll = rand::rng().random_range(0.0..total);
    for (entry, weight) in candidates.iter().zip(weights.iter()) {
        roll -= weight;
        if roll <= 0.0 {
            return entry.kind;
        }
    }
    candidates[candidates.len() - 1].kind
}

/// Snapshot of the firing segment's geometry, taken before the fire call so
/// weapon routines never need access to the boss tree itself.
pub struct Muzzle {
    pub world_end: Vec2d,
    pub world_center: Vec2d,
    pub absolute_angle: f64,
}

/// Projectiles produced by a single fire call, plus the sounds that go
/// with them.
#[derive(Default)]
pub struct SpawnBatch {
    pub bullets: Vec<Bullet>,
    pub missiles: Vec<Missile>,
    pub lasers: Vec<LaserBeam>,
    pub cues: Vec<AudioCue>,
}

impl SpawnBatch {
    pub fn new() -> Self {
        SpawnBatch::default()
    }

    pub fn merge(&mut self, other: SpawnBatch) {
        self.bullets.extend(other.bullets);
        self.missiles.extend(other.missiles);
        self.lasers.extend(other.lasers);
        self.cues.extend(other.cues);
    }
}

pub fn fire(
    kind: WeaponKind,
    muzzle: &Muzzle,
    player_pos: Vec2d,
    level: u32,
    config: &GameConfig,
    particles: &mut Vec<Particle>,
) -> SpawnBatch {
    let mut batch = SpawnBatch::new();
    let lvl = level as f64;
    match kind {
        WeaponKind::Cannon => {
            let origin = muzzle.world_end;
            let angle = (player_pos - origin).angle();
            let speed = 220.0 + lvl * 24.0;
            batch.bullets.push(Bullet::new(
                origin,
                Vec2d::from_angle(angle, speed),
                5.0,
                BOSS_BULLET,
                Owner::Boss,
            ));
        }
        WeaponKind::Spread => {
            let origin = muzzle.world_end;
            let base_angle = (player_pos - origin).angle();
            let speed = 230.0 + lvl * 20.0;
            for i in -1i32..=1 {
                let angle = base_angle + 0.18 * i as f64;
                batch.bullets.push(Bullet::new(
                    origin,
                    Vec2d::from_angle(angle, speed),
                    4.5,
                    BOSS_BULLET,
                    Owner::Boss,
                ));
            }
        }
        WeaponKind::Shatter => {
            let origin = muzzle.world_end;
            let base_angle = (player_pos - origin).angle();
            let speed = 240.0 + lvl * 24.0;
            let count = 5;
            for i in 0..count {
                let offset = (i as f64 - (count - 1) as f64 / 2.0) * 0.12
                    + safe_gen_range(-0.02, 0.02, "shatter jitter");
                batch.bullets.push(Bullet::new(
                    origin,
                    Vec2d::from_angle(base_angle + offset, speed),
                    4.5,
                    BOSS_BULLET,
                    Owner::Boss,
                ));
            }
        }
        WeaponKind::Missile => {
            let origin = muzzle.world_end;
            let volley = 4;
            let vertical = if rand::rng().random_bool(0.5) {
                std::f64::consts::FRAC_PI_2
            } else {
                -std::f64::consts::FRAC_PI_2
            };
            let fan_spread = 0.4;
            let spacing = 26.0;
            for i in 0..volley {
                let t = i as f64 / (volley - 1) as f64;
                let offset_factor = t - 0.5;
                let lateral = Vec2d::from_angle(
                    muzzle.absolute_angle + std::f64::consts::FRAC_PI_2,
                    offset_factor * spacing,
                );
                let initial_dir = Vec2d::from_angle(vertical + offset_factor * fan_spread, 1.0);
                batch.missiles.push(Missile::new(
                    origin + lateral,
                    player_pos,
                    240.0 + lvl * 16.0,
                    0.99,
                    Some(initial_dir),
                    safe_gen_range(0.22, 0.34, "missile turn delay"),
                ));
            }
            batch.cues.push(AudioCue::MissileLaunch);
        }
        WeaponKind::Laser => {
            let origin = muzzle.world_center;
            let angle = (player_pos - origin).angle();
            let length = (1400.0 + lvl * 40.0) * 4.0;
            batch.lasers.push(LaserBeam::new(
                origin,
                Vec2d::from_angle(angle, 1.0),
                length,
                16.0,
                config.laser.warmup,
                config.laser.duration,
            ));
            batch.cues.push(AudioCue::LaserFire);
            // Sparks gathering into the emitter while the beam charges.
            for i in 0..16 {
                let pos = origin
                    + Vec2d::from_angle(
                        angle + safe_gen_range(-0.25, 0.25, "laser prefire angle"),
                        safe_gen_range(0.0, 80.0, "laser prefire dist"),
                    );
                let vel = Vec2d::from_angle(
                    angle + std::f64::consts::PI + safe_gen_range(-0.3, 0.3, "laser prefire vel"),
                    safe_gen_range(120.0, 280.0, "laser prefire speed"),
                );
                let color = if i % 2 == 0 {
                    [1.0, 0.9, 0.64, 1.0]
                } else {
                    [1.0, 1.0, 1.0, 1.0]
                };
                particles.push(Particle::new(
                    pos,
                    vel,
                    safe_gen_range(0.35, 0.55, "laser prefire life"),
                    color,
                    2.2,
                ));
            }
        }
        WeaponKind::Storm => {
            let origin = muzzle.world_end;
            let base_angle = (player_pos - origin).angle();
            let count = 7;
            let spread = 0.32;
            let base_speed = 220.0 + lvl * 18.0;
            for i in 0..count {
                let offset =
                    (i as f64 - (count - 1) as f64 / 2.0) * (spread / count as f64) * 3.0;
                let speed = base_speed + safe_gen_range(0.0, 40.0, "storm speed");
                batch.bullets.push(Bullet::new(
                    origin,
                    Vec2d::from_angle(base_angle + offset, speed),
                    4.5,
                    BOSS_BULLET,
                    Owner::Boss,
                ));
            }
        }
        WeaponKind::CoreStorm => {
            let center = muzzle.world_center;
            let base_angle = (player_pos - center).angle();
            let bullet_speed = 260.0 + lvl * 22.0;
            let bullet_count = 8;
            for i in 0..bullet_count {
                let angle = base_angle
                    + (i as f64 / bullet_count as f64) * std::f64::consts::PI * 2.0;
                batch.bullets.push(Bullet::new(
                    center,
                    Vec2d::from_angle(angle, bullet_speed),
                    5.0,
                    BOSS_BULLET,
                    Owner::Boss,
                ));
            }
            let volley = 4;
            let vertical = if rand::rng().random_bool(0.5) {
                std::f64::consts::FRAC_PI_2
            } else {
                -std::f64::consts::FRAC_PI_2
            };
            let fan_spread = 0.35;
            let spacing = 32.0;
            for i in 0..volley {
                let t = i as f64 / (volley - 1) as f64;
                let offset_factor = t - 0.5;
                let initial_dir = Vec2d::from_angle(vertical + offset_factor * fan_spread, 1.0);
                let lateral = Vec2d::from_angle(
                    vertical + std::f64::consts::FRAC_PI_2,
                    offset_factor * spacing,
                );
                let forward = Vec2d::from_angle(vertical, 12.0);
                batch.missiles.push(Missile::new(
                    center + forward + lateral,
                    player_pos,
                    260.0 + lvl * 18.0,
                    1.21,
                    Some(initial_dir),
                    safe_gen_range(0.2, 0.35, "core missile turn delay"),
                ));
            }
            batch.cues.push(AudioCue::MissileLaunch);
            batch.lasers.push(LaserBeam::new(
                center,
                Vec2d::from_angle(base_angle, 1.0),
                1800.0,
                18.0,
                config.core_laser.warmup,
                config.core_laser.duration,
            ));
            batch.cues.push(AudioCue::LaserFire);
        }
    }
    batch
}
