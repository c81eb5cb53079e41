// simulation.rs
//
// The headless game state: player, boss, projectiles, scoring and the
// fixed-order update pipeline. The window shell feeds it input frames and
// frame deltas; everything else happens here.

use crate::boss::Boss;
use crate::config::{combat, resolution, starfield, GameConfig, MAX_FRAME_DT};
use crate::entities::bullet::Bullet;
use crate::entities::laser::LaserBeam;
use crate::entities::missile::Missile;
use crate::entities::particle::Particle;
use crate::entities::player::PlayerShip;
use crate::entities::shard::PlayerShard;
use crate::entities::star::Star;
use crate::game_state::{AudioCue, GameEvent};
use crate::utils::math::safe_gen_range;
use crate::utils::vec2d::Vec2d;
use rand::Rng;

/// One tick of player input, assembled by the input handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputFrame {
    pub movement: Vec2d,
    pub fire: bool,
    /// Edge-triggered "any key or click", used to leave the game-over screen.
    pub interact: bool,
}

/// Ship break-up sequence. While this runs the player is gone from the
/// field but the rest of the world keeps moving.
pub struct PlayerDeath {
    pub timer: f64,
    pub duration: f64,
    pub shards: Vec<PlayerShard>,
}

pub struct Simulation {
    pub config: GameConfig,
    pub width: f64,
    pub height: f64,
    pub player: PlayerShip,
    pub boss: Boss,
    pub level: u32,
    pub score: u64,
    pub combo_multiplier: f64,
    pub combo_timer: f64,
    pub level_timer: f64,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemy_missiles: Vec<Missile>,
    pub enemy_lasers: Vec<LaserBeam>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub player_death: Option<PlayerDeath>,
    pub game_over: bool,
    pub message: String,
    pub message_timer: f64,
    audio_cues: Vec<AudioCue>,
}

impl Simulation {
    pub fn new(config: GameConfig) -> Self {
        let width = resolution::WIDTH;
        let height = resolution::HEIGHT;
        let mut sim = Simulation {
            config,
            width,
            height,
            player: PlayerShip::new(width, height),
            boss: Boss::new(1, width, height, config),
            level: 1,
            score: 0,
            combo_multiplier: 1.0,
            combo_timer: 0.0,
            level_timer: 0.0,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemy_missiles: Vec::new(),
            enemy_lasers: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            player_death: None,
            game_over: false,
            message: String::new(),
            message_timer: 0.0,
            audio_cues: Vec::new(),
        };
        sim.reset();
        sim
    }

    /// Returns everything to a fresh level-1 run.
    pub fn reset(&mut self) {
        println!("Simulation reset: starting at level 1");
        self.player = PlayerShip::new(self.width, self.height);
        self.level = 1;
        self.score = 0;
        self.boss = Boss::new(self.level, self.width, self.height, self.config);
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.enemy_missiles.clear();
        self.enemy_lasers.clear();
        self.particles.clear();
        self.stars = (0..starfield::STAR_COUNT)
            .map(|_| Star::new(self.width, self.height))
            .collect();
        self.level_timer = 0.0;
        self.combo_timer = 0.0;
        self.combo_multiplier = 1.0;
        self.player_death = None;
        self.game_over = false;
        self.message.clear();
        self.message_timer = 0.0;
        self.audio_cues.push(AudioCue::Warning);
    }

    /// Sounds queued since the last drain, for the shell to play.
    pub fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.audio_cues)
    }

    pub fn update(&mut self, raw_dt: f64, input: &InputFrame) {
        let dt = self.config.scale_delta(raw_dt.min(MAX_FRAME_DT));

        self.update_player_death(dt);

        if self.game_over {
            if input.interact {
                self.reset();
            }
            return;
        }

        self.level_timer += dt;
        self.combo_timer -= dt;
        if self.combo_timer <= 0.0 {
            self.combo_multiplier = 1.0;
        }

        for star in &mut self.stars {
            star.update(dt, self.width, self.height);
        }

        if self.player_death.is_none() {
            self.player
                .update(dt, input.movement, self.width, self.height);
            if input.fire {
                if let Some(bullet) = self.player.fire() {
                    self.player_bullets.push(bullet);
                    self.audio_cues.push(AudioCue::PlayerFire);
                }
            }
        }

        let player_pos = self.player.pos;
        let spawn = self.boss.update(dt, player_pos, &mut self.particles);
        if !spawn.bullets.is_empty() {
            self.audio_cues.push(AudioCue::BossVolley);
        }
        self.enemy_bullets.extend(spawn.bullets);
        self.enemy_missiles.extend(spawn.missiles);
        self.enemy_lasers.extend(spawn.lasers);
        self.audio_cues.extend(spawn.cues);

        // Once the core goes critical the fight is decided; clear whatever
        // ordnance is still in the air.
        if self.boss.core_critical {
            self.enemy_bullets.clear();
            self.enemy_missiles.clear();
            self.enemy_lasers.clear();
        }

        self.update_projectiles(dt);

        if self.player_death.is_none() {
            self.handle_collisions();
        }

        self.particles.retain_mut(|particle| !particle.update(dt));

        if self.boss.is_defeated() {
            self.handle_boss_defeated();
        }

        self.message_timer -= dt;
    }

    fn update_player_death(&mut self, dt: f64) {
        let finished = if let Some(death) = self.player_death.as_mut() {
            death.timer += dt;
            death.shards.retain_mut(|shard| !shard.update(dt));
            death.timer >= death.duration
        } else {
            false
        };
        if finished && !self.game_over {
            self.game_over = true;
            self.message = String::from("Ship lost. Tap or press any key to continue.");
            self.message_timer = f64::INFINITY;
            println!("Game over at level {} with score {}", self.level, self.score);
        }
    }

    fn update_projectiles(&mut self, dt: f64) {
        let (width, height) = (self.width, self.height);
        self.player_bullets.retain_mut(|bullet| {
            !bullet.update(dt) && in_bounds(bullet.pos, width, height, 10.0)
        });
        self.enemy_bullets.retain_mut(|bullet| {
            !bullet.update(dt) && in_bounds(bullet.pos, width, height, 30.0)
        });

        let player_pos = self.player.pos;
        let mut detonations: Vec<Vec2d> = Vec::new();
        let particles = &mut self.particles;
        self.enemy_missiles.retain_mut(|missile| {
            if missile.update(dt, player_pos, particles) {
                detonations.push(missile.pos);
                return false;
            }
            in_bounds(missile.pos, width, height, 60.0)
        });
        for pos in detonations {
            self.spawn_impact(pos, [1.0, 1.0, 1.0, 1.0]);
            let mut rng = rand::rng();
            for i in 0..10 {
                let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
                let speed = safe_gen_range(120.0, 280.0, "missile detonation");
                let color = if i % 2 == 0 {
                    [1.0, 1.0, 1.0, 1.0]
                } else {
                    [1.0, 0.91, 0.8, 1.0]
                };
                self.particles.push(Particle::new(
                    pos,
                    Vec2d::from_angle(angle, speed),
                    safe_gen_range(0.8, 1.4, "missile detonation life"),
                    color,
                    2.4,
                ));
            }
        }

        self.enemy_lasers.retain_mut(|laser| !laser.update(dt));
    }

    fn handle_collisions(&mut self) {
        // Player bullets against the boss body.
        let mut survivors = Vec::with_capacity(self.player_bullets.len());
        let bullets = std::mem::take(&mut self.player_bullets);
        for bullet in bullets {
            if let Some(hit) = self.boss.hit_test(&bullet) {
                let is_core = hit.id == self.boss.core;
                let events =
                    self.boss
                        .apply_damage(hit.id, combat::BULLET_DAMAGE, &mut self.particles);
                for event in events {
                    self.process_event(event);
                }
                let color = if is_core {
                    [1.0, 0.78, 0.42, 1.0]
                } else {
                    [1.0, 0.56, 0.27, 1.0]
                };
                self.spawn_impact(hit.point, color);
            } else {
                survivors.push(bullet);
            }
        }
        self.player_bullets = survivors;

        // Player bullets can shoot missiles down.
        let mut shot_down: Vec<Vec2d> = Vec::new();
        let missiles = &mut self.enemy_missiles;
        self.player_bullets.retain(|bullet| {
            let mut hit = false;
            missiles.retain(|missile| {
                if hit {
                    return true;
                }
                if (missile.pos - bullet.pos).length() <= missile.radius + bullet.radius {
                    shot_down.push(missile.pos);
                    hit = true;
                    return false;
                }
                true
            });
            !hit
        });
        for pos in shot_down {
            self.spawn_impact(pos, [1.0, 1.0, 1.0, 1.0]);
        }

        // Enemy fire against the player.
        let player_pos = self.player.pos;
        let player_radius = self.player.radius;
        let mut player_hits: Vec<(Vec2d, &'static str, f64)> = Vec::new();
        self.enemy_bullets.retain(|bullet| {
            if (bullet.pos - player_pos).length() <= bullet.radius + player_radius {
                player_hits.push((bullet.pos, "Armor hit!", 1.2));
                return false;
            }
            true
        });
        self.enemy_missiles.retain(|missile| {
            if (missile.pos - player_pos).length() <= missile.radius + player_radius {
                player_hits.push((missile.pos, "Armor hit!", 1.2));
                return false;
            }
            true
        });
        for (pos, message, timer) in player_hits {
            self.spawn_impact(pos, [0.43, 0.79, 1.0, 1.0]);
            self.damage_player(message, timer);
            if self.player_death.is_some() {
                return;
            }
        }

        // Ramming the boss body.
        if self.player.invulnerable <= 0.0 && !self.boss.core_critical {
            let mut contact = false;
            let core = &self.boss.segments[self.boss.core.0];
            if !core.destroyed
                && (core.world_center - player_pos).length() <= core.radius + player_radius
            {
                contact = true;
            }
            if !contact {
                for &id in &self.boss.segment_ids {
                    let seg = &self.boss.segments[id.0];
                    if seg.destroyed || seg.polygon.is_empty() {
                        continue;
                    }
                    let reach = player_radius + (seg.thickness / 2.0).max(10.0);
                    let nearest = seg
                        .polygon
                        .iter()
                        .map(|point| (*point - player_pos).length())
                        .fold(f64::INFINITY, f64::min);
                    if nearest < reach {
                        contact = true;
                        break;
                    }
                }
            }
            if contact {
                self.spawn_impact(player_pos, [1.0, 0.63, 0.31, 1.0]);
                self.damage_player("Hull collision!", 1.2);
                if self.player_death.is_some() {
                    return;
                }
            }
        }

        // Laser sweeps. A beam that connects terminates on the hull.
        let mut burns: Vec<Vec2d> = Vec::new();
        for laser in &mut self.enemy_lasers {
            if laser.check_collision(player_pos, player_radius) {
                let point = laser.closest_point(player_pos);
                laser.terminate(point, &mut self.particles);
                burns.push(point);
            }
        }
        for point in burns {
            self.spawn_impact(point, [1.0, 0.7, 0.4, 1.0]);
            self.damage_player("Laser burn!", 1.4);
            if self.player_death.is_some() {
                return;
            }
        }
    }

    fn process_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Score {
                points,
                combo_boost,
                message,
                position,
            } => {
                let bonus = (points * self.combo_multiplier).floor().max(0.0);
                self.score += bonus as u64;
                self.combo_multiplier =
                    (self.combo_multiplier + combo_boost).min(combat::MAX_COMBO);
                self.combo_timer = combat::COMBO_WINDOW;
                self.message = format!("{} +{}", message, bonus as u64);
                self.message_timer = 1.6;
                self.spawn_impact(position, [1.0, 0.58, 0.33, 1.0]);
            }
            GameEvent::Info { message } => {
                self.message = String::from(message);
                self.message_timer = 2.4;
            }
        }
    }

    fn damage_player(&mut self, message: &'static str, timer: f64) {
        if self.player.invulnerable > 0.0 {
            return;
        }
        self.audio_cues.push(AudioCue::PlayerDamage);
        if self.player.take_hit() {
            self.start_player_death();
        } else {
            self.message = String::from(message);
            self.message_timer = timer;
        }
    }

    fn start_player_death(&mut self) {
        if self.player_death.is_some() {
            return;
        }
        let origin = self.player.pos;
        let shard_colors = [
            [0.62, 0.97, 1.0, 1.0],
            [1.0, 0.91, 0.75, 1.0],
            [1.0, 0.62, 0.43, 1.0],
        ];
        let shards = (0..40)
            .map(|i| PlayerShard::new(origin, shard_colors[i % shard_colors.len()]))
            .collect();
        let mut rng = rand::rng();
        for i in 0..28 {
            let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
            let speed = safe_gen_range(140.0, 380.0, "player death burst");
            let color = if i % 2 == 0 {
                [1.0, 0.96, 0.81, 1.0]
            } else {
                [1.0, 0.7, 0.54, 1.0]
            };
            self.particles.push(Particle::new(
                origin,
                Vec2d::from_angle(angle, speed),
                safe_gen_range(1.0, 2.2, "player death life"),
                color,
                3.2,
            ));
        }
        self.player_death = Some(PlayerDeath {
            timer: 0.0,
            duration: crate::config::player::DEATH_DURATION,
            shards,
        });
        self.player.invulnerable = 999.0;
        self.player.vel = Vec2d::zero();
        self.audio_cues.push(AudioCue::BossExplosion);
    }

    fn handle_boss_defeated(&mut self) {
        let time_bonus = (3000.0 / self.level_timer.max(0.1)).floor().max(0.0);
        let level_bonus = 800.0 + self.level as f64 * 220.0;
        let bonus = ((time_bonus + level_bonus) * self.combo_multiplier).floor();
        self.score += bonus as u64;
        self.message = format!("Boss defeated! +{} pts", bonus as u64);
        self.message_timer = 3.0;
        let defeated_pos = self.boss.pos;
        self.level += 1;
        self.level_timer = 0.0;
        self.combo_multiplier = (self.combo_multiplier + 0.4).min(combat::MAX_COMBO);
        println!("Boss defeated, advancing to level {}", self.level);
        self.boss = Boss::new(self.level, self.width, self.height, self.config);
        self.audio_cues.push(AudioCue::Warning);
        self.audio_cues.push(AudioCue::BossExplosion);
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.enemy_missiles.clear();
        self.enemy_lasers.clear();
        self.spawn_impact(defeated_pos, [1.0, 0.55, 0.26, 1.0]);
    }

    fn spawn_impact(&mut self, pos: Vec2d, color: [f32; 4]) {
        let mut rng = rand::rng();
        for _ in 0..14 {
            let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
            let speed = safe_gen_range(160.0, 380.0, "impact burst");
            self.particles.push(Particle::new(
                pos,
                Vec2d::from_angle(angle, speed),
                safe_gen_range(0.6, 1.0, "impact life"),
                color,
                2.6,
            ));
        }
        self.audio_cues.push(AudioCue::BulletImpact);
    }
}

fn in_bounds(pos: Vec2d, width: f64, height: f64, margin: f64) -> bool {
    pos.x >= -margin && pos.x <= width + margin && pos.y >= -margin && pos.y <= height + margin
}
