// boss/mod.rs

pub mod debris;
pub mod generator;
pub mod segment;
pub mod weapons;

use crate::config::{combat, GameConfig};
use crate::entities::bullet::Bullet;
use crate::entities::particle::Particle;
use crate::game_state::GameEvent;
use crate::utils::collision::{
    circle_polygon_collision, closest_point_on_segment, point_in_polygon,
};
use crate::utils::math::{frame_decay, safe_gen_range, wrap_angle};
use crate::utils::vec2d::Vec2d;
use debris::DebrisChunk;
use rand::Rng;
use segment::{BossSegment, SegmentId, SegmentKind};
use weapons::{Muzzle, SpawnBatch, WeaponKind};

const SUPERNOVA_DELAY: f64 = 0.9;

/// Expanding ring emitted during the core death sequence.
pub struct Shockwave {
    pub radius: f64,
    pub width: f64,
    pub growth: f64,
    pub life: f64,
    pub max_life: f64,
    pub alpha: f64,
}

/// Radial fire plume emitted by the supernova.
pub struct Plume {
    pub angle: f64,
    pub radius: f64,
    pub speed: f64,
    pub width: f64,
    pub life: f64,
    pub max_life: f64,
    pub color: [f32; 4],
    pub spin: f64,
}

/// Result of testing a bullet against the boss body.
pub struct BossHit {
    pub id: SegmentId,
    pub point: Vec2d,
}

/// The segmented boss: an arena of tree-linked segments plus the movement,
/// weapon and death-sequence state that drives them.
pub struct Boss {
    pub level: u32,
    pub config: GameConfig,
    canvas_width: f64,
    canvas_height: f64,
    pub pos: Vec2d,
    pub vel: Vec2d,
    pub heading: f64,
    pub angular_vel: f64,
    pub time_alive: f64,

    pub segments: Vec<BossSegment>,
    pub core: SegmentId,
    /// Live segment ids, including the core until it is destroyed.
    pub segment_ids: Vec<SegmentId>,
    pub weapon_ids: Vec<SegmentId>,
    pub thruster_ids: Vec<SegmentId>,
    pub debris: Vec<DebrisChunk>,

    pub core_solo: bool,
    pub total_health: f64,
    pub remaining_health: f64,
    pub initial_thruster_count: usize,
    pub initial_arm_count: usize,

    pub core_critical: bool,
    pub core_critical_timer: f64,
    core_critical_wave_timer: f64,
    core_explosion_triggered: bool,
    core_spark_timer: f64,
    pub core_glow_intensity: f64,
    pub core_critical_origin: Vec2d,
    pub core_critical_radius: f64,
    pub shockwaves: Vec<Shockwave>,
    pub plumes: Vec<Plume>,

    wander_phase: f64,
    wander_speed: f64,
    wander_strength: f64,
    wander_radius: f64,
}

impl Boss {
    pub fn new(level: u32, canvas_width: f64, canvas_height: f64, config: GameConfig) -> Self {
        let mut rng = rand::rng();
        let mut boss = Boss {
            level,
            config,
            canvas_width,
            canvas_height,
            pos: Vec2d::new(canvas_width * 0.72, canvas_height * 0.25),
            vel: Vec2d::new(safe_gen_range(0.4, 0.9, "boss spawn vel") * 60.0, 0.0),
            heading: -std::f64::consts::FRAC_PI_2,
            angular_vel: 0.0,
            time_alive: 0.0,
            segments: Vec::new(),
            core: SegmentId(0),
            segment_ids: Vec::new(),
            weapon_ids: Vec::new(),
            thruster_ids: Vec::new(),
            debris: Vec::new(),
            core_solo: false,
            total_health: 0.0,
            remaining_health: 0.0,
            initial_thruster_count: 1,
            initial_arm_count: 1,
            core_critical: false,
            core_critical_timer: 0.0,
            core_critical_wave_timer: 0.0,
            core_explosion_triggered: false,
            core_spark_timer: 0.0,
            core_glow_intensity: 0.0,
            core_critical_origin: Vec2d::zero(),
            core_critical_radius: 60.0,
            shockwaves: Vec::new(),
            plumes: Vec::new(),
            wander_phase: rng.random_range(0.0..std::f64::consts::PI * 2.0),
            wander_speed: safe_gen_range(0.45, 0.9, "wander speed"),
            wander_strength: safe_gen_range(0.7, 1.1, "wander strength"),
            wander_radius: safe_gen_range(110.0, 180.0, "wander radius"),
        };
        boss.core_critical_origin = boss.pos;
        boss.generate();
        boss
    }

    /// Recomputes world geometry for every reachable segment, walking the
    /// tree with an explicit stack.
    pub fn update_geometry(&mut self) {
        let mut stack: Vec<(SegmentId, Vec2d, f64)> = vec![(self.core, self.pos, self.heading)];
        while let Some((id, base_point, base_angle)) = stack.pop() {
            let (next_point, next_angle, children) = {
                let seg = &mut self.segments[id.0];
                seg.update_geometry(base_point, base_angle);
                let (p, a) = if seg.kind == SegmentKind::Core {
                    (base_point, base_angle)
                } else {
                    (seg.world_end, seg.absolute_angle)
                };
                (p, a, seg.children.clone())
            };
            for child in children {
                stack.push((child, next_point, next_angle));
            }
        }
    }

    pub fn current_arm_count(&self) -> usize {
        self.segment_ids
            .iter()
            .filter(|id| {
                let seg = &self.segments[id.0];
                seg.kind != SegmentKind::Core && !seg.destroyed
            })
            .count()
    }

    /// 1.0 with a full body, up to 2.0 when stripped bare (or dying).
    pub fn movement_speed_multiplier(&self) -> f64 {
        if self.core_critical {
            return 2.0;
        }
        let initial = self.initial_arm_count.max(1) as f64;
        let alive = self.current_arm_count() as f64;
        let loss_ratio = (1.0 - alive / initial).clamp(0.0, 1.0);
        1.0 + loss_ratio
    }

    /// Weighted sum of live segment offsets. The boss rotates to keep this
    /// bulk between its core and the player.
    pub fn defense_vector(&self) -> Vec2d {
        let mut vector = Vec2d::zero();
        for &id in &self.segment_ids {
            let seg = &self.segments[id.0];
            if seg.destroyed || seg.kind == SegmentKind::Core {
                continue;
            }
            let center = seg.world_center - self.pos;
            let length = center.length();
            if length < 1e-3 {
                continue;
            }
            let health_weight = seg.health.max(0.0) + seg.max_health * 0.25;
            let role_bonus = match seg.kind {
                SegmentKind::Weapon => 60.0,
                SegmentKind::Thruster => 40.0,
                SegmentKind::Branch => 28.0,
                SegmentKind::Core => 18.0,
            };
            vector += center.scale((health_weight + role_bonus) / length);
        }
        vector
    }

    fn desired_acceleration(&self, player_pos: Vec2d, mobility: f64) -> Vec2d {
        let margin_x = (self.canvas_width * 0.18).max(160.0);
        let margin_top = (self.canvas_height * 0.12).max(90.0);
        let margin_bottom = self.canvas_height * 0.5;
        let to_player = player_pos - self.pos;
        let distance = to_player.length();
        let desired = to_player.normalized();
        let pursuit_cap = (200.0 + self.level as f64 * 16.0) * (0.8 + mobility * 0.4);
        let pursuit = desired.scale((distance * 0.55).min(pursuit_cap));
        let orbit_magnitude = (80.0 + self.level as f64 * 8.0) * (0.7 + mobility * 0.3);
        let orbit = Vec2d::from_angle(
            desired.angle() + std::f64::consts::FRAC_PI_2,
            orbit_magnitude,
        );
        let mut accel = pursuit + orbit;
        let sway = (self.time_alive * (0.8 + self.wander_speed)).sin()
            * (90.0 + self.level as f64 * 6.0)
            * mobility;
        accel.y += sway;
        let wander_angle =
            self.time_alive * (0.9 + self.wander_speed * 0.5) + self.wander_phase;
        accel += Vec2d::from_angle(wander_angle, self.wander_radius * (0.5 + mobility * 0.5));
        accel += Vec2d::from_angle(
            desired.angle() + std::f64::consts::FRAC_PI_2,
            60.0 * mobility * self.wander_strength,
        );
        // Soft margins nudge the boss back into its right-side hunting box.
        let right_anchor = self.canvas_width * 0.72;
        if self.pos.x < self.canvas_width * 0.58 {
            accel.x += (self.canvas_width * 0.58 - self.pos.x) * 4.2 * mobility;
        }
        if self.pos.x > self.canvas_width - margin_x {
            accel.x -= (self.pos.x - (self.canvas_width - margin_x)) * 3.4 * mobility;
        }
        accel.x += (right_anchor - self.pos.x) * 1.8 * mobility;
        if self.pos.y < margin_top {
            accel.y += (margin_top - self.pos.y) * 3.2 * mobility;
        }
        if self.pos.y > margin_bottom {
            accel.y -= (self.pos.y - margin_bottom) * 3.2 * mobility;
        }
        accel
    }

    pub fn update(
        &mut self,
        dt: f64,
        player_pos: Vec2d,
        particles: &mut Vec<Particle>,
    ) -> SpawnBatch {
        let mut spawn = SpawnBatch::new();
        self.time_alive += dt;

        if self.core_critical {
            self.update_core_critical(dt, particles);
            self.pos += self.vel.scale(dt);
            self.update_geometry();
            self.update_debris(dt, particles);
            self.remaining_health = 0.0;
            return spawn;
        }

        let mobility = self.movement_speed_multiplier();

        if !self.segments[self.core.0].destroyed {
            self.step_movement(dt, player_pos, mobility, particles);
        }

        self.update_geometry();
        self.update_weapons(dt, player_pos, &mut spawn, particles);
        self.tick_visuals(dt);
        self.update_debris(dt, particles);
        self.remaining_health = self
            .segment_ids
            .iter()
            .map(|id| self.segments[id.0].health.max(0.0))
            .sum();
        spawn
    }

    fn step_movement(
        &mut self,
        dt: f64,
        player_pos: Vec2d,
        mobility: f64,
        particles: &mut Vec<Particle>,
    ) {
        let mut desired_accel = self.desired_acceleration(player_pos, mobility);
        let mut acceleration = Vec2d::zero();
        let active_thrusters: Vec<SegmentId> = self
            .thruster_ids
            .iter()
            .copied()
            .filter(|id| !self.segments[id.0].destroyed)
            .collect();
        let initial_thrusters = if self.initial_thruster_count > 0 {
            self.initial_thruster_count
        } else {
            active_thrusters.len().max(1)
        };
        let thruster_share = 1.0 / initial_thrusters as f64;
        let thruster_availability = active_thrusters.len() as f64 * thruster_share;
        let mut angular_force = 0.0;
        let mut rng = rand::rng();

        if !self.core_solo && !active_thrusters.is_empty() {
            for id in active_thrusters {
                let (dir, available_force, world_end, absolute_angle) = {
                    let seg = &self.segments[id.0];
                    let force = seg.thruster.as_ref().map(|t| t.force).unwrap_or(0.0);
                    (
                        Vec2d::from_angle(seg.absolute_angle + std::f64::consts::PI, 1.0),
                        force * thruster_share * mobility,
                        seg.world_end,
                        seg.absolute_angle,
                    )
                };
                let projection = if available_force > 1e-6 {
                    desired_accel.dot(dir) / available_force
                } else {
                    0.0
                };
                let power = projection.clamp(0.0, 1.0);
                if let Some(thruster) = self.segments[id.0].thruster.as_mut() {
                    thruster.power = power;
                }
                let thrust_accel = dir.scale(available_force * power);
                acceleration += thrust_accel;
                let relative = world_end - self.pos;
                angular_force += relative.cross(thrust_accel);
                if power > 0.05 {
                    let plume_boost = 0.6
                        + power * 0.8
                        + thruster_availability * 0.4
                        + (mobility - 1.0) * 0.3;
                    let color = if rng.random_bool(0.5) {
                        [1.0, 0.69, 0.4, 1.0]
                    } else {
                        [1.0, 0.48, 0.24, 1.0]
                    };
                    let vel = Vec2d::from_angle(
                        absolute_angle + std::f64::consts::PI,
                        180.0 + rng.random_range(0.0..140.0) * plume_boost,
                    );
                    particles.push(Particle::new(
                        world_end,
                        vel,
                        0.35 + rng.random_range(0.0..0.2) * plume_boost,
                        color,
                        2.0,
                    ));
                }
            }
        } else {
            // Every thruster is gone: the core flies under its own power.
            self.core_solo = true;
            let max_accel = (320.0 + self.level as f64 * 26.0) * mobility;
            if desired_accel.length() > max_accel {
                desired_accel = desired_accel.with_length(max_accel);
            }
            acceleration += desired_accel;
        }

        // Rotate so the defended bulk faces the player.
        let defense = self.defense_vector();
        let player_vector = player_pos - self.pos;
        let mut angle_error = 0.0;
        if player_vector.length() > 1e-3 {
            let player_angle = player_vector.angle();
            let defense_angle = if defense.length() > 1e-3 {
                defense.angle()
            } else {
                self.heading
            };
            angle_error = wrap_angle(player_angle - defense_angle);
        }
        let control_torque = angle_error * 2200.0 - self.angular_vel * 750.0;
        angular_force += control_torque * thruster_availability;
        if thruster_availability < 1e-3 {
            angular_force += (angle_error * 600.0 - self.angular_vel * 120.0) * 0.12;
        }

        self.angular_vel += angular_force * dt * 0.0003;
        self.angular_vel = self.angular_vel.clamp(-1.2, 1.2);
        self.angular_vel *= frame_decay(0.97, dt);
        self.heading = wrap_angle(self.heading + self.angular_vel * dt);

        self.vel += acceleration.scale(dt * 0.4);
        let max_speed = (200.0 + self.level as f64 * 12.0) * mobility;
        if self.vel.length() > max_speed {
            self.vel = self.vel.with_length(max_speed);
        }
        self.pos += self.vel.scale(dt);

        // Hard bounds with damped reflection.
        let hard_margin_x = (self.canvas_width * 0.12).max(140.0);
        let hard_top = (self.canvas_height * 0.14).max(100.0);
        let hard_bottom = self.canvas_height * 0.52;
        let left_bound = self.canvas_width * 0.55;
        let right_bound = self.canvas_width - hard_margin_x;
        if self.pos.x < left_bound {
            self.pos.x = left_bound;
            if self.vel.x < 0.0 {
                self.vel.x *= -0.4;
            }
        } else if self.pos.x > right_bound {
            self.pos.x = right_bound;
            if self.vel.x > 0.0 {
                self.vel.x *= -0.35;
            }
        }
        if self.pos.y < hard_top {
            self.pos.y = hard_top;
            if self.vel.y < 0.0 {
                self.vel.y *= -0.35;
            }
        } else if self.pos.y > hard_bottom {
            self.pos.y = hard_bottom;
            if self.vel.y > 0.0 {
                self.vel.y *= -0.35;
            }
        }
    }

    fn update_weapons(
        &mut self,
        dt: f64,
        player_pos: Vec2d,
        spawn: &mut SpawnBatch,
        particles: &mut Vec<Particle>,
    ) {
        if self.core_critical {
            return;
        }
        let active: Vec<SegmentId> = if self.core_solo {
            vec![self.core]
        } else {
            self.weapon_ids.clone()
        };
        for id in active {
            let fired = {
                let seg = &mut self.segments[id.0];
                if seg.destroyed {
                    continue;
                }
                let Some(mount) = seg.weapon.as_mut() else {
                    continue;
                };
                mount.timer -= dt;
                if mount.timer > 0.0 {
                    continue;
                }
                let kind = mount.kind;
                Some((
                    kind,
                    Muzzle {
                        world_end: seg.world_end,
                        world_center: seg.world_center,
                        absolute_angle: seg.absolute_angle,
                    },
                ))
            };
            if let Some((kind, muzzle)) = fired {
                let batch =
                    weapons::fire(kind, &muzzle, player_pos, self.level, &self.config, particles);
                spawn.merge(batch);
                let seg = &mut self.segments[id.0];
                if let Some(mount) = seg.weapon.as_mut() {
                    mount.timer = weapons::next_cooldown(kind, self.level);
                }
                seg.flash_timer = 0.45;
                seg.recoil = 1.0;
            }
        }
        if self.core_solo && self.segments[self.core.0].weapon.is_none() {
            let level = self.level;
            self.segments[self.core.0].set_weapon(WeaponKind::CoreStorm, level);
        }
    }

    fn tick_visuals(&mut self, dt: f64) {
        for &id in &self.segment_ids {
            let seg = &mut self.segments[id.0];
            if seg.destroyed {
                continue;
            }
            match seg.kind {
                SegmentKind::Weapon => {
                    seg.flash_timer = (seg.flash_timer - dt * 2.4).max(0.0);
                    seg.recoil = (seg.recoil - dt * 3.0).max(0.0);
                    seg.visual_phase += dt * 1.8;
                }
                SegmentKind::Thruster => {
                    let power = seg.thruster.as_ref().map(|t| t.power).unwrap_or(0.0);
                    seg.visual_phase += dt * (1.4 + power * 3.4);
                    seg.flash_timer = (seg.flash_timer - dt * 3.0).max(0.0);
                }
                SegmentKind::Core => {
                    seg.visual_phase += dt * if seg.weapon.is_some() { 1.8 } else { 0.8 };
                    seg.flash_timer = (seg.flash_timer - dt * 1.6).max(0.0);
                }
                SegmentKind::Branch => {
                    seg.visual_phase += dt * 0.6;
                    seg.flash_timer = (seg.flash_timer - dt * 1.2).max(0.0);
                }
            }
        }
    }

    fn update_debris(&mut self, dt: f64, particles: &mut Vec<Particle>) {
        self.debris.retain_mut(|chunk| !chunk.update(dt, particles));
    }

    /// Tests a bullet against all live segments and returns the hit closest
    /// to the boss center. The core always wins ties.
    pub fn hit_test(&self, bullet: &Bullet) -> Option<BossHit> {
        if self.core_critical {
            return None;
        }
        let mut best: Option<(f64, BossHit)> = None;
        for &id in &self.segment_ids {
            let seg = &self.segments[id.0];
            if seg.destroyed {
                continue;
            }
            let hit = if seg.kind == SegmentKind::Core {
                let dist = (bullet.pos - seg.world_center).length();
                if dist <= bullet.radius + seg.radius {
                    let dir = bullet.vel.normalized();
                    Some(BossHit {
                        id,
                        point: seg.world_center + dir.scale(seg.radius),
                    })
                } else {
                    None
                }
            } else if circle_polygon_collision(bullet.pos, bullet.radius, &seg.polygon) {
                let point = if point_in_polygon(bullet.pos, &seg.polygon) {
                    bullet.pos
                } else {
                    let mut closest = bullet.pos;
                    let mut min_dist = f64::INFINITY;
                    for i in 0..seg.polygon.len() {
                        let a = seg.polygon[i];
                        let b = seg.polygon[(i + 1) % seg.polygon.len()];
                        let candidate = closest_point_on_segment(bullet.pos, a, b);
                        let dist = (candidate - bullet.pos).length();
                        if dist < min_dist {
                            min_dist = dist;
                            closest = candidate;
                        }
                    }
                    closest
                };
                Some(BossHit { id, point })
            } else {
                None
            };
            if let Some(hit) = hit {
                let rank = if self.segments[hit.id.0].kind == SegmentKind::Core {
                    0.0
                } else {
                    (hit.point - self.pos).length()
                };
                match &best {
                    Some((best_rank, _)) if *best_rank <= rank => {}
                    _ => best = Some((rank, hit)),
                }
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// Applies damage to one segment, spreading splash into the tree and
    /// detaching whatever dies. Already-destroyed segments are a no-op.
    pub fn apply_damage(
        &mut self,
        id: SegmentId,
        amount: f64,
        particles: &mut Vec<Particle>,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.segments[id.0].destroyed {
            return events;
        }

        self.segments[id.0].health -= amount;
        let kind = self.segments[id.0].kind;

        if kind == SegmentKind::Branch && !self.segments[id.0].children.is_empty() {
            let children = self.segments[id.0].children.clone();
            let share = amount * combat::BRANCH_SPLASH / children.len() as f64;
            for child in children {
                let seg = &mut self.segments[child.0];
                if seg.destroyed {
                    continue;
                }
                seg.health -= share;
                if seg.health <= 0.0 {
                    events.extend(self.detach_segment(child, particles));
                }
            }
        }

        if kind == SegmentKind::Core {
            for other in self.segment_ids.clone() {
                if other == id || self.segments[other.0].destroyed {
                    continue;
                }
                self.segments[other.0].health -= amount * combat::CORE_SPLASH;
                if self.segments[other.0].health <= 0.0 {
                    events.extend(self.detach_segment(other, particles));
                }
            }
        }

        if self.segments[id.0].health <= 0.0 && !self.segments[id.0].destroyed {
            self.segments[id.0].health = 0.0;
            if kind == SegmentKind::Core {
                let (score, position, radius) = {
                    let core = &mut self.segments[id.0];
                    core.destroyed = true;
                    (core.score_value.floor(), core.world_center, core.radius)
                };
                events.push(GameEvent::Score {
                    points: score,
                    combo_boost: 0.6,
                    message: "Core obliterated!",
                    position,
                });
                self.start_core_critical(position, radius, particles);
                events.push(GameEvent::Info {
                    message: "Warning: Core critical!",
                });
            } else {
                events.extend(self.detach_segment(id, particles));
            }
        }

        self.check_core_solo(&mut events);
        events
    }

    /// Destroys a whole subtree: unlinks it, purges the index lists, spawns
    /// one tumbling debris chunk and reports the aggregated score.
    fn detach_segment(
        &mut self,
        root: SegmentId,
        particles: &mut Vec<Particle>,
    ) -> Vec<GameEvent> {
        let root_kind = self.segments[root.0].kind;
        let root_position = self.segments[root.0].world_center;

        let mut nodes = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let seg = &mut self.segments[id.0];
            seg.destroyed = true;
            seg.health = 0.0;
            nodes.push(id);
            stack.append(&mut seg.children);
        }

        if let Some(parent) = self.segments[root.0].parent {
            self.segments[parent.0].children.retain(|&child| child != root);
        }

        self.segment_ids.retain(|id| !nodes.contains(id));
        self.weapon_ids.retain(|id| !nodes.contains(id));
        self.thruster_ids.retain(|id| !nodes.contains(id));

        let outlines: Vec<Vec<Vec2d>> = nodes
            .iter()
            .map(|id| self.segments[id.0].polygon.clone())
            .filter(|polygon| !polygon.is_empty())
            .collect();
        if !outlines.is_empty() {
            let mut center = Vec2d::zero();
            for polygon in &outlines {
                let mut mean = Vec2d::zero();
                for &point in polygon {
                    mean += point;
                }
                center += mean.scale(1.0 / polygon.len() as f64);
            }
            center = center.scale(1.0 / outlines.len() as f64);
            let shapes: Vec<Vec<Vec2d>> = outlines
                .into_iter()
                .map(|polygon| polygon.into_iter().map(|p| p - center).collect())
                .collect();
            self.debris.push(DebrisChunk::new(shapes, center));
            let mut rng = rand::rng();
            for i in 0..22 {
                let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
                let speed = safe_gen_range(180.0, 400.0, "detach burst");
                let color = match i % 3 {
                    0 => [0.97, 0.89, 0.48, 1.0],
                    1 => [1.0, 0.61, 0.36, 1.0],
                    _ => [1.0, 1.0, 1.0, 1.0],
                };
                particles.push(Particle::new(
                    center,
                    Vec2d::from_angle(angle, speed),
                    safe_gen_range(0.6, 1.1, "detach burst life"),
                    color,
                    3.0,
                ));
            }
        }

        let total_score: f64 = nodes
            .iter()
            .map(|id| self.segments[id.0].score_value.max(0.0))
            .sum();
        vec![GameEvent::Score {
            points: total_score.floor(),
            combo_boost: 0.3,
            message: if root_kind == SegmentKind::Weapon {
                "Weapon offline!"
            } else {
                "Arm severed!"
            },
            position: root_position,
        }]
    }

    fn check_core_solo(&mut self, events: &mut Vec<GameEvent>) {
        if !self.core_solo && self.segments[self.core.0].children.is_empty() {
            self.core_solo = true;
            events.push(GameEvent::Info {
                message: "Core exposed! It goes berserk.",
            });
        }
    }

    fn start_core_critical(&mut self, origin: Vec2d, radius: f64, particles: &mut Vec<Particle>) {
        if self.core_critical {
            return;
        }
        self.core_critical = true;
        self.core_critical_timer = 0.0;
        self.core_critical_wave_timer = 0.0;
        self.core_explosion_triggered = false;
        self.core_spark_timer = 0.0;
        self.core_glow_intensity = 0.0;
        self.core_critical_origin = origin;
        self.core_critical_radius = radius.max(60.0);
        self.shockwaves.clear();
        self.plumes.clear();
        let mut rng = rand::rng();
        for i in 0..140 {
            let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
            let speed = safe_gen_range(120.0, 300.0, "core critical burst");
            let color = if i % 2 == 0 {
                [1.0, 0.9, 0.64, 1.0]
            } else {
                [1.0, 0.61, 0.34, 1.0]
            };
            particles.push(Particle::new(
                origin,
                Vec2d::from_angle(angle, speed),
                safe_gen_range(1.4, 2.4, "core critical life"),
                color,
                3.2,
            ));
        }
        self.shockwaves.push(Shockwave {
            radius: self.core_critical_radius * 0.6,
            width: self.core_critical_radius * 0.45,
            growth: 220.0,
            life: 0.0,
            max_life: 1.6,
            alpha: 1.0,
        });
        for &id in &self.segment_ids {
            let seg = &mut self.segments[id.0];
            if id != self.core && !seg.destroyed {
                seg.flash_timer = 1.5;
            }
        }
    }

    fn trigger_core_supernova(&mut self, particles: &mut Vec<Particle>) {
        if self.core_explosion_triggered {
            return;
        }
        self.core_explosion_triggered = true;
        let origin = self.core_critical_origin;
        let mut rng = rand::rng();
        for i in 0..260 {
            let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
            let speed = safe_gen_range(220.0, 480.0, "supernova burst");
            let color = match i % 4 {
                0 => [1.0, 0.97, 0.85, 1.0],
                1 => [1.0, 0.82, 0.64, 1.0],
                2 => [1.0, 0.62, 0.4, 1.0],
                _ => [1.0, 0.46, 0.27, 1.0],
            };
            particles.push(Particle::new(
                origin,
                Vec2d::from_angle(angle, speed),
                safe_gen_range(2.0, 3.6, "supernova life"),
                color,
                3.6,
            ));
        }
        let plume_count = 26;
        for i in 0..plume_count {
            let base_angle = (i as f64 / plume_count as f64) * std::f64::consts::PI * 2.0
                + safe_gen_range(-0.1, 0.1, "plume angle");
            self.plumes.push(Plume {
                angle: base_angle,
                radius: self.core_critical_radius * 0.5,
                speed: safe_gen_range(90.0, 210.0, "plume speed"),
                width: self.core_critical_radius
                    * safe_gen_range(0.12, 0.2, "plume width"),
                life: 0.0,
                max_life: 5.0,
                color: if i % 2 == 0 {
                    [1.0, 0.92, 0.73, 1.0]
                } else {
                    [1.0, 0.7, 0.48, 1.0]
                },
                spin: safe_gen_range(-0.25, 0.25, "plume spin"),
            });
        }
        self.shockwaves.push(Shockwave {
            radius: self.core_critical_radius * 0.8,
            width: self.core_critical_radius * 0.9,
            growth: 320.0,
            life: 0.0,
            max_life: 3.25,
            alpha: 1.0,
        });
    }

    fn update_core_critical(&mut self, dt: f64, particles: &mut Vec<Particle>) {
        self.core_critical_timer += dt;
        self.core_critical_wave_timer += dt;
        self.core_glow_intensity = (self.core_glow_intensity + dt * 0.6).min(1.0);
        if self.core_critical_wave_timer >= 0.38 {
            self.core_critical_wave_timer = 0.0;
            self.shockwaves.push(Shockwave {
                radius: self.core_critical_radius
                    * safe_gen_range(0.45, 0.55, "shockwave radius"),
                width: self.core_critical_radius
                    * safe_gen_range(0.32, 0.4, "shockwave width"),
                growth: safe_gen_range(200.0, 280.0, "shockwave growth"),
                life: 0.0,
                max_life: safe_gen_range(1.3, 2.0, "shockwave life"),
                alpha: 0.85,
            });
        }
        if !self.core_explosion_triggered && self.core_critical_timer >= SUPERNOVA_DELAY {
            self.trigger_core_supernova(particles);
        }
        if self.core_explosion_triggered {
            self.core_spark_timer += dt;
            let mut rng = rand::rng();
            while self.core_spark_timer >= 0.08 {
                self.core_spark_timer -= 0.08;
                let angle = rng.random_range(0.0..std::f64::consts::PI * 2.0);
                let speed = safe_gen_range(160.0, 360.0, "core spark");
                let color = if rng.random_bool(0.5) {
                    [1.0, 0.95, 0.75, 1.0]
                } else {
                    [1.0, 0.71, 0.47, 1.0]
                };
                particles.push(Particle::new(
                    self.core_critical_origin,
                    Vec2d::from_angle(angle, speed),
                    safe_gen_range(1.4, 2.4, "core spark life"),
                    color,
                    3.4,
                ));
            }
        }
        self.shockwaves.retain_mut(|wave| {
            wave.life += dt;
            wave.radius += wave.growth * dt;
            wave.alpha = (1.0 - wave.life / wave.max_life).max(0.0);
            wave.life < wave.max_life
        });
        self.plumes.retain_mut(|plume| {
            plume.life += dt;
            plume.radius += plume.speed * dt;
            plume.angle += plume.spin * dt;
            plume.life < plume.max_life
        });
        self.vel = self.vel.scale(frame_decay(0.94, dt));
        for &id in &self.segment_ids {
            let seg = &mut self.segments[id.0];
            if seg.destroyed {
                continue;
            }
            let pulse = match seg.kind {
                SegmentKind::Weapon => 1.6,
                SegmentKind::Thruster => 1.2,
                _ => 0.8,
            };
            seg.visual_phase += dt * pulse;
            seg.flash_timer = (seg.flash_timer - dt * 1.8).max(0.0);
        }
    }

    /// The boss counts as defeated once the core-critical sequence has
    /// played out. Never true outside that sequence, regardless of health.
    pub fn is_defeated(&self) -> bool {
        self.core_critical && self.core_critical_timer >= combat::DEFEAT_DELAY
    }
}
