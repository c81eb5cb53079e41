// boss/segment.rs

use crate::boss::weapons::{self, WeaponKind};
use crate::utils::vec2d::Vec2d;

/// Index into the boss's segment arena. Segments are never removed from the
/// arena; destroyed nodes are flagged and unlinked instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Core,
    Branch,
    Weapon,
    Thruster,
}

/// How a branch was grown off its parent during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthMode {
    Base,
    Split,
    Extend,
}

pub struct WeaponMount {
    pub kind: WeaponKind,
    pub timer: f64,
}

pub struct ThrusterMount {
    pub force: f64,
    /// Last commanded output in 0..=1, kept for the exhaust rendering.
    pub power: f64,
}

/// One node of the boss body tree.
pub struct BossSegment {
    pub kind: SegmentKind,
    pub length: f64,
    pub thickness: f64,
    pub local_angle: f64,
    pub health: f64,
    pub max_health: f64,
    pub radius: f64,
    pub parent: Option<SegmentId>,
    pub children: Vec<SegmentId>,
    pub weapon: Option<WeaponMount>,
    pub thruster: Option<ThrusterMount>,
    pub layer_depth: usize,
    /// Absolute angle this branch was aimed at during generation. The next
    /// generation layer grows relative to it.
    pub target_angle: f64,
    pub absolute_angle: f64,
    pub world_start: Vec2d,
    pub world_end: Vec2d,
    pub world_center: Vec2d,
    pub polygon: Vec<Vec2d>,
    pub destroyed: bool,
    pub score_value: f64,
    pub visual_phase: f64,
    pub flash_timer: f64,
    pub recoil: f64,
}

impl BossSegment {
    pub fn core(health: f64, radius: f64) -> Self {
        BossSegment {
            kind: SegmentKind::Core,
            length: 0.0,
            thickness: 0.0,
            local_angle: 0.0,
            health,
            max_health: health,
            radius,
            parent: None,
            children: Vec::new(),
            weapon: None,
            thruster: None,
            layer_depth: 0,
            target_angle: 0.0,
            absolute_angle: 0.0,
            world_start: Vec2d::zero(),
            world_end: Vec2d::zero(),
            world_center: Vec2d::zero(),
            polygon: Vec::new(),
            destroyed: false,
            score_value: 100.0,
            visual_phase: 0.0,
            flash_timer: 0.0,
            recoil: 0.0,
        }
    }

    pub fn branch(length: f64, thickness: f64, local_angle: f64, health: f64) -> Self {
        BossSegment {
            kind: SegmentKind::Branch,
            length,
            thickness,
            local_angle,
            health,
            max_health: health,
            radius: 0.0,
            parent: None,
            children: Vec::new(),
            weapon: None,
            thruster: None,
            layer_depth: 1,
            target_angle: 0.0,
            absolute_angle: 0.0,
            world_start: Vec2d::zero(),
            world_end: Vec2d::zero(),
            world_center: Vec2d::zero(),
            polygon: Vec::new(),
            destroyed: false,
            score_value: 100.0,
            visual_phase: 0.0,
            flash_timer: 0.0,
            recoil: 0.0,
        }
    }

    pub fn set_weapon(&mut self, kind: WeaponKind, level: u32) {
        self.weapon = Some(WeaponMount {
            kind,
            timer: weapons::next_cooldown(kind, level),
        });
        self.thruster = None;
        self.flash_timer = 0.0;
        self.recoil = 0.0;
        let base = 120.0 + self.max_health * 0.5;
        self.score_value = base + weapons::spec(kind).difficulty as f64 * 120.0;
    }

    pub fn set_thruster(&mut self, force: f64) {
        self.thruster = Some(ThrusterMount { force, power: 0.0 });
        self.weapon = None;
        self.flash_timer = 0.0;
        self.recoil = 0.0;
        self.score_value = 140.0 + self.max_health * 0.4;
    }

    pub fn set_branch_score(&mut self) {
        self.score_value = 160.0 + self.max_health * 0.45;
    }

    pub fn set_core_score(&mut self, level: u32) {
        self.score_value = 800.0 + level as f64 * 220.0;
    }

    /// Recomputes world-space geometry from the attachment point and angle
    /// the parent provides.
    pub fn update_geometry(&mut self, base_point: Vec2d, base_angle: f64) {
        if self.kind == SegmentKind::Core {
            self.absolute_angle = base_angle;
            self.world_start = base_point;
            self.world_end = base_point;
            self.world_center = base_point;
            self.polygon.clear();
            return;
        }
        self.absolute_angle = base_angle + self.local_angle;
        let direction = Vec2d::from_angle(self.absolute_angle, self.length);
        self.world_start = base_point;
        self.world_end = base_point + direction;
        self.world_center = (self.world_start + self.world_end).scale(0.5);
        let normal = Vec2d::from_angle(
            self.absolute_angle + std::f64::consts::FRAC_PI_2,
            self.thickness / 2.0,
        );
        self.polygon.clear();
        self.polygon.push(self.world_start + normal);
        self.polygon.push(self.world_end + normal);
        self.polygon.push(self.world_end - normal);
        self.polygon.push(self.world_start - normal);
    }
}
