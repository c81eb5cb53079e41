// boss/generator.rs
//
// Procedural construction of the boss body: a core, radial arms grown layer
// by layer, and weapon or thruster mounts assigned to the leaves.

use crate::boss::segment::{BossSegment, GrowthMode, SegmentId, SegmentKind};
use crate::boss::weapons;
use crate::boss::Boss;
use crate::utils::math::{safe_gen_range, wrap_angle};
use rand::Rng;

impl Boss {
    pub(super) fn generate(&mut self) {
        let level = self.level;
        let mut core = BossSegment::core(
            380.0 + level as f64 * 90.0,
            46.0 + level as f64 * 2.0,
        );
        core.set_core_score(level);
        self.segments.push(core);
        self.core = SegmentId(0);
        self.segment_ids.push(self.core);

        // Level 1 is a bare core; afterwards the arm count scales with level.
        let arm_count = if level <= 1 { 0 } else { level as usize + 1 };
        let max_depth = (2 + level as usize / 3).max(1);
        let mut current_layer: Vec<SegmentId> = Vec::new();

        if arm_count > 0 {
            for i in 0..arm_count {
                let angle = (i as f64 / arm_count as f64) * std::f64::consts::PI * 2.0;
                let id = self.create_arm_segment(self.core, angle, 1, GrowthMode::Base);
                current_layer.push(id);
            }
            self.update_geometry();
        }

        for depth in 2..=max_depth {
            if current_layer.is_empty() {
                break;
            }
            self.update_geometry();
            let split_count = current_layer
                .len()
                .min(current_layer.len() / 2 + 1);
            let mut next_layer = Vec::new();
            for (index, &seg_id) in current_layer.iter().enumerate() {
                let base_angle = self.segments[seg_id.0].target_angle;
                if index < split_count {
                    let spread = safe_gen_range(0.28, 0.53, "arm split spread");
                    next_layer.push(self.create_arm_segment(
                        seg_id,
                        base_angle + spread,
                        depth,
                        GrowthMode::Split,
                    ));
                    next_layer.push(self.create_arm_segment(
                        seg_id,
                        base_angle - spread,
                        depth,
                        GrowthMode::Split,
                    ));
                } else {
                    next_layer.push(self.create_arm_segment(
                        seg_id,
                        base_angle,
                        depth,
                        GrowthMode::Extend,
                    ));
                }
            }
            current_layer = next_layer;
        }

        self.update_geometry();
        self.assign_leaf_roles(&current_layer, arm_count);

        self.initial_thruster_count = self.thruster_ids.len().max(1);
        self.initial_arm_count = (self.segment_ids.len() - 1).max(1);
        self.total_health = self
            .segments
            .iter()
            .map(|seg| seg.max_health)
            .sum();
        self.remaining_health = self.total_health;
        self.update_geometry();
    }

    fn create_arm_segment(
        &mut self,
        parent: SegmentId,
        target_angle: f64,
        depth: usize,
        mode: GrowthMode,
    ) -> SegmentId {
        let parent_angle = if parent == self.core {
            self.heading
        } else {
            self.segments[parent.0].absolute_angle
        };
        let offset = wrap_angle(target_angle - parent_angle);
        let jitter_span = if mode == GrowthMode::Split { 0.21 } else { 0.09 };
        let local_angle = offset + safe_gen_range(-jitter_span, jitter_span, "arm jitter");
        let length_base = (80.0 + depth as f64 * 24.0) * 0.25;
        let raw_length = if mode == GrowthMode::Extend {
            length_base + safe_gen_range(20.0, 35.0, "arm length")
        } else {
            length_base + safe_gen_range(12.5, 21.25, "arm length")
        };
        let length = raw_length * 1.5;
        let thickness = safe_gen_range(20.0, 25.0, "arm thickness") + depth as f64 * 2.0;
        let extend_bonus = if mode == GrowthMode::Extend { 14.0 } else { 0.0 };
        let health =
            110.0 + self.level as f64 * 28.0 - depth as f64 * 9.0 + extend_bonus;

        let id = SegmentId(self.segments.len());
        let mut segment = BossSegment::branch(length, thickness, local_angle, health);
        segment.layer_depth = depth;
        segment.target_angle = target_angle;
        segment.parent = Some(parent);
        segment.set_branch_score();
        self.segments.push(segment);
        self.segments[parent.0].children.push(id);
        self.segment_ids.push(id);
        id
    }

    /// Turns the outermost layer into weapon and thruster mounts. Every boss
    /// with arms ends up with at least one of each.
    fn assign_leaf_roles(&mut self, leaves: &[SegmentId], arm_count: usize) {
        let level = self.level;
        let pool = if !leaves.is_empty() {
            leaves.len()
        } else if arm_count > 0 {
            arm_count
        } else {
            1
        };
        let mut thruster_quota = (pool / 3).max(1);
        let mut rng = rand::rng();

        for &id in leaves {
            let reserved = if thruster_quota > 0 {
                thruster_quota -= 1;
                true
            } else {
                false
            };
            if reserved || rng.random_bool(0.15) {
                self.make_thruster(id, 220.0 + level as f64 * 28.0);
            } else {
                self.make_weapon(id);
            }
        }

        if leaves.len() == 1 {
            let only = leaves[0];
            if self.segments[only.0].kind != SegmentKind::Weapon {
                self.thruster_ids.retain(|&t| t != only);
                self.make_weapon(only);
            }
        } else {
            if self.weapon_ids.is_empty() {
                if let Some(fallback) = self.thruster_ids.pop() {
                    self.make_weapon(fallback);
                }
            }
            if self.thruster_ids.is_empty() {
                if let Some(fallback) = self.weapon_ids.pop() {
                    self.make_thruster(fallback, 220.0 + level as f64 * 24.0);
                }
            }
        }
    }

    fn make_weapon(&mut self, id: SegmentId) {
        let depth = self.segments[id.0].layer_depth.max(1);
        let kind = weapons::pick_weapon(self.level, depth);
        let segment = &mut self.segments[id.0];
        segment.kind = SegmentKind::Weapon;
        segment.set_weapon(kind, self.level);
        self.weapon_ids.push(id);
    }

    fn make_thruster(&mut self, id: SegmentId, force: f64) {
        let segment = &mut self.segments[id.0];
        segment.kind = SegmentKind::Thruster;
        segment.set_thruster(force);
        self.thruster_ids.push(id);
    }
}
