// tests/test_boss.rs

use coresiege::boss::segment::SegmentKind;
use coresiege::boss::weapons::{self, WeaponKind};
use coresiege::boss::Boss;
use coresiege::config::GameConfig;
use coresiege::entities::bullet::Bullet;
use coresiege::entities::particle::Particle;
use coresiege::game_state::{AudioCue, GameEvent, Owner};
use coresiege::utils::vec2d::Vec2d;

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 720.0;

fn make_boss(level: u32) -> Boss {
    Boss::new(level, WIDTH, HEIGHT, GameConfig::default())
}

// ── generation ──

#[test]
fn level_one_boss_is_a_bare_core() {
    let boss = make_boss(1);
    assert_eq!(boss.segment_ids.len(), 1);
    assert!(boss.weapon_ids.is_empty());
    assert!(boss.thruster_ids.is_empty());
    assert_eq!(boss.segments[boss.core.0].kind, SegmentKind::Core);
}

#[test]
fn armed_boss_has_weapons_and_thrusters() {
    for _ in 0..8 {
        let boss = make_boss(3);
        assert!(boss.segment_ids.len() > 1);
        assert!(!boss.weapon_ids.is_empty(), "every armed boss mounts a weapon");
        assert!(
            !boss.thruster_ids.is_empty(),
            "every armed boss mounts a thruster"
        );
    }
}

#[test]
fn generation_has_exactly_one_core() {
    let boss = make_boss(4);
    let cores = boss
        .segments
        .iter()
        .filter(|seg| seg.kind == SegmentKind::Core)
        .count();
    assert_eq!(cores, 1);
}

#[test]
fn total_health_covers_every_segment() {
    let boss = make_boss(3);
    let sum: f64 = boss.segments.iter().map(|seg| seg.max_health).sum();
    assert!((boss.total_health - sum).abs() < 1e-9);
    assert!((boss.remaining_health - sum).abs() < 1e-9);
}

#[test]
fn geometry_is_resolved_after_generation() {
    let boss = make_boss(3);
    for &id in &boss.segment_ids {
        let seg = &boss.segments[id.0];
        if seg.kind != SegmentKind::Core {
            assert_eq!(seg.polygon.len(), 4);
            assert!((seg.world_end - seg.world_start).length() > 0.0);
        }
    }
}

// ── damage and detachment ──

#[test]
fn lethal_damage_detaches_the_subtree() {
    let mut particles = Vec::new();
    let mut boss = make_boss(3);
    // Pick a depth-1 arm so the whole branch hangs off it.
    let root = boss.segments[boss.core.0].children[0];
    let mut subtree = vec![root];
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for &child in &boss.segments[id.0].children {
            subtree.push(child);
            stack.push(child);
        }
    }
    let events = boss.apply_damage(root, 1e6, &mut particles);
    for id in &subtree {
        assert!(boss.segments[id.0].destroyed);
        assert!(!boss.segment_ids.contains(id));
        assert!(!boss.weapon_ids.contains(id));
        assert!(!boss.thruster_ids.contains(id));
    }
    assert!(!boss.segments[boss.core.0].children.contains(&root));
    let scores = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Score { .. }))
        .count();
    assert!(scores >= 1, "detachment reports at least one score event");
    assert!(!boss.debris.is_empty(), "detachment sheds a debris chunk");
}

#[test]
fn detaching_a_leaf_reports_its_exact_score() {
    let mut particles = Vec::new();
    let mut boss = make_boss(3);
    let leaf = boss.weapon_ids[0];
    assert!(
        boss.segments[leaf.0].children.is_empty(),
        "weapons sit on leaves"
    );
    let expected = boss.segments[leaf.0].score_value.floor();
    let events = boss.apply_damage(leaf, 1e6, &mut particles);
    let scores: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Score {
                points, message, ..
            } => Some((*points, *message)),
            _ => None,
        })
        .collect();
    assert_eq!(scores.len(), 1, "one aggregated score event per detachment");
    assert!((scores[0].0 - expected).abs() < 1e-9);
    assert_eq!(scores[0].1, "Weapon offline!");
}

#[test]
fn damage_to_destroyed_segment_is_a_no_op() {
    let mut particles = Vec::new();
    let mut boss = make_boss(3);
    let arm = boss.segments[boss.core.0].children[0];
    boss.apply_damage(arm, 1e6, &mut particles);
    let events = boss.apply_damage(arm, 50.0, &mut particles);
    assert!(events.is_empty());
}

#[test]
fn branch_damage_splashes_into_children() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    let arm = boss.segments[boss.core.0].children[0];
    let children = boss.segments[arm.0].children.clone();
    assert!(!children.is_empty(), "depth-1 arms carry children at level 2");
    let before: Vec<f64> = children.iter().map(|c| boss.segments[c.0].health).collect();
    let amount = 10.0;
    boss.apply_damage(arm, amount, &mut particles);
    let share = amount * 0.5 / children.len() as f64;
    for (child, health) in children.iter().zip(before.iter()) {
        assert!((boss.segments[child.0].health - (health - share)).abs() < 1e-9);
    }
}

#[test]
fn core_damage_splashes_into_every_live_segment() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    let others: Vec<_> = boss
        .segment_ids
        .iter()
        .copied()
        .filter(|&id| id != boss.core)
        .collect();
    let before: Vec<f64> = others.iter().map(|id| boss.segments[id.0].health).collect();
    boss.apply_damage(boss.core, 10.0, &mut particles);
    for (id, health) in others.iter().zip(before.iter()) {
        assert!((boss.segments[id.0].health - (health - 3.5)).abs() < 1e-9);
    }
}

#[test]
fn stripping_the_core_announces_exposure() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    let arms = boss.segments[boss.core.0].children.clone();
    let mut all_events = Vec::new();
    for arm in arms {
        if !boss.segments[arm.0].destroyed {
            all_events.extend(boss.apply_damage(arm, 1e6, &mut particles));
        }
    }
    assert!(boss.core_solo);
    assert!(all_events.iter().any(|e| matches!(
        e,
        GameEvent::Info { message } if message.contains("berserk")
    )));
}

// ── core critical ──

#[test]
fn killing_the_core_starts_the_death_sequence() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    let events = boss.apply_damage(boss.core, 1e6, &mut particles);
    assert!(boss.core_critical);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Score { message, .. } if *message == "Core obliterated!"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Info { message } if message.contains("critical")
    )));
    assert!(!boss.shockwaves.is_empty());
}

#[test]
fn core_critical_boss_cannot_be_hit() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    boss.apply_damage(boss.core, 1e6, &mut particles);
    let bullet = Bullet::new(
        boss.pos,
        Vec2d::zero(),
        4.0,
        [1.0; 4],
        Owner::Player,
    );
    assert!(boss.hit_test(&bullet).is_none());
}

#[test]
fn defeat_requires_the_full_sequence() {
    let mut particles = Vec::new();
    let mut boss = make_boss(1);
    boss.apply_damage(boss.core, 1e6, &mut particles);
    assert!(!boss.is_defeated());
    for _ in 0..6 {
        boss.update(1.0, Vec2d::new(100.0, 100.0), &mut particles);
    }
    assert!(boss.is_defeated());
}

#[test]
fn core_critical_zeroes_remaining_health() {
    let mut particles = Vec::new();
    let mut boss = make_boss(2);
    boss.apply_damage(boss.core, 1e6, &mut particles);
    boss.update(0.016, Vec2d::new(100.0, 100.0), &mut particles);
    assert_eq!(boss.remaining_health, 0.0);
}

// ── hit testing ──

#[test]
fn bullet_on_core_reports_a_core_hit() {
    let boss = make_boss(1);
    let bullet = Bullet::new(boss.pos, Vec2d::new(1.0, 0.0), 4.0, [1.0; 4], Owner::Player);
    let hit = boss.hit_test(&bullet).expect("bullet overlapping the core hits");
    assert_eq!(hit.id, boss.core);
}

#[test]
fn distant_bullet_misses() {
    let boss = make_boss(3);
    let bullet = Bullet::new(
        Vec2d::new(-500.0, -500.0),
        Vec2d::new(1.0, 0.0),
        4.0,
        [1.0; 4],
        Owner::Player,
    );
    assert!(boss.hit_test(&bullet).is_none());
}

// ── weapon fire ──

#[test]
fn core_storm_fires_a_full_volley() {
    let mut particles = Vec::new();
    let muzzle = weapons::Muzzle {
        world_end: Vec2d::new(900.0, 300.0),
        world_center: Vec2d::new(900.0, 300.0),
        absolute_angle: 0.0,
    };
    let batch = weapons::fire(
        WeaponKind::CoreStorm,
        &muzzle,
        Vec2d::new(200.0, 500.0),
        3,
        &GameConfig::default(),
        &mut particles,
    );
    assert_eq!(batch.bullets.len(), 8, "a full ring of bullets");
    assert_eq!(batch.missiles.len(), 4);
    assert_eq!(batch.lasers.len(), 1);
    assert!(batch.cues.contains(&AudioCue::MissileLaunch));
    assert!(batch.cues.contains(&AudioCue::LaserFire));
}

// ── solo core behavior ──

#[test]
fn bare_core_arms_itself_with_a_storm() {
    let mut particles: Vec<Particle> = Vec::new();
    let mut boss = make_boss(1);
    boss.update(0.016, Vec2d::new(100.0, 100.0), &mut particles);
    assert!(boss.core_solo);
    let mount = boss.segments[boss.core.0]
        .weapon
        .as_ref()
        .expect("a solo core mounts its own weapon");
    assert_eq!(mount.kind, WeaponKind::CoreStorm);
}

#[test]
fn stripped_boss_moves_faster() {
    let mut particles = Vec::new();
    let mut boss = make_boss(3);
    assert!((boss.movement_speed_multiplier() - 1.0).abs() < 1e-9);
    let arms = boss.segments[boss.core.0].children.clone();
    for arm in arms {
        if !boss.segments[arm.0].destroyed {
            boss.apply_damage(arm, 1e6, &mut particles);
        }
    }
    assert!((boss.movement_speed_multiplier() - 2.0).abs() < 1e-9);
}
