// tests/test_simulation.rs

use coresiege::config::GameConfig;
use coresiege::entities::bullet::Bullet;
use coresiege::game_state::{AudioCue, Owner};
use coresiege::simulation::{InputFrame, Simulation};
use coresiege::utils::vec2d::Vec2d;

fn idle() -> InputFrame {
    InputFrame::default()
}

// ── setup and reset ──

#[test]
fn new_simulation_starts_at_level_one() {
    let sim = Simulation::new(GameConfig::default());
    assert_eq!(sim.level, 1);
    assert_eq!(sim.score, 0);
    assert!((sim.combo_multiplier - 1.0).abs() < 1e-9);
    assert!(!sim.game_over);
    assert_eq!(sim.stars.len(), 140);
}

#[test]
fn reset_queues_the_warning_cue() {
    let mut sim = Simulation::new(GameConfig::default());
    let cues = sim.take_audio_cues();
    assert!(cues.contains(&AudioCue::Warning));
    assert!(sim.take_audio_cues().is_empty(), "cues drain on take");
}

#[test]
fn interaction_restarts_a_finished_run() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.game_over = true;
    sim.score = 4200;
    sim.level = 3;
    sim.update(
        0.016,
        &InputFrame {
            movement: Vec2d::zero(),
            fire: false,
            interact: true,
        },
    );
    assert!(!sim.game_over);
    assert_eq!(sim.level, 1);
    assert_eq!(sim.score, 0);
}

// ── input and firing ──

#[test]
fn holding_fire_spawns_player_bullets() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.take_audio_cues();
    sim.update(
        0.016,
        &InputFrame {
            movement: Vec2d::zero(),
            fire: true,
            interact: false,
        },
    );
    assert!(!sim.player_bullets.is_empty());
    assert!(sim.take_audio_cues().contains(&AudioCue::PlayerFire));
}

// ── combo ──

#[test]
fn combo_expires_with_its_window() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.combo_multiplier = 4.0;
    sim.combo_timer = 0.001;
    sim.update(0.033, &idle());
    assert!((sim.combo_multiplier - 1.0).abs() < 1e-9);
}

#[test]
fn combo_survives_inside_its_window() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.combo_multiplier = 4.0;
    sim.combo_timer = 2.0;
    sim.update(0.016, &idle());
    assert!((sim.combo_multiplier - 4.0).abs() < 1e-9);
}

#[test]
fn combo_multiplier_clamps_at_its_cap() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.combo_multiplier = 7.9;
    sim.combo_timer = 2.6;
    // Weaken the bare level-1 core so a single bullet finishes it.
    let core = sim.boss.core;
    sim.boss.segments[core.0].health = 10.0;
    sim.player_bullets.push(Bullet::new(
        sim.boss.pos,
        Vec2d::zero(),
        4.0,
        [1.0; 4],
        Owner::Player,
    ));
    sim.update(0.016, &idle());
    assert!(sim.boss.core_critical, "the weakened core died to the hit");
    assert!(
        (sim.combo_multiplier - 8.0).abs() < 1e-9,
        "the 0.6 boost on top of 7.9 clamps at the cap"
    );
    assert!(sim.score > 0);
    assert!(sim.message.contains("Core obliterated"));
}

// ── core critical cleanup ──

#[test]
fn core_critical_clears_enemy_ordnance() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.enemy_bullets.push(Bullet::new(
        Vec2d::new(900.0, 400.0),
        Vec2d::new(-10.0, 0.0),
        5.0,
        [1.0; 4],
        Owner::Boss,
    ));
    let core = sim.boss.core;
    let mut scratch = Vec::new();
    sim.boss.apply_damage(core, 1e6, &mut scratch);
    sim.update(0.016, &idle());
    assert!(sim.enemy_bullets.is_empty());
    assert!(sim.enemy_missiles.is_empty());
    assert!(sim.enemy_lasers.is_empty());
}

// ── level progression ──

#[test]
fn defeated_boss_is_replaced_at_the_next_level() {
    let mut sim = Simulation::new(GameConfig::default());
    let core = sim.boss.core;
    let mut scratch = Vec::new();
    sim.boss.apply_damage(core, 1e6, &mut scratch);
    for _ in 0..700 {
        sim.update(0.033, &idle());
        if sim.level > 1 {
            break;
        }
    }
    assert_eq!(sim.level, 2);
    assert!(!sim.boss.core_critical, "a fresh boss spawned");
    assert!(sim.score > 0, "defeat pays out a bonus");
    assert!(sim.message.contains("Boss defeated"));
}

// ── player death ──

#[test]
fn final_armor_hit_starts_the_death_sequence() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.player.armor = 1;
    sim.player.invulnerable = 0.0;
    sim.enemy_bullets.push(Bullet::new(
        sim.player.pos,
        Vec2d::zero(),
        5.0,
        [1.0; 4],
        Owner::Boss,
    ));
    sim.update(0.016, &idle());
    assert!(sim.player_death.is_some());
    assert_eq!(sim.player.armor, 0);
    assert!(!sim.game_over, "game over waits for the break-up to finish");
}

#[test]
fn death_sequence_ends_in_game_over() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.player.armor = 1;
    sim.player.invulnerable = 0.0;
    sim.enemy_bullets.push(Bullet::new(
        sim.player.pos,
        Vec2d::zero(),
        5.0,
        [1.0; 4],
        Owner::Boss,
    ));
    sim.update(0.016, &idle());
    assert!(sim.player_death.is_some());
    for _ in 0..400 {
        sim.update(0.033, &idle());
        if sim.game_over {
            break;
        }
    }
    assert!(sim.game_over);
    assert!(sim.message.contains("Ship lost"));
}

#[test]
fn invulnerable_player_swallows_hits_silently() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.player.invulnerable = 5.0;
    sim.enemy_bullets.push(Bullet::new(
        sim.player.pos,
        Vec2d::zero(),
        5.0,
        [1.0; 4],
        Owner::Boss,
    ));
    sim.take_audio_cues();
    sim.update(0.016, &idle());
    assert_eq!(sim.player.armor, 5, "the invulnerability window eats the hit");
    assert!(sim.player_death.is_none());
    assert!(
        !sim.take_audio_cues().contains(&AudioCue::PlayerDamage),
        "no damage sound for a swallowed hit"
    );
}

#[test]
fn armor_hit_keeps_the_game_running() {
    let mut sim = Simulation::new(GameConfig::default());
    sim.player.invulnerable = 0.0;
    sim.enemy_bullets.push(Bullet::new(
        sim.player.pos,
        Vec2d::zero(),
        5.0,
        [1.0; 4],
        Owner::Boss,
    ));
    sim.update(0.016, &idle());
    assert!(sim.player_death.is_none());
    assert_eq!(sim.player.armor, 4);
    assert!(sim.message.contains("hit") || sim.message.contains("collision"));
}
