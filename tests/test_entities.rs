// tests/test_entities.rs

use coresiege::entities::bullet::Bullet;
use coresiege::entities::laser::{LaserBeam, LaserState};
use coresiege::entities::missile::Missile;
use coresiege::entities::player::PlayerShip;
use coresiege::game_state::Owner;
use coresiege::utils::collision::{circle_polygon_collision, point_in_polygon};
use coresiege::utils::math::{frame_decay, wrap_angle};
use coresiege::utils::vec2d::Vec2d;

// ── laser state machine ──

fn make_laser() -> LaserBeam {
    LaserBeam::new(
        Vec2d::zero(),
        Vec2d::new(1.0, 0.0),
        1000.0,
        16.0,
        0.5,
        0.2,
    )
}

#[test]
fn warming_laser_never_collides() {
    let laser = make_laser();
    assert_eq!(laser.state, LaserState::Warmup);
    assert!(!laser.check_collision(Vec2d::new(100.0, 0.0), 14.0));
}

#[test]
fn laser_activates_after_warmup() {
    let mut laser = make_laser();
    assert!(!laser.update(0.3));
    assert_eq!(laser.state, LaserState::Warmup);
    assert!(!laser.update(0.3));
    assert_eq!(laser.state, LaserState::Active);
    assert!(laser.check_collision(Vec2d::new(100.0, 0.0), 14.0));
    assert!(!laser.check_collision(Vec2d::new(100.0, 200.0), 14.0));
}

#[test]
fn active_laser_expires_on_its_own() {
    let mut laser = make_laser();
    laser.update(0.6);
    assert!(laser.update(0.25), "active window has run out");
}

#[test]
fn termination_cuts_the_beam() {
    let mut particles = Vec::new();
    let mut laser = make_laser();
    laser.update(0.6);
    laser.terminate(Vec2d::new(250.0, 0.0), &mut particles);
    assert_eq!(laser.state, LaserState::Terminated);
    assert!((laser.active_length - 250.0).abs() < 1e-9);
    assert!(!laser.check_collision(Vec2d::new(100.0, 0.0), 14.0));
    assert!(!particles.is_empty());

    // A second terminate must not move the cut point or burst again.
    let count = particles.len();
    laser.terminate(Vec2d::new(900.0, 0.0), &mut particles);
    assert!((laser.active_length - 250.0).abs() < 1e-9);
    assert_eq!(particles.len(), count);
}

#[test]
fn terminated_laser_fades_out() {
    let mut particles = Vec::new();
    let mut laser = make_laser();
    laser.update(0.6);
    laser.terminate(Vec2d::new(250.0, 0.0), &mut particles);
    assert!(!laser.update(0.2));
    assert!(laser.update(0.3), "fade-out has finished");
}

// ── missiles ──

#[test]
fn missile_flies_straight_until_turn_delay() {
    let mut particles = Vec::new();
    let mut missile = Missile::new(
        Vec2d::zero(),
        Vec2d::new(0.0, -500.0),
        300.0,
        2.0,
        Some(Vec2d::new(1.0, 0.0)),
        1.0,
    );
    missile.update(0.1, Vec2d::new(0.0, -500.0), &mut particles);
    assert!(missile.vel.angle().abs() < 1e-6, "still on its launch heading");
}

#[test]
fn missile_turns_toward_target_after_delay() {
    let mut particles = Vec::new();
    let mut missile = Missile::new(
        Vec2d::zero(),
        Vec2d::new(0.0, -500.0),
        300.0,
        2.0,
        Some(Vec2d::new(1.0, 0.0)),
        0.0,
    );
    for _ in 0..20 {
        missile.update(0.05, Vec2d::new(0.0, -500.0), &mut particles);
    }
    assert!(missile.vel.y < 0.0, "homing has bent the path upward");
}

#[test]
fn missile_expires_after_lifetime() {
    let mut particles = Vec::new();
    let mut missile = Missile::new(
        Vec2d::zero(),
        Vec2d::new(100.0, 0.0),
        300.0,
        1.0,
        None,
        0.2,
    );
    assert!(!missile.update(1.0, Vec2d::new(100.0, 0.0), &mut particles));
    assert!(missile.update(4.0, Vec2d::new(100.0, 0.0), &mut particles));
}

// ── player ship ──

#[test]
fn player_fire_respects_reload() {
    let mut player = PlayerShip::new(1280.0, 720.0);
    assert!(player.fire().is_some());
    assert!(player.fire().is_none(), "reload timer blocks the second shot");
    player.update(0.2, Vec2d::zero(), 1280.0, 720.0);
    assert!(player.fire().is_some());
}

#[test]
fn player_bullets_travel_along_fire_direction() {
    let mut player = PlayerShip::new(1280.0, 720.0);
    let bullet = player.fire().unwrap();
    assert_eq!(bullet.owner, Owner::Player);
    assert!(bullet.vel.x > 0.0);
    assert!(bullet.vel.y.abs() < 1e-9);
}

#[test]
fn hits_drain_armor_and_grant_invulnerability() {
    let mut player = PlayerShip::new(1280.0, 720.0);
    assert!(!player.take_hit());
    assert_eq!(player.armor, 4);
    assert!(player.invulnerable > 0.0);

    // Invulnerable: the next hit is ignored completely.
    assert!(!player.take_hit());
    assert_eq!(player.armor, 4);
}

#[test]
fn final_hit_reports_ship_loss() {
    let mut player = PlayerShip::new(1280.0, 720.0);
    player.armor = 1;
    player.invulnerable = 0.0;
    assert!(player.take_hit());
    assert_eq!(player.armor, 0);
}

#[test]
fn player_stays_inside_the_arena() {
    let mut player = PlayerShip::new(1280.0, 720.0);
    player.vel = Vec2d::new(-10000.0, -10000.0);
    player.update(1.0, Vec2d::zero(), 1280.0, 720.0);
    assert!(player.pos.x >= player.radius);
    assert!(player.pos.y >= player.radius);
}

// ── projectiles and helpers ──

#[test]
fn bullets_expire_after_their_lifetime() {
    let mut bullet = Bullet::new(
        Vec2d::zero(),
        Vec2d::new(10.0, 0.0),
        4.0,
        [1.0; 4],
        Owner::Boss,
    );
    assert!(!bullet.update(1.0));
    assert!(bullet.update(6.0));
}

#[test]
fn frame_decay_matches_reference_frame() {
    let per_frame = frame_decay(0.96, 1.0 / 60.0);
    assert!((per_frame - 0.96).abs() < 1e-9);
    let two_frames = frame_decay(0.96, 2.0 / 60.0);
    assert!((two_frames - 0.96f64.powi(2)).abs() < 1e-9);
}

#[test]
fn wrap_angle_stays_in_range() {
    let wrapped = wrap_angle(std::f64::consts::PI * 2.5);
    assert!((wrapped - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert!(wrap_angle(-7.0) > -std::f64::consts::PI);
    assert!(wrap_angle(-7.0) <= std::f64::consts::PI);
}

#[test]
fn polygon_collision_basics() {
    let square = vec![
        Vec2d::new(0.0, 0.0),
        Vec2d::new(10.0, 0.0),
        Vec2d::new(10.0, 10.0),
        Vec2d::new(0.0, 10.0),
    ];
    assert!(point_in_polygon(Vec2d::new(5.0, 5.0), &square));
    assert!(!point_in_polygon(Vec2d::new(15.0, 5.0), &square));
    assert!(circle_polygon_collision(Vec2d::new(12.0, 5.0), 3.0, &square));
    assert!(!circle_polygon_collision(Vec2d::new(20.0, 5.0), 3.0, &square));
}
