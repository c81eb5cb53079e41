// graphics/mod.rs
//
// Scene rendering. Everything is drawn from primitives; the boss body is
// polygons and discs, projectiles and particles draw themselves.

pub mod hud;

use crate::boss::segment::SegmentKind;
use crate::boss::Boss;
use crate::simulation::Simulation;
use piston_window::*;

const BACKGROUND: [f32; 4] = [0.02, 0.03, 0.07, 1.0];

pub fn draw_scene(
    sim: &Simulation,
    glyphs: Option<&mut Glyphs>,
    context: Context,
    g: &mut G2d,
) {
    clear(BACKGROUND, g);

    for star in &sim.stars {
        star.draw(context, g);
    }
    for particle in &sim.particles {
        particle.draw(context, g);
    }

    draw_boss(&sim.boss, context, g);

    for laser in &sim.enemy_lasers {
        laser.draw(context, g);
    }
    for bullet in &sim.enemy_bullets {
        bullet.draw(context, g);
    }
    for missile in &sim.enemy_missiles {
        missile.draw(context, g);
    }
    for bullet in &sim.player_bullets {
        bullet.draw(context, g);
    }

    if let Some(death) = &sim.player_death {
        for shard in &death.shards {
            shard.draw(context, g);
        }
    } else {
        sim.player.draw(context, g);
    }

    hud::draw_hud(sim, glyphs, context, g);
}

pub fn draw_boss(boss: &Boss, context: Context, g: &mut G2d) {
    for chunk in &boss.debris {
        chunk.draw(context, g);
    }

    for &id in &boss.segment_ids {
        let seg = &boss.segments[id.0];
        if seg.destroyed || seg.kind == SegmentKind::Core {
            continue;
        }
        let health_ratio = (seg.health / seg.max_health).clamp(0.0, 1.0) as f32;
        let flash = seg.flash_timer.clamp(0.0, 1.0) as f32;
        let base = match seg.kind {
            SegmentKind::Weapon => [0.82, 0.36, 0.3],
            SegmentKind::Thruster => [0.35, 0.52, 0.72],
            _ => [0.45, 0.42, 0.5],
        };
        let fill = [
            base[0] + flash * (1.0 - base[0]),
            base[1] + flash * (1.0 - base[1]),
            base[2] + flash * (1.0 - base[2]),
            0.35 + health_ratio * 0.55,
        ];
        let points: Vec<[f64; 2]> = seg.polygon.iter().map(|p| [p.x, p.y]).collect();
        if points.len() >= 3 {
            polygon(fill, &points, context.transform, g);
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                line(
                    [0.85, 0.88, 0.95, 0.5],
                    1.0,
                    [a[0], a[1], b[0], b[1]],
                    context.transform,
                    g,
                );
            }
        }

        // Role markers on the tip.
        match seg.kind {
            SegmentKind::Weapon => {
                let pulse = 3.0 + (seg.visual_phase.sin() * 1.2).abs() + seg.recoil * 3.0;
                ellipse(
                    [1.0, 0.55, 0.35, 0.9],
                    [
                        seg.world_end.x - pulse,
                        seg.world_end.y - pulse,
                        pulse * 2.0,
                        pulse * 2.0,
                    ],
                    context.transform,
                    g,
                );
            }
            SegmentKind::Thruster => {
                let power = seg.thruster.as_ref().map(|t| t.power).unwrap_or(0.0);
                let glow = 4.0 + power * 6.0;
                ellipse(
                    [1.0, 0.69, 0.4, (0.3 + power * 0.6) as f32],
                    [
                        seg.world_end.x - glow,
                        seg.world_end.y - glow,
                        glow * 2.0,
                        glow * 2.0,
                    ],
                    context.transform,
                    g,
                );
            }
            _ => {}
        }
    }

    let core = &boss.segments[boss.core.0];
    if !core.destroyed {
        let r = core.radius;
        let pulse = 1.0 + core.visual_phase.sin() * 0.05;
        let health_ratio = (core.health / core.max_health).clamp(0.0, 1.0) as f32;
        ellipse(
            [0.9, 0.35 + health_ratio * 0.3, 0.25, 0.9],
            [
                core.world_center.x - r * pulse,
                core.world_center.y - r * pulse,
                r * pulse * 2.0,
                r * pulse * 2.0,
            ],
            context.transform,
            g,
        );
        Ellipse::new_border([1.0, 0.82, 0.55, 0.8], 2.0).draw(
            [
                core.world_center.x - r,
                core.world_center.y - r,
                r * 2.0,
                r * 2.0,
            ],
            &context.draw_state,
            context.transform,
            g,
        );
    }

    // Death sequence overlays.
    if boss.core_critical {
        let origin = boss.core_critical_origin;
        let glow_radius = boss.core_critical_radius * (1.4 + boss.core_glow_intensity * 1.8);
        ellipse(
            [1.0, 0.85, 0.6, (0.25 * boss.core_glow_intensity) as f32],
            [
                origin.x - glow_radius,
                origin.y - glow_radius,
                glow_radius * 2.0,
                glow_radius * 2.0,
            ],
            context.transform,
            g,
        );
        for plume in &boss.plumes {
            let fade = (1.0 - plume.life / plume.max_life).clamp(0.0, 1.0) as f32;
            let inner = origin
                + crate::utils::vec2d::Vec2d::from_angle(plume.angle, plume.radius * 0.3);
            let outer =
                origin + crate::utils::vec2d::Vec2d::from_angle(plume.angle, plume.radius);
            line(
                [plume.color[0], plume.color[1], plume.color[2], fade * 0.8],
                plume.width,
                [inner.x, inner.y, outer.x, outer.y],
                context.transform,
                g,
            );
        }
    }
    for wave in &boss.shockwaves {
        let r = wave.radius;
        Ellipse::new_border([1.0, 0.73, 0.45, wave.alpha as f32], wave.width * 0.5).draw(
            [
                boss.core_critical_origin.x - r,
                boss.core_critical_origin.y - r,
                r * 2.0,
                r * 2.0,
            ],
            &context.draw_state,
            context.transform,
            g,
        );
    }
}
