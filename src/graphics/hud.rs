// graphics/hud.rs
//
// Heads-up display drawn from primitives: a segment-style digit panel for
// the score, armor pips, the boss health bar and the combo readout. Event
// messages go through the glyph cache when one is available.

use crate::simulation::Simulation;
use piston_window::*;

/// Which of the seven bars light up for each digit, in the order
/// top, top-left, top-right, middle, bottom-left, bottom-right, bottom.
const DIGIT_SEGMENTS: [[bool; 7]; 10] = [
    [true, true, true, false, true, true, true],
    [false, false, true, false, false, true, false],
    [true, false, true, true, true, false, true],
    [true, false, true, true, false, true, true],
    [false, true, true, true, false, true, false],
    [true, true, false, true, false, true, true],
    [true, true, false, true, true, true, true],
    [true, false, true, false, false, true, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

pub struct DigitPanel {
    pub digit_width: f64,
    pub digit_height: f64,
    pub spacing: f64,
}

impl DigitPanel {
    pub fn new(digit_width: f64, digit_height: f64, spacing: f64) -> Self {
        DigitPanel {
            digit_width,
            digit_height,
            spacing,
        }
    }

    pub fn draw_digit(
        &self,
        digit: usize,
        x: f64,
        y: f64,
        color: [f32; 4],
        context: Context,
        g: &mut G2d,
    ) {
        let Some(lit) = DIGIT_SEGMENTS.get(digit) else {
            return;
        };
        let w = self.digit_width;
        let h = self.digit_height;
        let bar = (w * 0.14).max(2.0);
        let h_len = w - bar * 2.0;
        let v_len = h * 0.5 - bar;
        // [x, y, width, height] for each of the seven bars.
        let bars = [
            [x + bar, y, h_len, bar],
            [x, y + bar, bar, v_len],
            [x + w - bar, y + bar, bar, v_len],
            [x + bar, y + h * 0.5 - bar * 0.5, h_len, bar],
            [x, y + h * 0.5 + bar * 0.5, bar, v_len],
            [x + w - bar, y + h * 0.5 + bar * 0.5, bar, v_len],
            [x + bar, y + h - bar, h_len, bar],
        ];
        for (on, rect) in lit.iter().zip(bars.iter()) {
            if *on {
                rectangle(color, *rect, context.transform, g);
            }
        }
    }

    pub fn draw_number(
        &self,
        value: u64,
        x: f64,
        y: f64,
        color: [f32; 4],
        context: Context,
        g: &mut G2d,
    ) {
        let digits: Vec<usize> = value
            .to_string()
            .bytes()
            .map(|b| (b - b'0') as usize)
            .collect();
        for (i, digit) in digits.iter().enumerate() {
            let dx = x + i as f64 * (self.digit_width + self.spacing);
            self.draw_digit(*digit, dx, y, color, context, g);
        }
    }
}

pub fn draw_hud(
    sim: &Simulation,
    glyphs: Option<&mut Glyphs>,
    context: Context,
    g: &mut G2d,
) {
    let panel = DigitPanel::new(18.0, 30.0, 6.0);
    panel.draw_number(sim.score, 24.0, 20.0, [0.62, 0.97, 1.0, 0.95], context, g);

    // Armor pips under the score.
    for i in 0..sim.player.max_armor {
        let filled = i < sim.player.armor;
        let x = 24.0 + i as f64 * 22.0;
        let color = if filled {
            [0.43, 0.89, 1.0, 0.9]
        } else {
            [0.43, 0.89, 1.0, 0.18]
        };
        rectangle(color, [x, 62.0, 16.0, 8.0], context.transform, g);
    }

    // Combo readout, only interesting above 1x.
    if sim.combo_multiplier > 1.0 {
        let combo = (sim.combo_multiplier * 10.0).round() as u64;
        let small = DigitPanel::new(10.0, 16.0, 3.0);
        small.draw_number(combo / 10, 24.0, 80.0, [1.0, 0.78, 0.42, 0.9], context, g);
        rectangle(
            [1.0, 0.78, 0.42, 0.9],
            [38.0, 93.0, 3.0, 3.0],
            context.transform,
            g,
        );
        small.draw_number(combo % 10, 45.0, 80.0, [1.0, 0.78, 0.42, 0.9], context, g);
    }

    // Boss health bar across the top.
    let bar_width = sim.width * 0.5;
    let bar_x = (sim.width - bar_width) / 2.0;
    let ratio = if sim.boss.total_health > 0.0 {
        (sim.boss.remaining_health / sim.boss.total_health).clamp(0.0, 1.0)
    } else {
        0.0
    };
    rectangle(
        [1.0, 1.0, 1.0, 0.12],
        [bar_x, 16.0, bar_width, 10.0],
        context.transform,
        g,
    );
    rectangle(
        [1.0, 0.45, 0.3, 0.85],
        [bar_x, 16.0, bar_width * ratio, 10.0],
        context.transform,
        g,
    );
    let small = DigitPanel::new(10.0, 16.0, 3.0);
    small.draw_number(
        sim.level as u64,
        bar_x + bar_width + 14.0,
        12.0,
        [1.0, 0.45, 0.3, 0.9],
        context,
        g,
    );

    // Event message, centered-ish. Skipped entirely without a font.
    if sim.message_timer > 0.0 && !sim.message.is_empty() {
        if let Some(glyphs) = glyphs {
            let alpha = if sim.message_timer.is_finite() {
                sim.message_timer.min(1.0) as f32
            } else {
                1.0
            };
            let transform = context
                .transform
                .trans(sim.width * 0.5 - sim.message.len() as f64 * 5.5, sim.height * 0.28);
            let _ = text::Text::new_color([1.0, 0.93, 0.78, alpha], 22).draw(
                &sim.message,
                glyphs,
                &context.draw_state,
                transform,
                g,
            );
        }
    }
}
