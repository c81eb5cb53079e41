// Copyright (C) 2026 coresiege contributors
//
// This file is part of coresiege.
//
// coresiege is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// coresiege is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with coresiege. If not, see <https://www.gnu.org/licenses/>.

//File: src/main.rs

// Crates
extern crate find_folder;
extern crate piston_window;
extern crate rand;
extern crate rodio;

use coresiege::audio::AudioManager;
use coresiege::config::{resolution, GameConfig};
use coresiege::game::input_handler::InputState;
use coresiege::graphics::draw_scene;
use coresiege::simulation::Simulation;
use piston_window::*;

fn main() {
    let mut window: PistonWindow = WindowSettings::new(
        "Coresiege",
        [resolution::WIDTH as u32, resolution::HEIGHT as u32],
    )
    .exit_on_esc(true)
    .resizable(false)
    .build()
    .unwrap_or_else(|e| panic!("Failed to build window: {}", e));

    // Audio is optional: a machine without a sound device still gets the
    // full game, just silent.
    let audio_manager = match AudioManager::new() {
        Ok(manager) => {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| std::path::PathBuf::from("."));
            if let Err(e) = manager.load_sfx_directory(&exe_dir) {
                println!("Sound effects unavailable: {}", e);
            }
            Some(manager)
        }
        Err(e) => {
            println!("Audio disabled: {}", e);
            None
        }
    };

    let mut glyphs = find_folder::Search::ParentsThenKids(3, 3)
        .for_folder("assets")
        .ok()
        .map(|assets| assets.join("FiraSans-Regular.ttf"))
        .filter(|path| path.exists())
        .and_then(|path| match window.load_font(&path) {
            Ok(glyphs) => Some(glyphs),
            Err(e) => {
                println!("Failed to load font {:?}: {}", path, e);
                None
            }
        });
    if glyphs.is_none() {
        println!("No font found; HUD messages will not be drawn");
    }

    let mut simulation = Simulation::new(GameConfig::default());
    let mut input = InputState::new();

    while let Some(e) = window.next() {
        if let Some(button) = e.press_args() {
            input.key_press(button);
        }
        if let Some(button) = e.release_args() {
            input.key_release(button);
        }

        if let Some(args) = e.update_args() {
            let frame = input.frame();
            simulation.update(args.dt, &frame);
            if let Some(audio) = &audio_manager {
                for cue in simulation.take_audio_cues() {
                    audio.trigger(cue);
                }
            } else {
                simulation.take_audio_cues();
            }
        }

        window.draw_2d(&e, |c, g, device| {
            draw_scene(&simulation, glyphs.as_mut(), c, g);
            if let Some(glyphs) = glyphs.as_mut() {
                glyphs.factory.encoder.flush(device);
            }
        });
    }
}
