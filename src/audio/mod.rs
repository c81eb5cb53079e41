// audio/mod.rs

use crate::game_state::AudioCue;
use rodio::{Decoder, Sink};
use rodio::mixer::Mixer;
use rodio::source::Source;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Minimum gap between two plays of the same effect. Volleys can trigger
/// the same cue many times in one tick.
const DEBOUNCE_MS: u128 = 50;

pub struct AudioManager {
    _stream: rodio::OutputStream,
    mixer: Arc<Mixer>,
    sound_effects: Arc<Mutex<HashMap<String, PathBuf>>>,
    last_played: Mutex<HashMap<String, Instant>>,
}

impl AudioManager {
    pub fn new() -> Result<Self, String> {
        println!("[AudioManager] Initializing audio system...");

        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("Failed to open audio stream: {}", e))?;
        let mixer = stream.mixer().clone();

        println!("[AudioManager] Audio system initialized successfully");

        Ok(AudioManager {
            _stream: stream,
            mixer: mixer.into(),
            sound_effects: Arc::new(Mutex::new(HashMap::new())),
            last_played: Mutex::new(HashMap::new()),
        })
    }

    /// Load a sound effect and associate it with a name.
    pub fn load_sound_effect(&self, name: &str, path: &PathBuf) -> Result<(), String> {
        if !path.exists() {
            return Err(format!("Sound file does not exist: {:?}", path));
        }

        let file = File::open(path).map_err(|e| {
            format!("Failed to open sound effect file {}: {}", path.display(), e)
        })?;

        // Test decode up front so a broken file fails at load, not mid-game.
        let decoder = Decoder::try_from(file).map_err(|e| {
            format!(
                "Failed to decode sound effect file {}: {}",
                path.display(),
                e
            )
        })?;
        println!(
            "[AudioManager] '{}' decoded OK - sample_rate: {}, channels: {}",
            name,
            decoder.sample_rate(),
            decoder.channels()
        );

        let mut effects = self
            .sound_effects
            .lock()
            .map_err(|_| String::from("sound effect table poisoned"))?;
        effects.insert(name.to_string(), path.clone());
        Ok(())
    }

    /// Play a sound effect by name, debounced.
    pub fn play_sound_effect(&self, name: &str) -> Result<(), String> {
        {
            let mut last_played = self
                .last_played
                .lock()
                .map_err(|_| String::from("debounce table poisoned"))?;
            let now = Instant::now();
            if let Some(last_time) = last_played.get(name) {
                if now.duration_since(*last_time).as_millis() < DEBOUNCE_MS {
                    return Ok(());
                }
            }
            last_played.insert(name.to_string(), now);
        }

        // Clone path and release lock before I/O.
        let path = {
            let effects = self
                .sound_effects
                .lock()
                .map_err(|_| String::from("sound effect table poisoned"))?;
            effects
                .get(name)
                .ok_or_else(|| format!("Sound effect '{}' not found", name))?
                .clone()
        };

        let file = File::open(&path)
            .map_err(|e| format!("Failed to open sound effect file: {}", e))?;
        let source = Decoder::try_from(file)
            .map_err(|e| format!("Failed to decode sound effect file: {}", e))?;

        let sink = Sink::connect_new(&self.mixer);
        sink.set_volume(1.0);
        sink.append(source);
        sink.detach();
        Ok(())
    }

    /// Maps a gameplay cue to its effect name and plays it. Missing or
    /// failed effects only log; the game keeps running silent.
    pub fn trigger(&self, cue: AudioCue) {
        let name = match cue {
            AudioCue::PlayerFire => "player_fire",
            AudioCue::BossVolley => "boss_volley",
            AudioCue::BulletImpact => "impact",
            AudioCue::MissileLaunch => "missile",
            AudioCue::LaserFire => "laser",
            AudioCue::PlayerDamage => "player_hit",
            AudioCue::BossExplosion => "explosion",
            AudioCue::Warning => "warning",
        };
        if let Err(e) = self.play_sound_effect(name) {
            println!("[AudioManager] {}", e);
        }
    }

    /// Load all known sound effects from the sfx directory.
    pub fn load_sfx_directory(&self, exe_dir: &Path) -> Result<(), String> {
        let mut potential_sfx_dirs: Vec<Option<PathBuf>> = Vec::new();
        potential_sfx_dirs.push(Some(Path::new("sfx").to_path_buf()));
        potential_sfx_dirs.push(Some(exe_dir.join("sfx")));
        potential_sfx_dirs.push(exe_dir.parent().map(|p| p.join("sfx")));
        potential_sfx_dirs.push(Some(Path::new(".").join("sfx")));

        if let Ok(found) = find_folder::Search::ParentsThenKids(3, 3).for_folder("sfx") {
            potential_sfx_dirs.push(Some(found));
        }

        let sfx_dir = potential_sfx_dirs
            .into_iter()
            .flatten()
            .find(|dir| dir.exists())
            .ok_or_else(|| String::from("Could not find sfx directory in any standard location"))?;

        println!("Found sound effects directory at: {:?}", sfx_dir.display());

        let effects = [
            ("player_fire", "player_fire.wav"),
            ("boss_volley", "boss_volley.wav"),
            ("impact", "impact.wav"),
            ("missile", "missile.wav"),
            ("laser", "laser.wav"),
            ("player_hit", "player_hit.wav"),
            ("explosion", "explosion.wav"),
            ("warning", "warning.wav"),
        ];

        for (name, filename) in effects.iter() {
            let path = sfx_dir.join(filename);
            match self.load_sound_effect(name, &path) {
                Ok(_) => println!("Loaded: {} from {}", name, path.display()),
                Err(e) => println!("FAILED to load {}: {}", name, e),
            }
        }

        Ok(())
    }
}
