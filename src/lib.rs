// File: src/lib.rs

pub mod audio;
pub mod boss;
pub mod config;
pub mod entities;
pub mod game;
pub mod game_state;
pub mod graphics;
pub mod simulation;
pub mod utils;
