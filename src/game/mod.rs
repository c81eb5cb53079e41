// game/mod.rs

pub mod input_handler;
