// entities/mod.rs

pub mod bullet;
pub mod laser;
pub mod missile;
pub mod particle;
pub mod player;
pub mod shard;
pub mod star;
