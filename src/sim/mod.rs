//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Fixed tick only (one `Simulation::update` per frame)
//! - Randomness comes from an injected `RandomSource`
//! - Playfield size, audio and stats come from injected collaborators

pub mod collision;
pub mod game;
pub mod level;
pub mod missile;
pub mod player;
pub mod rng;
pub mod wormhole;

pub use collision::{aabb_overlap, danger_multiplier, take_colliding_missile};
pub use game::{Simulation, TickReport};
pub use level::{
    Level, MISSILES_PER_WORMHOLE, WORMHOLE_SPAWN_INTERVAL, max_missiles, max_wormholes,
};
pub use missile::{MAX_BOUNCES, MISSILE_SIZE, MISSILE_SPEED, Missile};
pub use player::Player;
pub use rng::{PcgRandom, RandomSource, ScriptedRandom};
pub use wormhole::{MAX_MISSILES_PER_WORMHOLE, MISSILE_SPAWN_INTERVAL, Wormhole};
