//! Wormhole Dodge - top-down arcade survival simulation
//!
//! Core modules:
//! - `sim`: Per-tick simulation (player, missiles, wormholes, levels, scoring)
//! - `settings`: Playfield bounds and preferences
//! - `audio`: Sound effect sink boundary
//! - `stats`: Best-effort play telemetry
//! - `highscores`: Leaderboard
//! - `error`: Simulation and collaborator error types

pub mod audio;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod stats;

pub use error::{CollaboratorError, SimError};
pub use highscores::HighScores;
pub use settings::{FixedBounds, Settings, SettingsProvider};
pub use sim::Simulation;

/// Game configuration constants
pub mod consts {
    /// Nominal duration of one simulation tick (ms, ~60 Hz)
    pub const TICK_MS: u64 = 16;

    /// Legacy playfield size used when no settings are supplied
    pub const DEFAULT_WORLD_WIDTH: i32 = 800;
    pub const DEFAULT_WORLD_HEIGHT: i32 = 600;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 20;
    pub const MAX_HEALTH: i32 = 100;

    /// Damage dealt by a single missile hit
    pub const HIT_DAMAGE: i32 = 10;

    /// Explosion burst on player death
    pub const EXPLOSION_MISSILES: usize = 10;
    pub const EXPLOSION_MIN_SPEED: f64 = 3.0;
    pub const EXPLOSION_MAX_SPEED: f64 = 8.0;

    /// Score is awarded every N ticks
    pub const SCORE_INTERVAL_TICKS: u64 = 6;

    /// Danger multiplier tuning
    pub const NEAR_MISS_DISTANCE: f64 = 60.0;
    pub const CLOSE_DISTANCE: f64 = 120.0;
    pub const NEAR_MISS_WEIGHT: u32 = 3;
    pub const CLOSE_WEIGHT: u32 = 1;
    pub const MAX_DANGER_MULTIPLIER: u32 = 10;
}

/// Convert an angle (radians) and speed into a velocity vector
#[inline]
pub fn velocity_from_angle(angle: f64, speed: f64) -> glam::DVec2 {
    glam::DVec2::new(angle.cos() * speed, angle.sin() * speed)
}
