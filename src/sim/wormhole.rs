//! Missile-emitting portals
//!
//! Lifecycle: spawning -> expiring (shrinking) -> expired. The owning level
//! drives the transition by polling [`Wormhole::should_expire`] and calling
//! [`Wormhole::start_expiring`].

/// Missiles a single wormhole may emit
pub const MAX_MISSILES_PER_WORMHOLE: u32 = 4;
/// Ticks between emissions
pub const MISSILE_SPAWN_INTERVAL: u32 = 60;
/// Initial wormhole size, also the spawn margin from the playfield edges
pub const DEFAULT_SIZE: i32 = 40;
/// Size lost per tick while expiring
pub const SHRINK_RATE: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wormhole {
    pub x: i32,
    pub y: i32,
    size: i32,
    original_size: i32,
    spawn_timer: u32,
    missiles_spawned: u32,
    expiring: bool,
}

impl Wormhole {
    pub fn new(x: i32, y: i32) -> Self {
        Self::with_size(x, y, DEFAULT_SIZE)
    }

    pub fn with_size(x: i32, y: i32, size: i32) -> Self {
        Self {
            x,
            y,
            size: size.max(0),
            original_size: size.max(0),
            spawn_timer: 0,
            missiles_spawned: 0,
            expiring: false,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn original_size(&self) -> i32 {
        self.original_size
    }

    pub fn missiles_spawned(&self) -> u32 {
        self.missiles_spawned
    }

    pub fn is_expiring(&self) -> bool {
        self.expiring
    }

    /// Fraction of the original size remaining (for rendering)
    pub fn scale(&self) -> f32 {
        if self.original_size == 0 {
            0.0
        } else {
            self.size as f32 / self.original_size as f32
        }
    }

    pub fn update(&mut self) {
        self.spawn_timer += 1;
        if self.expiring {
            self.size = (self.size - SHRINK_RATE).max(0);
        }
    }

    /// Quota reached. Pure query; see [`Wormhole::start_expiring`].
    pub fn should_expire(&self) -> bool {
        self.missiles_spawned >= MAX_MISSILES_PER_WORMHOLE
    }

    pub fn start_expiring(&mut self) {
        self.expiring = true;
    }

    /// Poll for an emission
    ///
    /// On `true` the spawn timer restarts and the emission is counted, so a
    /// caller must act on every `true` it receives.
    pub fn should_spawn_missile(&mut self) -> bool {
        if self.missiles_spawned >= MAX_MISSILES_PER_WORMHOLE
            || self.spawn_timer <= MISSILE_SPAWN_INTERVAL
        {
            return false;
        }
        self.spawn_timer = 0;
        self.missiles_spawned += 1;
        true
    }

    /// Fully shrunk
    pub fn is_expired(&self) -> bool {
        self.size <= 0
    }
}
