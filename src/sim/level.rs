//! A single level: wormhole scheduling, missile emission, completion
//!
//! Spawning is budget-driven rather than scheduled. The level owns a fixed
//! missile quota and only opens a new wormhole when the wormholes already on
//! the field can no longer cover what remains of that quota.

use super::missile::{MISSILE_SPEED, Missile};
use super::rng::RandomSource;
use super::wormhole::{DEFAULT_SIZE, Wormhole};
use crate::error::{SimError, validate_bounds};

/// Missiles each level number adds to the quota
pub const MISSILES_PER_LEVEL: u32 = 3;
/// Capacity assumed per wormhole when budgeting wormholes
pub const MISSILES_PER_WORMHOLE: u32 = 5;
/// Ticks between wormhole spawn attempts
pub const WORMHOLE_SPAWN_INTERVAL: u32 = 120;

/// Missile quota for a level
pub fn max_missiles(level: u32) -> u32 {
    level * MISSILES_PER_LEVEL
}

/// Concurrent wormhole cap for a level
pub fn max_wormholes(level: u32) -> u32 {
    max_missiles(level).div_ceil(MISSILES_PER_WORMHOLE)
}

#[derive(Debug, Clone)]
pub struct Level {
    number: u32,
    wormholes: Vec<Wormhole>,
    missiles: Vec<Missile>,
    spawn_timer: u32,
    wormholes_spawned: u32,
    missiles_spawned: u32,
}

impl Level {
    pub fn new(number: u32) -> Result<Self, SimError> {
        if number == 0 {
            return Err(SimError::InvalidLevel { level: number });
        }
        Ok(Self {
            number,
            wormholes: Vec::new(),
            missiles: Vec::new(),
            spawn_timer: 0,
            wormholes_spawned: 0,
            missiles_spawned: 0,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn max_missiles(&self) -> u32 {
        max_missiles(self.number)
    }

    pub fn max_wormholes(&self) -> u32 {
        max_wormholes(self.number)
    }

    pub fn wormholes(&self) -> &[Wormhole] {
        &self.wormholes
    }

    pub fn missiles(&self) -> &[Missile] {
        &self.missiles
    }

    /// Mutable access for collision resolution
    pub fn missiles_mut(&mut self) -> &mut Vec<Missile> {
        &mut self.missiles
    }

    pub fn wormholes_spawned(&self) -> u32 {
        self.wormholes_spawned
    }

    pub fn missiles_spawned(&self) -> u32 {
        self.missiles_spawned
    }

    /// Add a missile that does not count toward the level quota
    /// (explosion debris, scripted setups)
    pub fn add_missile(&mut self, missile: Missile) {
        self.missiles.push(missile);
    }

    /// Add a wormhole directly, bypassing the spawn timer
    pub fn add_wormhole(&mut self, wormhole: Wormhole) {
        self.wormholes.push(wormhole);
        self.wormholes_spawned += 1;
    }

    /// Emission capacity left on the wormholes currently in play
    fn available_capacity(&self) -> u32 {
        let total = self.wormholes.len() as u32 * MISSILES_PER_WORMHOLE;
        let used: u32 = self.wormholes.iter().map(Wormhole::missiles_spawned).sum();
        total.saturating_sub(used)
    }

    pub fn should_spawn_new_wormhole(&self) -> bool {
        if self.wormholes.len() as u32 >= self.max_wormholes() {
            return false;
        }
        let remaining = self.max_missiles().saturating_sub(self.missiles_spawned);
        remaining > self.available_capacity()
    }

    /// Advance wormholes one tick: spawn, emit, expire
    pub fn update_wormholes(
        &mut self,
        bounds_w: i32,
        bounds_h: i32,
        rng: &mut dyn RandomSource,
    ) -> Result<(), SimError> {
        validate_bounds(bounds_w, bounds_h)?;

        self.spawn_timer += 1;
        if self.spawn_timer > WORMHOLE_SPAWN_INTERVAL && self.should_spawn_new_wormhole() {
            // Both margins inclusive
            let x = rng.next_int(DEFAULT_SIZE, bounds_w - DEFAULT_SIZE + 1);
            let y = rng.next_int(DEFAULT_SIZE, bounds_h - DEFAULT_SIZE + 1);
            log::debug!("Level {}: wormhole opened at ({}, {})", self.number, x, y);
            self.add_wormhole(Wormhole::new(x, y));
            self.spawn_timer = 0;
        }

        // Reverse index walk so removal never skips a neighbor
        for i in (0..self.wormholes.len()).rev() {
            let wormhole = &mut self.wormholes[i];
            wormhole.update();
            if wormhole.should_expire() {
                wormhole.start_expiring();
            }

            // Poll first: the wormhole counts the emission even when the
            // level quota swallows it, which lets it run out and expire.
            if wormhole.should_spawn_missile() && self.missiles_spawned < max_missiles(self.number)
            {
                let angle = rng.next_double() * std::f64::consts::TAU;
                let (x, y) = (wormhole.x, wormhole.y);
                self.missiles
                    .push(Missile::from_angle(x, y, angle, MISSILE_SPEED));
                self.missiles_spawned += 1;
            }

            if self.wormholes[i].is_expired() {
                let gone = self.wormholes.remove(i);
                log::debug!(
                    "Level {}: wormhole at ({}, {}) closed",
                    self.number,
                    gone.x,
                    gone.y
                );
            }
        }

        Ok(())
    }

    /// Advance missiles one tick, returning how many expired
    pub fn update_missiles(&mut self, bounds_w: i32, bounds_h: i32) -> Result<u32, SimError> {
        validate_bounds(bounds_w, bounds_h)?;

        let mut expired = 0;
        for i in (0..self.missiles.len()).rev() {
            self.missiles[i].update(bounds_w, bounds_h);
            if self.missiles[i].is_expired() {
                self.missiles.remove(i);
                expired += 1;
            }
        }
        Ok(expired)
    }

    /// Quota fully emitted and every missile has run its course
    pub fn is_level_complete(&self) -> bool {
        self.missiles_spawned >= self.max_missiles() && self.missiles.is_empty()
    }

    pub fn reset(&mut self) {
        self.wormholes.clear();
        self.missiles.clear();
        self.spawn_timer = 0;
        self.wormholes_spawned = 0;
        self.missiles_spawned = 0;
    }
}
