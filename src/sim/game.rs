//! Per-tick game orchestration
//!
//! [`Simulation::update`] is called once per fixed tick by the embedding
//! driver. The order of steps inside it is load-bearing: death timing and
//! scoring both depend on it.

use super::collision::{danger_multiplier, take_colliding_missile};
use super::level::Level;
use super::missile::Missile;
use super::player::Player;
use super::rng::RandomSource;
use crate::audio::{AudioSink, DEATH_SFX};
use crate::consts::*;
use crate::error::{CollaboratorError, SimError, validate_bounds};
use crate::settings::SettingsProvider;
use crate::stats::StatsRecorder;

/// Log and drop a collaborator failure
fn best_effort(what: &str, result: Result<(), CollaboratorError>) {
    if let Err(e) = result {
        log::warn!("{} failed: {}", what, e);
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub hit: bool,
    pub died: bool,
    pub level_advanced: bool,
    pub points: u32,
}

/// One play session: the player, the current level, and the score
pub struct Simulation {
    start_level: u32,
    player: Option<Player>,
    level: Option<Level>,
    score: u64,
    running: bool,
    level_timer: u64,
    hud_visible: bool,
    rng: Box<dyn RandomSource>,
    settings: Box<dyn SettingsProvider>,
    audio: Box<dyn AudioSink>,
    stats: Option<Box<dyn StatsRecorder>>,
}

impl Simulation {
    /// Create an uninitialized session; call [`Simulation::initialize_game`]
    /// before the first update.
    pub fn new(
        start_level: u32,
        rng: Box<dyn RandomSource>,
        settings: Box<dyn SettingsProvider>,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self, SimError> {
        if start_level == 0 {
            return Err(SimError::InvalidLevel { level: start_level });
        }
        Ok(Self {
            start_level,
            player: None,
            level: None,
            score: 0,
            running: false,
            level_timer: 0,
            hud_visible: true,
            rng,
            settings,
            audio,
            stats: None,
        })
    }

    /// Attach a telemetry recorder
    pub fn with_stats(mut self, stats: Box<dyn StatsRecorder>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Start (or restart) the session with a fresh player and level
    pub fn initialize_game(&mut self) -> Result<(), SimError> {
        let (width, height) = self.bounds()?;
        self.player = Some(Player::new(width / 2, height / 2));
        self.level = Some(Level::new(self.start_level)?);
        self.score = 0;
        self.level_timer = 0;
        self.running = true;
        log::info!(
            "Game started on level {} ({}x{})",
            self.start_level,
            width,
            height
        );
        let start = self.start_level;
        self.record("level stats", |s| s.record_level_reached(start));
        Ok(())
    }

    /// Clear the running flag; later updates do nothing
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Current playfield size, validated
    fn bounds(&self) -> Result<(i32, i32), SimError> {
        let (width, height) = self.settings.world_size();
        validate_bounds(width, height)?;
        Ok((width, height))
    }

    fn record(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut dyn StatsRecorder) -> Result<(), CollaboratorError>,
    ) {
        if let Some(stats) = self.stats.as_deref_mut() {
            best_effort(what, f(stats));
        }
    }

    pub fn move_player(&mut self, dx: i32, dy: i32) -> Result<(), SimError> {
        let (width, height) = self.bounds()?;
        let player = self.player.as_mut().ok_or(SimError::NotInitialized)?;
        player.move_by(dx, dy, width, height);
        Ok(())
    }

    /// Advance the session by one tick
    pub fn update(&mut self) -> Result<TickReport, SimError> {
        let mut report = TickReport::default();
        if self.player.is_none() || self.level.is_none() {
            return Err(SimError::NotInitialized);
        }
        if !self.running {
            return Ok(report);
        }
        let (width, height) = self.bounds()?;

        // Missiles keep moving after death so the explosion plays out
        let expired = self.level_mut()?.update_missiles(width, height)?;

        if self.player()?.is_dead() {
            return Ok(report);
        }
        if expired > 0 {
            self.record("avoided stats", |s| s.record_missiles_avoided(expired));
        }

        let level = self.level.as_mut().ok_or(SimError::NotInitialized)?;
        level.update_wormholes(width, height, &mut *self.rng)?;

        let player = self.player.as_mut().ok_or(SimError::NotInitialized)?;
        if take_colliding_missile(player, level.missiles_mut()).is_some() {
            player.take_damage(HIT_DAMAGE);
            report.hit = true;
            log::debug!("Player hit, health {}", player.health());
            self.record("hit stats", |s| s.record_hit());

            if self.player()?.is_dead() {
                self.on_player_death()?;
                report.died = true;
            }
        }

        if self.level()?.is_level_complete() {
            self.advance_level()?;
            report.level_advanced = true;
        }

        let multiplier = self.danger_multiplier()?;
        self.record("danger stats", |s| s.record_danger(multiplier));
        if self.hud_visible {
            self.record("survival stats", |s| s.record_survival_tick());
        }

        if self.level_timer % SCORE_INTERVAL_TICKS == 0 {
            self.score += multiplier as u64;
            report.points = multiplier;
        }
        self.level_timer += 1;

        Ok(report)
    }

    /// Explosion burst, death sound, telemetry
    fn on_player_death(&mut self) -> Result<(), SimError> {
        let (x, y) = {
            let player = self.player()?;
            (player.x, player.y)
        };
        let level = self.level.as_mut().ok_or(SimError::NotInitialized)?;
        for _ in 0..EXPLOSION_MISSILES {
            let angle = self.rng.next_double() * std::f64::consts::TAU;
            let speed = EXPLOSION_MIN_SPEED
                + self.rng.next_double() * (EXPLOSION_MAX_SPEED - EXPLOSION_MIN_SPEED);
            level.add_missile(Missile::from_angle(x, y, angle, speed));
        }
        log::debug!("Explosion burst of {} at ({}, {})", EXPLOSION_MISSILES, x, y);

        best_effort("death sfx", self.audio.play_sfx(DEATH_SFX));

        let (score, number) = (self.score, self.level_number()?);
        log::info!("Player died on level {} with score {}", number, score);
        self.record("death stats", |s| s.record_death(score, number));
        Ok(())
    }

    fn advance_level(&mut self) -> Result<(), SimError> {
        let level = self.level_mut()?;
        let next = level.number() + 1;
        level.reset();
        self.level = Some(Level::new(next)?);
        self.level_timer = 0;
        log::info!("Advanced to level {}", next);
        self.record("level stats", |s| s.record_level_reached(next));
        Ok(())
    }

    pub fn player(&self) -> Result<&Player, SimError> {
        self.player.as_ref().ok_or(SimError::NotInitialized)
    }

    /// Direct player access for repositioning
    pub fn player_mut(&mut self) -> Result<&mut Player, SimError> {
        self.player.as_mut().ok_or(SimError::NotInitialized)
    }

    pub fn level(&self) -> Result<&Level, SimError> {
        self.level.as_ref().ok_or(SimError::NotInitialized)
    }

    /// Direct level access for scripted setups
    pub fn level_mut(&mut self) -> Result<&mut Level, SimError> {
        self.level.as_mut().ok_or(SimError::NotInitialized)
    }

    pub fn level_number(&self) -> Result<u32, SimError> {
        Ok(self.level()?.number())
    }

    /// Current score multiplier from missiles near the player
    pub fn danger_multiplier(&self) -> Result<u32, SimError> {
        Ok(danger_multiplier(self.player()?, self.level()?.missiles()))
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level_timer(&self) -> u64 {
        self.level_timer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_initialized(&self) -> bool {
        self.player.is_some() && self.level.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.player.as_ref().is_some_and(Player::is_dead)
    }

    pub fn hud_visible(&self) -> bool {
        self.hud_visible
    }

    /// Survival ticks only count toward stats while the HUD is shown
    pub fn set_hud_visible(&mut self, visible: bool) {
        self.hud_visible = visible;
    }
}
