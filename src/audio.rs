//! Audio boundary
//!
//! The simulation never plays sound itself. It names an event and hands it
//! to an [`AudioSink`]; playback failures are the sink's problem.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::CollaboratorError;

/// Played when the player dies
pub const DEATH_SFX: &str = "death.mp3";

/// Sound effect playback capability
pub trait AudioSink {
    fn play_sfx(&mut self, name: &str) -> Result<(), CollaboratorError>;
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_sfx(&mut self, _name: &str) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Records event names into a shared log
///
/// Clones share the same log, so a caller can keep one handle and give the
/// other to the simulation. Nothing is recorded at zero volume.
#[derive(Debug, Clone)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<String>>>,
    volume: f32,
}

impl Default for RecordingAudio {
    fn default() -> Self {
        Self {
            played: Rc::default(),
            volume: 1.0,
        }
    }
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Playback volume (0.0 - 1.0), usually `Settings::effective_sfx_volume`
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Events played so far, oldest first
    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.played.borrow().iter().filter(|n| *n == name).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play_sfx(&mut self, name: &str) -> Result<(), CollaboratorError> {
        if self.volume <= 0.0 {
            log::debug!("sfx muted: {}", name);
            return Ok(());
        }
        log::debug!("sfx: {} at {:.2}", name, self.volume);
        self.played.borrow_mut().push(name.to_string());
        Ok(())
    }
}
