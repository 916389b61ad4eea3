//! Error types
//!
//! Simulation invariants are validated strictly and surface as [`SimError`].
//! Collaborators (audio, stats, persistence) report [`CollaboratorError`],
//! which the simulation logs and drops.

use thiserror::Error;

/// Rejected simulation calls
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Level numbers start at 1
    #[error("level number must be positive, got {level}")]
    InvalidLevel { level: u32 },
    /// Playfield dimensions must both be positive
    #[error("playfield bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: i32, height: i32 },
    /// `initialize_game` has not been called yet
    #[error("simulation has not been initialized")]
    NotInitialized,
}

/// Failure reported by an I/O collaborator
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("audio playback failed: {0}")]
    Audio(String),
    #[error("stats recording failed: {0}")]
    Stats(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Reject non-positive playfield dimensions
pub fn validate_bounds(width: i32, height: i32) -> Result<(), SimError> {
    if width <= 0 || height <= 0 {
        return Err(SimError::InvalidBounds { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(800, 600).is_ok());
        assert_eq!(
            validate_bounds(0, 600),
            Err(SimError::InvalidBounds {
                width: 0,
                height: 600
            })
        );
        assert!(validate_bounds(800, -1).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SimError::InvalidLevel { level: 0 }.to_string(),
            "level number must be positive, got 0"
        );
        let err = CollaboratorError::Audio("device lost".into());
        assert_eq!(err.to_string(), "audio playback failed: device lost");
    }
}
