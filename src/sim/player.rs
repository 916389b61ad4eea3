//! The player avatar

use crate::consts::{MAX_HEALTH, PLAYER_SIZE};

/// Player-controlled square, positioned by its center
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// Side length (diameter for rendering)
    pub size: i32,
    health: i32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            size: PLAYER_SIZE,
            health: MAX_HEALTH,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Move by a delta, keeping the whole body inside the playfield
    pub fn move_by(&mut self, dx: i32, dy: i32, bounds_w: i32, bounds_h: i32) {
        let half = self.size / 2;
        self.x = clamp_axis(self.x + dx, half, bounds_w - half);
        self.y = clamp_axis(self.y + dy, half, bounds_h - half);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

/// Clamp that tolerates a playfield narrower than the body
fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut player = Player::new(400, 300);
        player.move_by(-1000, 0, 800, 600);
        assert_eq!(player.x, PLAYER_SIZE / 2);
        player.move_by(5000, 5000, 800, 600);
        assert_eq!(player.x, 800 - PLAYER_SIZE / 2);
        assert_eq!(player.y, 600 - PLAYER_SIZE / 2);
    }

    #[test]
    fn test_move_within_bounds() {
        let mut player = Player::new(400, 300);
        player.move_by(5, -7, 800, 600);
        assert_eq!((player.x, player.y), (405, 293));
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut player = Player::new(0, 0);
        player.take_damage(30);
        assert_eq!(player.health(), MAX_HEALTH - 30);
        assert!(!player.is_dead());
        player.take_damage(MAX_HEALTH);
        assert_eq!(player.health(), 0);
        assert!(player.is_dead());
        player.take_damage(10);
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn test_set_position_is_unconditional() {
        let mut player = Player::new(10, 10);
        player.set_position(-50, 9000);
        assert_eq!((player.x, player.y), (-50, 9000));
    }
}
