//! Wall-reflecting projectiles with a bounce-limited lifetime

use glam::DVec2;

use crate::velocity_from_angle;

/// Bounces before a missile expires
pub const MAX_BOUNCES: u32 = 8;
/// Default missile side length
pub const MISSILE_SIZE: i32 = 15;
/// Default speed (units per tick) when velocity comes from an angle
pub const MISSILE_SPEED: f64 = 6.0;

/// A projectile
///
/// Motion is integrated in double precision; `x`/`y` are the truncated
/// positions used for rendering and collision.
#[derive(Debug, Clone, PartialEq)]
pub struct Missile {
    pub x: i32,
    pub y: i32,
    pub size: i32,
    pos: DVec2,
    vel: DVec2,
    bounces: u32,
}

impl Missile {
    pub fn new(x: i32, y: i32, vel: DVec2) -> Self {
        Self::with_size(x, y, MISSILE_SIZE, vel)
    }

    pub fn with_size(x: i32, y: i32, size: i32, vel: DVec2) -> Self {
        Self {
            x,
            y,
            size,
            pos: DVec2::new(x as f64, y as f64),
            vel,
            bounces: 0,
        }
    }

    /// Missile heading along `angle` (radians) at `speed`
    pub fn from_angle(x: i32, y: i32, angle: f64, speed: f64) -> Self {
        Self::new(x, y, velocity_from_angle(angle, speed))
    }

    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    /// Advance one tick, reflecting off the playfield edges
    ///
    /// Axes are checked independently, so a corner hit counts as two bounces.
    pub fn update(&mut self, bounds_w: i32, bounds_h: i32) {
        self.pos += self.vel;

        let half = (self.size / 2) as f64;
        let max = DVec2::new(bounds_w as f64 - half, bounds_h as f64 - half);

        if hits_wall(self.pos.x, self.vel.x, half, max.x) {
            self.vel.x = -self.vel.x;
            self.bounces += 1;
        }
        if hits_wall(self.pos.y, self.vel.y, half, max.y) {
            self.vel.y = -self.vel.y;
            self.bounces += 1;
        }

        self.pos.x = self.pos.x.clamp(half, max.x.max(half));
        self.pos.y = self.pos.y.clamp(half, max.y.max(half));
        self.x = self.pos.x as i32;
        self.y = self.pos.y as i32;
    }

    pub fn is_expired(&self) -> bool {
        self.bounces >= MAX_BOUNCES
    }
}

/// At or past an edge while still heading into it
fn hits_wall(pos: f64, vel: f64, min: f64, max: f64) -> bool {
    (pos <= min && vel < 0.0) || (pos >= max && vel > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_moves_by_velocity() {
        let mut m = Missile::new(100, 100, DVec2::new(2.5, -1.5));
        m.update(800, 600);
        assert_eq!(m.position(), DVec2::new(102.5, 98.5));
        assert_eq!((m.x, m.y), (102, 98));
        assert_eq!(m.bounces(), 0);
    }

    #[test]
    fn test_reflects_at_right_wall() {
        let mut m = Missile::new(790, 300, DVec2::new(6.0, 0.0));
        m.update(800, 600);
        assert_eq!(m.bounces(), 1);
        assert_eq!(m.velocity().x, -6.0);
        // Clamped to bound - half size (15 / 2 = 7)
        assert_eq!(m.x, 793);
    }

    #[test]
    fn test_reflects_at_top_wall() {
        let mut m = Missile::new(300, 10, DVec2::new(0.0, -6.0));
        m.update(800, 600);
        assert_eq!(m.bounces(), 1);
        assert_eq!(m.velocity().y, 6.0);
        assert_eq!(m.y, 7);
    }

    #[test]
    fn test_corner_hit_counts_twice() {
        let mut m = Missile::new(10, 10, DVec2::new(-6.0, -6.0));
        m.update(800, 600);
        assert_eq!(m.bounces(), 2);
        assert_eq!(m.velocity(), DVec2::new(6.0, 6.0));
    }

    #[test]
    fn test_expires_exactly_at_max_bounces() {
        // Narrow corridor: bounces every few ticks on the x axis only
        let mut m = Missile::new(50, 50, DVec2::new(20.0, 0.0));
        let mut last = 0;
        while !m.is_expired() {
            m.update(100, 100);
            assert!(m.bounces() >= last);
            assert!(m.bounces() <= MAX_BOUNCES);
            if m.bounces() < MAX_BOUNCES {
                assert!(!m.is_expired());
            }
            last = m.bounces();
        }
        assert_eq!(m.bounces(), MAX_BOUNCES);
    }

    #[test]
    fn test_from_angle_uses_speed() {
        let m = Missile::from_angle(0, 0, 0.0, MISSILE_SPEED);
        assert!((m.velocity().x - MISSILE_SPEED).abs() < 1e-9);
        assert!(m.velocity().y.abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_zero_velocity_never_bounces(x in 8i32..792, y in 8i32..592, ticks in 1usize..500) {
            let mut m = Missile::new(x, y, DVec2::ZERO);
            for _ in 0..ticks {
                m.update(800, 600);
            }
            prop_assert_eq!(m.bounces(), 0);
            prop_assert!(!m.is_expired());
            prop_assert_eq!((m.x, m.y), (x, y));
        }

        #[test]
        fn prop_stays_in_bounds(
            x in 8i32..792,
            y in 8i32..592,
            vx in -12.0f64..12.0,
            vy in -12.0f64..12.0,
        ) {
            let mut m = Missile::new(x, y, DVec2::new(vx, vy));
            let mut prev = 0;
            for _ in 0..300 {
                m.update(800, 600);
                prop_assert!(m.x >= 7 && m.x <= 793);
                prop_assert!(m.y >= 7 && m.y <= 593);
                prop_assert!(m.bounces() >= prev);
                prev = m.bounces();
            }
        }
    }
}
