//! Collision detection and proximity scoring
//!
//! Everything is an axis-aligned square centered on its integer position.

use super::missile::Missile;
use super::player::Player;
use crate::consts::{
    CLOSE_DISTANCE, CLOSE_WEIGHT, MAX_DANGER_MULTIPLIER, NEAR_MISS_DISTANCE, NEAR_MISS_WEIGHT,
};

/// Overlap test for two centered squares
#[inline]
pub fn aabb_overlap(ax: i32, ay: i32, a_size: i32, bx: i32, by: i32, b_size: i32) -> bool {
    let reach = a_size + b_size;
    (ax - bx).abs() * 2 < reach && (ay - by).abs() * 2 < reach
}

pub fn player_hits_missile(player: &Player, missile: &Missile) -> bool {
    aabb_overlap(
        player.x,
        player.y,
        player.size,
        missile.x,
        missile.y,
        missile.size,
    )
}

/// Consume the first missile (scanning from the back) touching the player
///
/// At most one missile is removed per call.
pub fn take_colliding_missile(player: &Player, missiles: &mut Vec<Missile>) -> Option<Missile> {
    let hit = (0..missiles.len())
        .rev()
        .find(|&i| player_hits_missile(player, &missiles[i]))?;
    Some(missiles.remove(hit))
}

/// Proximity weight of a single missile
fn danger_weight(player: &Player, missile: &Missile) -> u32 {
    let dx = (missile.x - player.x) as f64;
    let dy = (missile.y - player.y) as f64;
    let dist = dx.hypot(dy);
    if dist <= NEAR_MISS_DISTANCE {
        NEAR_MISS_WEIGHT
    } else if dist <= CLOSE_DISTANCE {
        CLOSE_WEIGHT
    } else {
        0
    }
}

/// Score multiplier from nearby missiles, in `1..=MAX_DANGER_MULTIPLIER`
pub fn danger_multiplier(player: &Player, missiles: &[Missile]) -> u32 {
    let weight: u32 = missiles.iter().map(|m| danger_weight(player, m)).sum();
    (1 + weight).min(MAX_DANGER_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use proptest::prelude::*;

    fn missile_at(x: i32, y: i32) -> Missile {
        Missile::new(x, y, DVec2::ZERO)
    }

    #[test]
    fn test_aabb_overlap() {
        assert!(aabb_overlap(100, 100, 20, 100, 100, 15));
        // Edges 17 apart with half-sizes 10 + 7.5
        assert!(aabb_overlap(100, 100, 20, 117, 100, 15));
        assert!(!aabb_overlap(100, 100, 20, 118, 100, 15));
        assert!(!aabb_overlap(100, 100, 20, 100, 130, 15));
    }

    #[test]
    fn test_take_colliding_missile_removes_one() {
        let player = Player::new(300, 300);
        let mut missiles = vec![missile_at(300, 300), missile_at(700, 100), missile_at(302, 298)];
        let hit = take_colliding_missile(&player, &mut missiles);
        // Last overlapping missile goes first
        assert_eq!(hit.map(|m| (m.x, m.y)), Some((302, 298)));
        assert_eq!(missiles.len(), 2);

        assert!(take_colliding_missile(&player, &mut missiles).is_some());
        assert_eq!(missiles.len(), 1);
        assert!(take_colliding_missile(&player, &mut missiles).is_none());
        assert_eq!(missiles.len(), 1);
    }

    #[test]
    fn test_danger_baseline_is_one() {
        let player = Player::new(400, 300);
        assert_eq!(danger_multiplier(&player, &[]), 1);
        assert_eq!(danger_multiplier(&player, &[missile_at(10, 10)]), 1);
    }

    #[test]
    fn test_danger_weights() {
        let player = Player::new(400, 300);
        assert_eq!(danger_multiplier(&player, &[missile_at(450, 300)]), 4);
        assert_eq!(danger_multiplier(&player, &[missile_at(400, 400)]), 2);
        assert_eq!(
            danger_multiplier(&player, &[missile_at(450, 300), missile_at(400, 400)]),
            5
        );
    }

    proptest! {
        #[test]
        fn prop_danger_capped(count in 0usize..200) {
            let player = Player::new(400, 300);
            let missiles: Vec<_> = (0..count).map(|_| missile_at(405, 300)).collect();
            let m = danger_multiplier(&player, &missiles);
            prop_assert!((1..=MAX_DANGER_MULTIPLIER).contains(&m));
            if count >= 3 {
                prop_assert_eq!(m, MAX_DANGER_MULTIPLIER);
            }
        }
    }
}
