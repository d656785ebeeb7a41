//! Obstacle pool: spawns, advances, scores and retires obstacle entities

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::Rect;

/// The two obstacle categories. The class picks the sprite, the hitbox
/// height and the score reward range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightClass {
    Short,
    Tall,
}

impl HeightClass {
    /// Hitbox height in pixels
    pub fn height(&self) -> f32 {
        match self {
            HeightClass::Short => 30.0,
            HeightClass::Tall => 45.0,
        }
    }

    /// Uniform pick between the two classes
    pub fn sample(rng: &mut Pcg32) -> Self {
        if rng.random_bool(0.5) {
            HeightClass::Short
        } else {
            HeightClass::Tall
        }
    }

    /// Points awarded for passing an obstacle of this class
    pub fn sample_reward(&self, rng: &mut Pcg32, tuning: &Tuning) -> u32 {
        match self {
            HeightClass::Short => {
                rng.random_range(tuning.short_reward_min..=tuning.short_reward_max)
            }
            HeightClass::Tall => rng.random_range(tuning.tall_reward_min..=tuning.tall_reward_max),
        }
    }
}

/// An obstacle entity. Y is implied: the bottom edge always sits on the
/// ground line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub class: HeightClass,
    /// Latched once the player has passed this obstacle and been rewarded
    pub scored: bool,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        let h = self.class.height();
        Rect::new(self.x, GROUND_Y - h, OBSTACLE_WIDTH, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }
}

/// Owns all live obstacles. Iteration order is spawn order (ids ascend), so
/// scoring and collision are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePool {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Spawn a new obstacle at the right edge of the field.
    pub fn spawn(&mut self, rng: &mut Pcg32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: FIELD_WIDTH,
            class: HeightClass::sample(rng),
            scored: false,
        });
        id
    }

    /// Scroll everything left by the integer-truncated speed.
    pub fn advance(&mut self, speed: f32) {
        let step = speed.trunc();
        for obs in &mut self.obstacles {
            obs.x -= step;
        }
    }

    /// Award points for obstacles the player has just passed. Each obstacle
    /// pays out exactly once: the `scored` latch survives until the obstacle
    /// is reaped.
    pub fn score_passes(&mut self, player_left: f32, rng: &mut Pcg32, tuning: &Tuning) -> u32 {
        let mut points = 0;
        for obs in &mut self.obstacles {
            if !obs.scored && obs.right() < player_left {
                points += obs.class.sample_reward(rng, tuning);
                obs.scored = true;
            }
        }
        points
    }

    /// Drop obstacles that have fully left the field on the left.
    pub fn reap_offscreen(&mut self) {
        self.obstacles.retain(|obs| obs.right() > 0.0);
    }

    /// Insert a crafted obstacle from a unit test.
    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, obstacle: Obstacle) {
        self.next_id = self.next_id.max(obstacle.id + 1);
        self.obstacles.push(obstacle);
    }

    /// True if any live obstacle overlaps the player's hitbox.
    pub fn collides(&self, player_rect: &Rect) -> bool {
        self.obstacles
            .iter()
            .any(|obs| obs.rect().intersects(player_rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_spawn_places_at_right_edge_on_ground() {
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        pool.spawn(&mut rng);
        let obs = pool.iter().next().unwrap();
        assert_eq!(obs.x, FIELD_WIDTH);
        assert_eq!(obs.rect().bottom(), GROUND_Y);
    }

    #[test]
    fn test_advance_uses_truncated_speed() {
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        pool.spawn(&mut rng);
        pool.advance(5.9);
        assert_eq!(pool.iter().next().unwrap().x, FIELD_WIDTH - 5.0);
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let tuning = Tuning::default();
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        pool.spawn(&mut rng);
        let player_left = 50.0;

        // Not yet past the player: no points
        assert_eq!(pool.score_passes(player_left, &mut rng, &tuning), 0);

        // Teleport the obstacle past the player
        pool.obstacles[0].x = player_left - OBSTACLE_WIDTH - 1.0;
        let first = pool.score_passes(player_left, &mut rng, &tuning);
        assert!(first >= tuning.short_reward_min && first <= tuning.tall_reward_max);
        assert!(pool.obstacles[0].scored);

        // Second sweep must not pay again
        assert_eq!(pool.score_passes(player_left, &mut rng, &tuning), 0);
    }

    #[test]
    fn test_reward_matches_class_range() {
        let tuning = Tuning::default();
        let mut rng = rng();
        for _ in 0..100 {
            let short = HeightClass::Short.sample_reward(&mut rng, &tuning);
            assert!((tuning.short_reward_min..=tuning.short_reward_max).contains(&short));
            let tall = HeightClass::Tall.sample_reward(&mut rng, &tuning);
            assert!((tuning.tall_reward_min..=tuning.tall_reward_max).contains(&tall));
        }
    }

    #[test]
    fn test_reap_offscreen() {
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        pool.spawn(&mut rng);
        pool.spawn(&mut rng);
        pool.obstacles[0].x = -OBSTACLE_WIDTH - 1.0; // fully off the left edge
        pool.reap_offscreen();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.iter().next().unwrap().id, 1);
    }

    #[test]
    fn test_collides_with_player_box() {
        let mut pool = ObstaclePool::new();
        let mut rng = rng();
        pool.spawn(&mut rng);

        let mut player = Rect::new(PLAYER_X, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        player.set_bottom(GROUND_Y);

        assert!(!pool.collides(&player));
        pool.obstacles[0].x = PLAYER_X + 5.0;
        assert!(pool.collides(&player));
    }
}
