//! Obstacle stream: initial spawn, scrolling and 1:1 recycling
//!
//! Obstacles are stored in spawn order. Replacements always enter at the
//! right edge, but on narrow screens the initial layout can extend past it,
//! so spawn order is not guaranteed to be left-to-right.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{ConfigError, ObstacleTheme, SimConfig};
use super::obstacle::Obstacle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleStream {
    pub obstacles: Vec<Obstacle>,
    /// Validated geometry every spawn is built from
    config: SimConfig,
    next_id: u32,
}

impl ObstacleStream {
    /// Populate `max(3, width / spacing)` obstacles, evenly spaced from mid-screen
    pub fn new<R: Rng>(config: &SimConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut stream = Self {
            obstacles: Vec::new(),
            config: config.clone(),
            next_id: 1,
        };
        stream.reset(rng);
        Ok(stream)
    }

    /// Throw away every obstacle and lay out a fresh round, ids from 1
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        let count = self.config.obstacle_count();
        self.obstacles = Vec::with_capacity(count);
        self.next_id = 1;

        let start_x = (self.config.screen_width / 2.0).floor();
        for i in 0..count {
            let x = start_x + i as f32 * self.config.obstacle_spacing;
            self.spawn(x, rng);
        }
    }

    fn spawn<R: Rng>(&mut self, x: f32, rng: &mut R) {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, x, &self.config, rng));
    }

    /// Scroll every obstacle, drop the ones off the left edge and spawn one
    /// replacement at the right edge per drop. Returns the number recycled.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.off_screen());
        let removed = before - self.obstacles.len();

        for _ in 0..removed {
            self.spawn(self.config.screen_width, rng);
        }

        if removed > 0 {
            log::trace!("recycled {} obstacle(s)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn theme(&self) -> ObstacleTheme {
        self.config.theme
    }

    /// Live count once steady state is reached
    pub fn target_count(&self) -> usize {
        self.config.obstacle_count()
    }

    /// Nearest obstacle whose right edge has not yet cleared `x`
    pub fn next_ahead_of(&self, x: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.right() >= x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_initial_layout() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let stream = ObstacleStream::new(&config, &mut rng).expect("valid config");

        assert_eq!(stream.len(), 3);
        let xs: Vec<f32> = stream.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![870.0, 1370.0, 1870.0]);
        let ids: Vec<u32> = stream.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_advance_scrolls_every_obstacle() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");

        let removed = stream.advance(&mut rng);
        assert_eq!(removed, 0);
        let xs: Vec<f32> = stream.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![867.0, 1367.0, 1867.0]);
    }

    #[test]
    fn test_offscreen_obstacle_replaced_at_right_edge() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");
        stream.obstacles[0].x = -config.obstacle_width;

        let removed = stream.advance(&mut rng);
        assert_eq!(removed, 1);
        assert_eq!(stream.len(), 3);

        let newest = stream.obstacles.last().expect("replacement spawned");
        assert_eq!(newest.id, 4);
        assert_eq!(newest.x, config.screen_width);
        assert!(!newest.hit && !newest.scored);
    }

    #[test]
    fn test_simultaneous_removals_each_spawn_once() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");
        stream.obstacles[0].x = -60.0;
        stream.obstacles[1].x = -55.0;

        let removed = stream.advance(&mut rng);
        assert_eq!(removed, 2);
        assert_eq!(stream.len(), 3);
        let ids: Vec<u32> = stream.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[test]
    fn test_count_constant_over_long_run() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");
        let mut recycled = 0;
        for _ in 0..5_000 {
            recycled += stream.advance(&mut rng);
            assert_eq!(stream.len(), stream.target_count());
        }
        assert!(recycled > 0);
    }

    #[test]
    fn test_rejects_unvalidated_config() {
        let mut rng = Pcg32::seed_from_u64(7);
        let config = SimConfig {
            screen_height: 300.0,
            gap_height: 250.0,
            ..Default::default()
        };
        assert!(matches!(
            ObstacleStream::new(&config, &mut rng),
            Err(ConfigError::DegenerateGap { .. })
        ));

        let config = SimConfig {
            obstacle_spacing: 1e-3,
            ..Default::default()
        };
        assert!(matches!(
            ObstacleStream::new(&config, &mut rng),
            Err(ConfigError::TooManyObstacles { .. })
        ));
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");
        for _ in 0..400 {
            stream.advance(&mut rng);
        }
        assert!(stream.obstacles.iter().all(|o| o.id > 1));

        stream.reset(&mut rng);
        let xs: Vec<f32> = stream.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![870.0, 1370.0, 1870.0]);
        let ids: Vec<u32> = stream.obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_next_ahead_of() {
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut stream = ObstacleStream::new(&config, &mut rng).expect("valid config");
        assert_eq!(stream.next_ahead_of(50.0).map(|o| o.id), Some(1));

        stream.obstacles[0].x = -10.0;
        assert_eq!(stream.next_ahead_of(50.0).map(|o| o.id), Some(2));
    }
}
