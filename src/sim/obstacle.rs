//! A scrolling barrier pair with a passable gap

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::geometry::Rect;

/// Artwork for one barrier half (presentation hint, no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrierSprite {
    Asteroid,
    Bug,
    Error,
}

impl BarrierSprite {
    pub const ALL: [Self; 3] = [Self::Asteroid, Self::Bug, Self::Error];

    /// Pick a sprite from the obstacle id so gameplay RNG draws stay at one per obstacle
    fn for_slot(id: u32, slot: u32) -> Self {
        let hash = id
            .wrapping_mul(2654435761) // Golden ratio hash
            .wrapping_add(slot.wrapping_mul(7919));
        Self::ALL[((hash >> 16) % Self::ALL.len() as u32) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom edge of the top barrier
    pub gap_top_y: f32,
    pub gap_height: f32,
    screen_height: f32,
    scroll_speed: f32,
    symbol_size: f32,
    /// Set once this obstacle has counted a collision
    pub hit: bool,
    /// Set once this obstacle has counted toward the score
    pub scored: bool,
    pub top_sprite: BarrierSprite,
    pub bottom_sprite: BarrierSprite,
}

impl Obstacle {
    /// Build an obstacle at `x`, drawing the gap offset from `rng`.
    /// `config` must already be validated.
    pub(crate) fn new<R: Rng>(id: u32, x: f32, config: &SimConfig, rng: &mut R) -> Self {
        let (low, high) = config.gap_top_range();
        let gap_top_y = rng.random_range(low..=high);
        Self {
            id,
            x,
            width: config.obstacle_width,
            gap_top_y,
            gap_height: config.gap_height,
            screen_height: config.screen_height,
            scroll_speed: config.scroll_speed,
            symbol_size: config.symbol_size,
            hit: false,
            scored: false,
            top_sprite: BarrierSprite::for_slot(id, 0),
            bottom_sprite: BarrierSprite::for_slot(id, 1),
        }
    }

    /// Scroll one tick to the left
    pub fn advance(&mut self) {
        self.x -= self.scroll_speed;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom_y(&self) -> f32 {
        self.gap_top_y + self.gap_height
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top_y)
    }

    pub fn bottom_rect(&self) -> Rect {
        let y = self.gap_bottom_y();
        Rect::new(self.x, y, self.width, self.screen_height - y)
    }

    /// The open space between the barriers
    pub fn gap_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_top_y, self.width, self.gap_height)
    }

    /// Square centered in the gap, used by the asteroid cluster theme
    pub fn symbol_rect(&self) -> Rect {
        let s = self.symbol_size;
        let c = self.gap_rect().center();
        Rect::new(c.x - s / 2.0, c.y - s / 2.0, s, s)
    }

    /// True if `bounds` touches either barrier
    pub fn collides(&self, bounds: &Rect) -> bool {
        self.top_rect().intersects(bounds) || self.bottom_rect().intersects(bounds)
    }

    /// True once the right edge is strictly left of `actor_x`
    pub fn passed(&self, actor_x: f32) -> bool {
        self.right() < actor_x
    }

    /// True once fully scrolled past the left edge of the screen
    pub fn off_screen(&self) -> bool {
        self.right() < 0.0
    }
}
