//! Walkable area — прямоугольник, внутри которого выбираются цели

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned границы `{min_x, max_x, min_y, max_y}` (включительно, целые)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub struct WalkArea {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for WalkArea {
    fn default() -> Self {
        // Полоса между домами и южной дорогой
        Self {
            min_x: 50,
            max_x: 900,
            min_y: 450,
            max_y: 750,
        }
    }
}

impl WalkArea {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Равномерная целочисленная точка внутри области
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.gen_range(self.min_x..=self.max_x);
        let y = rng.gen_range(self.min_y..=self.max_y);
        Vec2::new(x as f32, y as f32)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x as f32
            && point.x <= self.max_x as f32
            && point.y >= self.min_y as f32
            && point.y <= self.max_y as f32
    }

    pub fn is_well_formed(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }
}
