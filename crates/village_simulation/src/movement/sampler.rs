//! Target sampler: rejection sampling точки вне препятствий

use bevy::prelude::*;
use rand::Rng;

use crate::logger;
use crate::world::{ObstacleMap, WalkArea};

/// Случайная целочисленная точка в `area`, не попадающая в padded препятствия
///
/// Не больше `retries` попыток. Если бюджет исчерпан — возвращаем последнюю
/// точку, даже заблокированную: агент получит новую цель на следующем
/// заблокированном шаге (redirect в integrator'е).
pub fn sample_valid_target<R: Rng + ?Sized>(
    area: &WalkArea,
    obstacles: &ObstacleMap,
    retries: u32,
    rng: &mut R,
) -> Vec2 {
    let budget = retries.max(1);

    let mut point = area.sample_point(rng);
    let mut attempts = 1;
    while obstacles.is_blocked(point) && attempts < budget {
        point = area.sample_point(rng);
        attempts += 1;
    }

    if obstacles.is_blocked(point) {
        logger::log(&format!(
            "target sampler: {} attempts exhausted, keeping blocked point {:?}",
            budget, point
        ));
    }

    point
}
