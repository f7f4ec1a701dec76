//! Spawn пула агентов (один раз при старте симуляции)

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Citizen, Heading};
use crate::config::VillageConfig;
use crate::logger;
use crate::movement::MotionContext;
use crate::VillageRng;

/// Создаёт `citizen_count` агентов с id 0..N-1 (порядок spawn = id)
///
/// position и destination выбираются независимо (могут совпасть —
/// тогда первый тик просто выберет новую цель).
pub fn spawn_citizens<R: Rng + ?Sized>(config: &VillageConfig, rng: &mut R) -> Vec<Citizen> {
    let context = MotionContext::from_config(config);
    let speed = config.speed_range;
    let frames = config.animation_frames.max(1);

    (0..config.citizen_count)
        .map(|id| {
            let position = context.sample_target(rng);
            let destination = context.sample_target(rng);
            Citizen {
                id,
                position,
                destination,
                heading: Heading::Down,
                speed: rng.gen_range(speed.min..=speed.max),
                animation_frame: rng.gen_range(0..frames),
                frame_timer: 0,
            }
        })
        .collect()
}

/// Система: spawn деревни при входе в Running
///
/// Пул создаётся ровно один раз: повторный вход в Running ничего не добавляет.
pub fn spawn_village(
    mut commands: Commands,
    existing: Query<(), With<Citizen>>,
    config: Res<VillageConfig>,
    mut rng: ResMut<VillageRng>,
) {
    if !existing.is_empty() {
        return;
    }

    let citizens = spawn_citizens(&config, &mut rng.rng);
    logger::log_info(&format!(
        "Spawned {} citizens (seed: {})",
        citizens.len(),
        rng.seed
    ));

    commands.spawn_batch(citizens);
}
