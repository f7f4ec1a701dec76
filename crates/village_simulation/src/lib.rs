//! Village Simulation Core
//!
//! ECS-симуляция жителей деревни на Bevy 0.16 (headless)
//!
//! Архитектура:
//! - world: статические препятствия + walk area (read-only)
//! - movement: target sampler + motion integrator (pure функции)
//! - simulation_loop: Idle → Running → Stopped, тик каждый кадр
//! - snapshot: то, что читает рендер (id, position, heading, frame)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod logger;
pub mod movement;
pub mod simulation_loop;
pub mod snapshot;
pub mod spawn;
pub mod world;

// Re-export для удобства
pub use components::*;
pub use config::{ConfigError, SpeedRange, VillageConfig};
pub use movement::{advance_citizen, sample_valid_target, MotionContext, StepOutcome};
pub use simulation_loop::{
    cancel_simulation, start_simulation, SimulationLoopPlugin, SimulationState, SimulationTick, TickStats,
};
pub use snapshot::{CitizenSnapshot, VillageSnapshot, SPRITE_COLUMNS, SPRITE_ROWS};
pub use spawn::spawn_citizens;
pub use world::{Obstacle, ObstacleKind, ObstacleMap, PanelId, WalkArea};

/// Главный plugin симуляции
///
/// VillageConfig можно вставить ДО plugin'а — тогда он не перезаписывается.
/// Невалидный config заменяется defaults (кроме seed).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VillageConfig>()
            .register_type::<Citizen>()
            .register_type::<VillageConfig>();

        let config = app.world().resource::<VillageConfig>();
        let (validation, seed) = (config.validate(), config.seed);
        if let Err(error) = validation {
            // seed сохраняем: повторный запуск с тем же файлом воспроизводим
            logger::log_error(&format!("Invalid village config ({}), using defaults", error));
            app.insert_resource(VillageConfig { seed, ..default() });
        }

        if !app.world().contains_resource::<VillageRng>() {
            let rng = match app.world().resource::<VillageConfig>().seed {
                Some(seed) => VillageRng::new(seed),
                None => VillageRng::from_entropy(),
            };
            app.insert_resource(rng);
        }

        app.add_plugins(SimulationLoopPlugin);
    }
}

/// RNG resource симуляции
///
/// Seed хранится для логов; воспроизводимость нужна только тестам.
#[derive(Resource)]
pub struct VillageRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl VillageRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Тик = `app.update()` (без рендера нет display refresh).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
        .insert_resource(VillageRng::new(seed));

    app
}
