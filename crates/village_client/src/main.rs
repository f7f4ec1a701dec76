use bevy::prelude::*;
use village_simulation::{logger, SimulationPlugin, VillageConfig};

mod camera;
mod panels;
mod rendering;

use camera::{CameraPlugin, SCENE_HEIGHT, SCENE_WIDTH};
use panels::PanelPlugin;
use rendering::RenderingSyncPlugin;

const DEFAULT_CONFIG_PATH: &str = "village.toml";

fn main() {
    logger::init_logger();
    let config = load_config();

    App::new()
        // Bevy defaults (rendering, input, time, states, etc.)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "My Village".to_string(),
                        resolution: (SCENE_WIDTH, SCENE_HEIGHT).into(),
                        ..default()
                    }),
                    ..default()
                })
                // Pixel art без сглаживания
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(ClearColor(Color::srgb(0.18, 0.35, 0.18)))
        // Config ДО SimulationPlugin: plugin его не перезапишет
        .insert_resource(config)
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Rendering sync (snapshot → sprites)
        .add_plugins(RenderingSyncPlugin)
        .add_plugins(CameraPlugin)
        // Building clicks → PanelRequested
        .add_plugins(PanelPlugin)
        .run();
}

/// village.toml (или путь из VILLAGE_CONFIG); нет файла или ошибка → defaults
fn load_config() -> VillageConfig {
    let explicit = std::env::var("VILLAGE_CONFIG").ok();
    let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    if explicit.is_none() && !std::path::Path::new(&path).exists() {
        return VillageConfig::default();
    }

    match VillageConfig::load(&path) {
        Ok(config) => {
            logger::log_info(&format!("Loaded village config from {}", path));
            config
        }
        Err(error) => {
            logger::log_error(&format!("Config {}: {}, using defaults", path, error));
            VillageConfig::default()
        }
    }
}
