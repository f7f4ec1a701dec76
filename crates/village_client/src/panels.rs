use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use village_simulation::{logger, PanelId, VillageConfig};

use crate::camera::{world_to_scene, SceneCamera};

/// Event: клик по зданию → открыть панель контента
///
/// Симуляция его не обрабатывает, содержимое панели — забота overlay слоя.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRequested {
    pub panel: PanelId,
}

pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PanelRequested>()
            .add_systems(Update, (request_panel_on_click, log_panel_requests).chain());
    }
}

/// Здание (без padding) под точкой сцены
pub fn building_at(config: &VillageConfig, scene_point: Vec2) -> Option<PanelId> {
    config
        .obstacles
        .buildings()
        .find(|building| building.bounds().contains(scene_point))
        .and_then(|building| building.panel)
}

fn request_panel_on_click(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    config: Res<VillageConfig>,
    mut requests: EventWriter<PanelRequested>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(world_point) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    if let Some(panel) = building_at(&config, world_to_scene(world_point)) {
        requests.write(PanelRequested { panel });
    }
}

fn log_panel_requests(mut requests: EventReader<PanelRequested>) {
    for request in requests.read() {
        logger::log_info(&format!("Open panel: {}", request.panel.label()));
    }
}
