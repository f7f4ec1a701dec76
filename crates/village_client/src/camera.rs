use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

/// Размер сцены в scene space (пиксели страницы)
pub const SCENE_WIDTH: f32 = 1000.0;
pub const SCENE_HEIGHT: f32 = 800.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scene_camera);
    }
}

#[derive(Component)]
pub struct SceneCamera;

/// 2D камера, которая всегда вписывает всю сцену в окно (letterbox)
fn spawn_scene_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: SCENE_WIDTH,
                min_height: SCENE_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
        SceneCamera,
    ));
}

/// Scene space (y вниз, origin в левом верхнем углу) → world space Bevy
pub fn scene_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - SCENE_WIDTH / 2.0, SCENE_HEIGHT / 2.0 - point.y)
}

/// World space → scene space (для кликов)
pub fn world_to_scene(point: Vec2) -> Vec2 {
    Vec2::new(point.x + SCENE_WIDTH / 2.0, SCENE_HEIGHT / 2.0 - point.y)
}

/// Чем ниже объект на сцене, тем ближе к зрителю
pub fn depth_for(scene_y: f32, layer: f32) -> f32 {
    layer + scene_y / SCENE_HEIGHT
}
