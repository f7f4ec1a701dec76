use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::HashMap;
use village_simulation::{
    logger, CitizenSnapshot, ObstacleKind, VillageConfig, VillageSnapshot, SPRITE_COLUMNS, SPRITE_ROWS,
};

use crate::camera::{depth_for, scene_to_world};

const CITIZEN_SHEET: &str = "env/Citizen2_Walk.png";
/// Размер кадра в sprite sheet (пиксели)
const CITIZEN_TILE: u32 = 32;
/// Размер жителя на сцене
const CITIZEN_SIZE: f32 = 48.0;

const OBSTACLE_LAYER: f32 = 1.0;
const CITIZEN_LAYER: f32 = 2.0;

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (load_citizen_sheet, spawn_obstacle_visuals))
            .add_systems(
                Update,
                (
                    fall_back_when_sheet_missing,
                    (spawn_visuals_for_new_citizens, sync_citizen_sprites)
                        .chain()
                        .run_if(resource_changed::<VillageSnapshot>),
                )
                    .chain(),
            );
    }
}

/// Sprite sheet жителя: 6 колонок (кадры) × 4 строки (down, side, up)
#[derive(Resource)]
pub struct CitizenSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    /// Файл не загрузился → рисуем цветные квадраты
    pub missing: bool,
}

/// Link: visual entity → citizen id
#[derive(Component)]
pub struct CitizenVisual {
    pub id: u32,
}

fn load_citizen_sheet(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let layout = TextureAtlasLayout::from_grid(
        UVec2::splat(CITIZEN_TILE),
        SPRITE_COLUMNS as u32,
        SPRITE_ROWS as u32,
        None,
        None,
    );

    commands.insert_resource(CitizenSheet {
        image: asset_server.load(CITIZEN_SHEET),
        layout: layouts.add(layout),
        missing: false,
    });
}

/// Цветные прямоугольники на месте препятствий (без padding)
fn spawn_obstacle_visuals(mut commands: Commands, config: Res<VillageConfig>) {
    for obstacle in config.obstacles.iter() {
        let bounds = obstacle.bounds();
        // Точечные препятствия (костёр) рисуем по размеру padding
        let size = if bounds.size().length_squared() > 0.0 {
            bounds.size()
        } else {
            Vec2::splat(obstacle.padding())
        };
        let center = scene_to_world(bounds.center());

        commands.spawn((
            Sprite::from_color(obstacle_color(obstacle.kind), size),
            Transform::from_xyz(center.x, center.y, depth_for(bounds.max.y, OBSTACLE_LAYER)),
        ));
    }
}

/// Spawn sprite для жителей, у которых ещё нет визуала
fn spawn_visuals_for_new_citizens(
    mut commands: Commands,
    snapshot: Res<VillageSnapshot>,
    sheet: Res<CitizenSheet>,
    visuals: Query<&CitizenVisual>,
) {
    for citizen in &snapshot.citizens {
        if visuals.iter().any(|visual| visual.id == citizen.id) {
            continue;
        }

        let mut sprite = if sheet.missing {
            placeholder_sprite()
        } else {
            let mut sprite = Sprite::from_atlas_image(
                sheet.image.clone(),
                TextureAtlas {
                    layout: sheet.layout.clone(),
                    index: citizen.atlas_index(),
                },
            );
            sprite.custom_size = Some(Vec2::splat(CITIZEN_SIZE));
            sprite
        };
        sprite.flip_x = citizen.flip_x();

        commands.spawn((sprite, citizen_transform(citizen), CitizenVisual { id: citizen.id }));
    }
}

/// Sync snapshot → sprite: позиция, кадр, зеркалирование
fn sync_citizen_sprites(
    snapshot: Res<VillageSnapshot>,
    mut visuals: Query<(&CitizenVisual, &mut Transform, &mut Sprite)>,
) {
    let by_id: HashMap<u32, &CitizenSnapshot> = snapshot.citizens.iter().map(|c| (c.id, c)).collect();

    for (visual, mut transform, mut sprite) in visuals.iter_mut() {
        let Some(citizen) = by_id.get(&visual.id) else {
            continue;
        };

        *transform = citizen_transform(citizen);
        sprite.flip_x = citizen.flip_x();
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = citizen.atlas_index();
        }
    }
}

/// Sheet не найден в assets/ → уже созданные жители меняют sprite на квадрат
fn fall_back_when_sheet_missing(
    asset_server: Res<AssetServer>,
    sheet: Option<ResMut<CitizenSheet>>,
    mut visuals: Query<&mut Sprite, With<CitizenVisual>>,
) {
    let Some(mut sheet) = sheet else {
        return;
    };
    if sheet.missing || !matches!(asset_server.load_state(&sheet.image), LoadState::Failed(_)) {
        return;
    }

    logger::log_warning(&format!("Citizen sheet {} failed to load, using placeholders", CITIZEN_SHEET));
    sheet.missing = true;
    for mut sprite in visuals.iter_mut() {
        let flip_x = sprite.flip_x;
        *sprite = placeholder_sprite();
        sprite.flip_x = flip_x;
    }
}

/// Цветной квадрат вместо кадра анимации (без atlas)
fn placeholder_sprite() -> Sprite {
    Sprite::from_color(Color::srgb(0.85, 0.7, 0.5), Vec2::splat(CITIZEN_SIZE * 0.5))
}

fn citizen_transform(citizen: &CitizenSnapshot) -> Transform {
    // Позиция округляется до пикселя (pixel art)
    let world = scene_to_world(citizen.position.round());
    Transform::from_xyz(world.x, world.y, depth_for(citizen.position.y, CITIZEN_LAYER))
}

/// Палитра препятствий по категории
fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Building => Color::srgb(0.55, 0.35, 0.25), // Brown
        ObstacleKind::Tree => Color::srgb(0.15, 0.4, 0.15),      // Dark green
        ObstacleKind::Bush => Color::srgb(0.3, 0.6, 0.25),       // Green
        ObstacleKind::Campfire => Color::srgb(0.9, 0.45, 0.1),   // Orange
    }
}
