//! Snapshot для рендера: неизменяемый срез агентов, публикуется каждый тик

use bevy::prelude::*;

use crate::components::{Citizen, Heading};

/// Колонок в sprite sheet жителя (кадров ходьбы)
pub const SPRITE_COLUMNS: usize = 6;
/// Строк в sprite sheet (down, side, up + неиспользуемая)
pub const SPRITE_ROWS: usize = 4;

/// Read contract рендера: `{id, position, heading, animation_frame}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CitizenSnapshot {
    pub id: u32,
    pub position: Vec2,
    pub heading: Heading,
    pub animation_frame: u8,
}

impl CitizenSnapshot {
    pub fn of(citizen: &Citizen) -> Self {
        Self {
            id: citizen.id,
            position: citizen.position,
            heading: citizen.heading,
            animation_frame: citizen.animation_frame,
        }
    }

    /// Индекс в TextureAtlas: строка по heading, колонка по кадру
    pub fn atlas_index(&self) -> usize {
        self.heading.sprite_row() * SPRITE_COLUMNS + self.animation_frame as usize % SPRITE_COLUMNS
    }

    pub fn flip_x(&self) -> bool {
        self.heading.flip_x()
    }
}

/// Опубликованное состояние деревни (заменяется целиком каждый тик)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct VillageSnapshot {
    /// Номер тика, на котором снят snapshot (0 — ещё не было тиков)
    pub tick: u64,
    /// Отсортированы по id
    pub citizens: Vec<CitizenSnapshot>,
}

impl VillageSnapshot {
    pub fn capture<'a>(tick: u64, citizens: impl IntoIterator<Item = &'a Citizen>) -> Self {
        let mut citizens: Vec<_> = citizens.into_iter().map(CitizenSnapshot::of).collect();
        citizens.sort_by_key(|snapshot| snapshot.id);
        Self { tick, citizens }
    }

    pub fn get(&self, id: u32) -> Option<&CitizenSnapshot> {
        self.citizens
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.citizens[index])
    }
}
