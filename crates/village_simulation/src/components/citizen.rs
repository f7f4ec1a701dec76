//! Citizen — автономно гуляющий житель деревни

use bevy::prelude::*;

/// Направление взгляда (выбирает строку sprite sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Heading {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Heading {
    /// Heading по доминирующей оси смещения
    ///
    /// X побеждает только при строгом `|dx| > |dy|`, ничья → вертикаль.
    pub fn from_motion(motion: Vec2) -> Self {
        if motion.x.abs() > motion.y.abs() {
            if motion.x > 0.0 {
                Heading::Right
            } else {
                Heading::Left
            }
        } else if motion.y > 0.0 {
            // scene space: y растёт вниз
            Heading::Down
        } else {
            Heading::Up
        }
    }

    /// Строка sprite sheet: down=0, side=1, up=2
    ///
    /// Left и Right делят одну side строку, отличаются только `flip_x`.
    pub fn sprite_row(&self) -> usize {
        match self {
            Heading::Down => 0,
            Heading::Left | Heading::Right => 1,
            Heading::Up => 2,
        }
    }

    /// Зеркалим sprite только для Right (side строка нарисована смотрящей влево)
    pub fn flip_x(&self) -> bool {
        matches!(self, Heading::Right)
    }
}

/// Состояние агента
///
/// Инварианты: `speed > 0`, `animation_frame < animation_frames`.
/// Мутируется только motion integrator'ом, один раз за тик.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Citizen {
    /// Stable ID (0..N-1 в порядке spawn, не переиспользуется)
    pub id: u32,
    /// Scene space (x вправо, y вниз)
    pub position: Vec2,
    pub destination: Vec2,
    pub heading: Heading,
    /// Distance per tick, фиксирована на всю жизнь агента
    pub speed: f32,
    pub animation_frame: u8,
    pub frame_timer: u32,
}

impl Citizen {
    pub fn new(id: u32, position: Vec2, destination: Vec2, speed: f32) -> Self {
        Self {
            id,
            position,
            destination,
            heading: Heading::Down,
            speed,
            animation_frame: 0,
            frame_timer: 0,
        }
    }

    pub fn distance_to_destination(&self) -> f32 {
        self.position.distance(self.destination)
    }
}
