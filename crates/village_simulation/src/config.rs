//! Конфигурация деревни (Resource, неизменяемый после старта)
//!
//! Все константы симуляции собраны здесь и передаются внутрь через DI,
//! вместо глобальных списков препятствий.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::snapshot::SPRITE_COLUMNS;
use crate::world::{ObstacleMap, WalkArea};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("walk area is inverted: x {min_x}..={max_x}, y {min_y}..={max_y}")]
    InvertedWalkArea {
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    },

    #[error("citizen count must be at least 1")]
    NoCitizens,

    #[error("speed range must be positive and ordered, got {min}..={max}")]
    InvalidSpeedRange { min: f32, max: f32 },

    #[error("{field} must be at least 1")]
    ZeroCounter { field: &'static str },

    #[error("arrival threshold must be positive and finite, got {0}")]
    InvalidArrivalThreshold(f32),

    /// Шаг не меньше порога прибытия → агент перескакивает цель
    #[error("max speed {max} must be below arrival threshold {threshold}")]
    SpeedExceedsArrival { max: f32, threshold: f32 },

    #[error("animation_frames {frames} exceeds sprite sheet columns ({columns})")]
    TooManyAnimationFrames { frames: u8, columns: usize },

    #[error("obstacle #{index} has invalid geometry")]
    InvalidObstacle { index: usize },
}

/// Диапазон скорости (distance per tick), выбирается один раз при spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 0.3, max: 0.6 }
    }
}

/// Параметры симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct VillageConfig {
    /// Размер пула агентов (создаётся один раз)
    pub citizen_count: u32,
    pub walk_area: WalkArea,
    pub speed_range: SpeedRange,
    /// Дистанция, ближе которой цель считается достигнутой
    pub arrival_threshold: f32,
    /// Кадр анимации меняется, когда frame_timer превысит это значение
    pub frame_ticks: u32,
    /// Колонок в sprite sheet
    pub animation_frames: u8,
    /// Бюджет попыток rejection sampling
    pub target_retries: u32,
    /// None → seed из entropy
    pub seed: Option<u64>,
    pub obstacles: ObstacleMap,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            citizen_count: 6,
            walk_area: WalkArea::default(),
            speed_range: SpeedRange::default(),
            arrival_threshold: 5.0,
            frame_ticks: 6,
            animation_frames: 6,
            target_retries: 20,
            seed: None,
            obstacles: ObstacleMap::village(),
        }
    }
}

impl VillageConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = &self.walk_area;
        if !area.is_well_formed() {
            return Err(ConfigError::InvertedWalkArea {
                min_x: area.min_x,
                max_x: area.max_x,
                min_y: area.min_y,
                max_y: area.max_y,
            });
        }

        if self.citizen_count == 0 {
            return Err(ConfigError::NoCitizens);
        }

        let speed = self.speed_range;
        if !(speed.min.is_finite() && speed.max.is_finite() && speed.min > 0.0 && speed.min <= speed.max) {
            return Err(ConfigError::InvalidSpeedRange {
                min: speed.min,
                max: speed.max,
            });
        }

        if !(self.arrival_threshold.is_finite() && self.arrival_threshold > 0.0) {
            return Err(ConfigError::InvalidArrivalThreshold(self.arrival_threshold));
        }

        // speed < threshold: шаг остаётся на отрезке position → destination,
        // а значит внутри (выпуклой) walk area
        if speed.max >= self.arrival_threshold {
            return Err(ConfigError::SpeedExceedsArrival {
                max: speed.max,
                threshold: self.arrival_threshold,
            });
        }

        if self.animation_frames == 0 {
            return Err(ConfigError::ZeroCounter { field: "animation_frames" });
        }
        if self.animation_frames as usize > SPRITE_COLUMNS {
            return Err(ConfigError::TooManyAnimationFrames {
                frames: self.animation_frames,
                columns: SPRITE_COLUMNS,
            });
        }
        if self.target_retries == 0 {
            return Err(ConfigError::ZeroCounter { field: "target_retries" });
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let geometry = [obstacle.x, obstacle.y, obstacle.width, obstacle.height, obstacle.padding()];
            let finite = geometry.iter().all(|value| value.is_finite());
            if !finite || obstacle.width < 0.0 || obstacle.height < 0.0 || obstacle.padding() < 0.0 {
                return Err(ConfigError::InvalidObstacle { index });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Obstacle, ObstacleKind, PanelId};

    #[test]
    fn test_default_config_is_valid() {
        assert!(VillageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
            citizen_count = 3
            seed = 99

            [walk_area]
            min_x = 0
            max_x = 100
            min_y = 0
            max_y = 50
        "#;

        let config = VillageConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.citizen_count, 3);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.walk_area, WalkArea::new(0, 100, 0, 50));
        assert_eq!(config.target_retries, 20);
        assert_eq!(config.obstacles, ObstacleMap::village());
    }

    #[test]
    fn test_parse_custom_obstacles() {
        let toml_str = r#"
            [[obstacles]]
            kind = "building"
            x = 10.0
            y = 10.0
            width = 40.0
            height = 30.0
            panel = "contact"

            [[obstacles]]
            kind = "campfire"
            x = 70.0
            y = 70.0
            padding = 12.0
        "#;

        let config = VillageConfig::from_toml_str(toml_str).unwrap();
        let obstacles: Vec<_> = config.obstacles.iter().cloned().collect();

        assert_eq!(
            obstacles,
            vec![
                Obstacle::building(PanelId::Contact, 10.0, 10.0, 40.0, 30.0),
                Obstacle::point(ObstacleKind::Campfire, 70.0, 70.0).with_padding(12.0),
            ]
        );
    }

    #[test]
    fn test_inverted_walk_area_rejected() {
        let config = VillageConfig {
            walk_area: WalkArea::new(100, 0, 0, 10),
            ..default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::InvertedWalkArea { .. })));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let config = VillageConfig {
            speed_range: SpeedRange { min: 0.0, max: 1.0 },
            ..default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::InvalidSpeedRange { .. })));
    }

    #[test]
    fn test_speed_at_or_above_arrival_threshold_rejected() {
        let config = VillageConfig {
            speed_range: SpeedRange { min: 1.0, max: 20.0 },
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedExceedsArrival { max, threshold }) if max == 20.0 && threshold == 5.0
        ));

        let at_threshold = VillageConfig {
            speed_range: SpeedRange { min: 1.0, max: 5.0 },
            ..default()
        };
        assert!(at_threshold.validate().is_err());

        let below = VillageConfig {
            speed_range: SpeedRange { min: 1.0, max: 4.9 },
            ..default()
        };
        assert!(below.validate().is_ok());
    }

    #[test]
    fn test_animation_frames_limited_by_sheet_columns() {
        let too_many = VillageConfig {
            animation_frames: 10,
            ..default()
        };
        assert!(matches!(
            too_many.validate(),
            Err(ConfigError::TooManyAnimationFrames { frames: 10, columns: 6 })
        ));

        let fewer = VillageConfig {
            animation_frames: 4,
            ..default()
        };
        assert!(fewer.validate().is_ok());
    }

    #[test]
    fn test_negative_padding_rejected() {
        let config = VillageConfig {
            obstacles: ObstacleMap::new(vec![
                Obstacle::square(ObstacleKind::Bush, 0.0, 0.0, 5.0).with_padding(-1.0),
            ]),
            ..default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::InvalidObstacle { index: 0 })));
    }

    #[test]
    fn test_zero_citizens_and_retries_rejected() {
        let no_citizens = VillageConfig {
            citizen_count: 0,
            ..default()
        };
        assert!(matches!(no_citizens.validate(), Err(ConfigError::NoCitizens)));

        let no_retries = VillageConfig {
            target_retries: 0,
            ..default()
        };
        assert!(matches!(
            no_retries.validate(),
            Err(ConfigError::ZeroCounter { field: "target_retries" })
        ));
    }

    #[test]
    fn test_garbage_toml_is_parse_error() {
        let result = VillageConfig::from_toml_str("citizen_count = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
