//! Motion integrator: один тик одного агента
//!
//! Порядок внутри тика:
//! 1. анимация (всегда, даже если агент стоит)
//! 2. arrival check → новая цель, без движения (пауза на один тик)
//! 3. шаг `speed` в сторону цели
//! 4. заблокирован → стоим, новая цель; иначе коммитим позицию
//! 5. heading по доминирующей оси (только при коммите)
//!
//! Агенты друг друга не читают, порядок обработки не важен.

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Citizen, Heading};
use crate::config::VillageConfig;
use crate::movement::sample_valid_target;
use crate::world::{ObstacleMap, WalkArea};

/// Read-only окружение тика (общее для всех агентов)
#[derive(Debug, Clone, Copy)]
pub struct MotionContext<'a> {
    pub area: &'a WalkArea,
    pub obstacles: &'a ObstacleMap,
    pub arrival_threshold: f32,
    pub frame_ticks: u32,
    pub animation_frames: u8,
    pub target_retries: u32,
}

impl<'a> MotionContext<'a> {
    pub fn from_config(config: &'a VillageConfig) -> Self {
        Self {
            area: &config.walk_area,
            obstacles: &config.obstacles,
            arrival_threshold: config.arrival_threshold,
            frame_ticks: config.frame_ticks,
            animation_frames: config.animation_frames,
            target_retries: config.target_retries,
        }
    }

    pub fn sample_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        sample_valid_target(self.area, self.obstacles, self.target_retries, rng)
    }
}

/// Результат шага (для логов и тестов)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Цель достигнута → выбрана новая, позиция не менялась
    Arrived,
    /// Следующая позиция внутри препятствия → новая цель, позиция не менялась
    Redirected,
    Moved,
}

/// Продвигает анимационный таймер (независимо от движения)
pub fn advance_animation(citizen: &mut Citizen, frame_ticks: u32, animation_frames: u8) {
    citizen.frame_timer += 1;
    if citizen.frame_timer > frame_ticks {
        citizen.animation_frame = (citizen.animation_frame + 1) % animation_frames.max(1);
        citizen.frame_timer = 0;
    }
}

/// Один тик агента: возвращает НОВОЕ состояние, исходное не трогает
pub fn advance_citizen<R: Rng + ?Sized>(
    citizen: &Citizen,
    context: &MotionContext,
    rng: &mut R,
) -> (Citizen, StepOutcome) {
    let mut next = citizen.clone();
    advance_animation(&mut next, context.frame_ticks, context.animation_frames);

    let offset = next.destination - next.position;
    let distance = offset.length();

    // distance == 0 тоже попадает сюда → деления на ноль нет
    if distance < context.arrival_threshold {
        next.destination = context.sample_target(rng);
        return (next, StepOutcome::Arrived);
    }

    let motion = offset / distance * next.speed;
    let candidate = next.position + motion;

    if context.obstacles.is_blocked(candidate) {
        // Без pathfinding: просто переприцеливаемся
        next.destination = context.sample_target(rng);
        return (next, StepOutcome::Redirected);
    }

    next.position = candidate;
    next.heading = Heading::from_motion(motion);
    (next, StepOutcome::Moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Obstacle, ObstacleKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_config() -> VillageConfig {
        VillageConfig {
            walk_area: WalkArea::new(0, 200, 0, 200),
            obstacles: ObstacleMap::empty(),
            ..default()
        }
    }

    #[test]
    fn test_straight_step_right() {
        let config = open_config();
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let citizen = Citizen::new(0, Vec2::ZERO, Vec2::new(100.0, 0.0), 1.0);
        let (next, outcome) = advance_citizen(&citizen, &context, &mut rng);

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(next.position, Vec2::new(1.0, 0.0));
        assert_eq!(next.heading, Heading::Right);
        assert_eq!(next.destination, citizen.destination);
    }

    #[test]
    fn test_arrival_reassigns_destination_without_moving() {
        let config = open_config();
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let here = Vec2::new(50.0, 50.0);
        let citizen = Citizen::new(0, here, here, 0.5);
        let (next, outcome) = advance_citizen(&citizen, &context, &mut rng);

        assert_eq!(outcome, StepOutcome::Arrived);
        assert_eq!(next.position, here);
        assert!(config.walk_area.contains(next.destination));
        assert_eq!(next.heading, citizen.heading);
    }

    #[test]
    fn test_blocked_step_redirects_without_moving() {
        // Стена прямо справа от агента
        let config = VillageConfig {
            obstacles: ObstacleMap::new(vec![
                Obstacle::rect(ObstacleKind::Building, 10.5, -50.0, 20.0, 100.0).with_padding(0.0),
            ]),
            // Новые цели только в нижней полосе → не совпадут со старой
            walk_area: WalkArea::new(0, 200, 100, 200),
            ..open_config()
        };
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let citizen = Citizen::new(0, Vec2::new(10.0, 0.0), Vec2::new(100.0, 0.0), 1.0);
        let (next, outcome) = advance_citizen(&citizen, &context, &mut rng);

        assert_eq!(outcome, StepOutcome::Redirected);
        assert_eq!(next.position, citizen.position);
        assert_ne!(next.destination, citizen.destination);
        assert_eq!(next.heading, citizen.heading);
    }

    #[test]
    fn test_animation_advances_even_when_not_moving() {
        let config = open_config();
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let here = Vec2::new(20.0, 20.0);
        let mut citizen = Citizen::new(0, here, here, 1.0);
        citizen.animation_frame = 5;
        citizen.frame_timer = config.frame_ticks;

        let (next, _) = advance_citizen(&citizen, &context, &mut rng);

        assert_eq!(next.animation_frame, 0, "5 → 0 по модулю 6");
        assert_eq!(next.frame_timer, 0);
    }

    #[test]
    fn test_frame_changes_every_seventh_tick() {
        let mut citizen = Citizen::new(0, Vec2::ZERO, Vec2::ZERO, 1.0);

        for _ in 0..6 {
            advance_animation(&mut citizen, 6, 6);
        }
        assert_eq!(citizen.animation_frame, 0);
        assert_eq!(citizen.frame_timer, 6);

        advance_animation(&mut citizen, 6, 6);
        assert_eq!(citizen.animation_frame, 1);
        assert_eq!(citizen.frame_timer, 0);
    }

    #[test]
    fn test_vertical_step_heading() {
        let config = open_config();
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let up = Citizen::new(0, Vec2::new(50.0, 100.0), Vec2::new(50.0, 10.0), 0.5);
        let (next, _) = advance_citizen(&up, &context, &mut rng);
        assert_eq!(next.heading, Heading::Up);
        assert_eq!(next.position, Vec2::new(50.0, 99.5));

        let left = Citizen::new(1, Vec2::new(100.0, 50.0), Vec2::new(10.0, 40.0), 0.5);
        let (next, _) = advance_citizen(&left, &context, &mut rng);
        assert_eq!(next.heading, Heading::Left);
    }

    #[test]
    fn test_speed_never_changes() {
        let config = VillageConfig {
            obstacles: ObstacleMap::village(),
            ..default()
        };
        let context = MotionContext::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let mut citizen = Citizen::new(0, Vec2::new(60.0, 700.0), Vec2::new(880.0, 700.0), 0.45);
        for _ in 0..2000 {
            citizen = advance_citizen(&citizen, &context, &mut rng).0;
            assert_eq!(citizen.speed, 0.45);
            assert!(citizen.animation_frame < 6);
        }
    }
}
