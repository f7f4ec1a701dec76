//! Obstacle registry: статические зоны, куда нельзя назначать цель
//!
//! Каждое препятствие — axis-aligned прямоугольник (scene space: x вправо, y вниз)
//! + padding со всех сторон. Категория влияет ТОЛЬКО на padding по умолчанию,
//! `is_blocked` обрабатывает все категории одинаково.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Категория препятствия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Building,
    Tree,
    Bush,
    /// Точечное препятствие (костёр): нулевой размер, вся зона — padding
    Campfire,
}

impl ObstacleKind {
    pub fn default_padding(&self) -> f32 {
        match self {
            ObstacleKind::Building => 15.0,
            ObstacleKind::Tree => 8.0,
            ObstacleKind::Bush => 4.0,
            ObstacleKind::Campfire => 24.0,
        }
    }
}

/// Панель контента, которую открывает клик по зданию
///
/// Core её не обрабатывает — это opaque идентификатор для view слоя.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    About,
    Projects,
    Contact,
}

impl PanelId {
    pub fn label(&self) -> &'static str {
        match self {
            PanelId::About => "ABOUT ME",
            PanelId::Projects => "MY PROJECTS",
            PanelId::Contact => "CONTACT",
        }
    }
}

/// Статическое препятствие: `{x, y, width, height, padding}`
///
/// `(x, y)` — левый верхний угол. `padding: None` → padding категории.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub padding: Option<f32>,
    /// Только для зданий: какую панель открывает клик
    #[serde(default)]
    pub panel: Option<PanelId>,
}

impl Obstacle {
    pub fn rect(kind: ObstacleKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            padding: None,
            panel: None,
        }
    }

    /// Квадратная зона `{x, y, size, padding}`
    pub fn square(kind: ObstacleKind, x: f32, y: f32, size: f32) -> Self {
        Self::rect(kind, x, y, size, size)
    }

    /// Точечное препятствие: блокирует только padding вокруг точки
    pub fn point(kind: ObstacleKind, x: f32, y: f32) -> Self {
        Self::rect(kind, x, y, 0.0, 0.0)
    }

    pub fn building(panel: PanelId, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            panel: Some(panel),
            ..Self::rect(ObstacleKind::Building, x, y, width, height)
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn padding(&self) -> f32 {
        self.padding.unwrap_or_else(|| self.kind.default_padding())
    }

    /// Прямоугольник без padding (для рендера и кликов)
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Прямоугольник, расширенный на padding со всех сторон
    pub fn padded_bounds(&self) -> Rect {
        let padding = self.padding();
        Rect::new(
            self.x - padding,
            self.y - padding,
            self.x + self.width + padding,
            self.y + self.height + padding,
        )
    }

    /// Граница padded прямоугольника считается заблокированной
    pub fn contains(&self, point: Vec2) -> bool {
        let padding = self.padding();
        point.x >= self.x - padding
            && point.x <= self.x + self.width + padding
            && point.y >= self.y - padding
            && point.y <= self.y + self.height + padding
    }
}

/// Неизменяемый набор препятствий (собирается один раз при старте)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct ObstacleMap {
    obstacles: Vec<Obstacle>,
}

impl ObstacleMap {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Пустая карта: ничего не заблокировано
    pub fn empty() -> Self {
        Self::default()
    }

    /// Стандартная раскладка деревни: 3 дома, деревья, кусты, костёр
    pub fn village() -> Self {
        let mut obstacles = vec![
            Obstacle::building(PanelId::About, 148.0, 415.0, 160.0, 130.0),
            Obstacle::building(PanelId::Projects, 404.0, 415.0, 160.0, 130.0),
            Obstacle::building(PanelId::Contact, 660.0, 415.0, 160.0, 130.0),
        ];

        // Деревья у домов, на севере (вне walk area) и вдоль южной дороги
        let trees = [
            (50.0, 450.0),
            (330.0, 450.0),
            (580.0, 450.0),
            (850.0, 450.0),
            (100.0, 200.0),
            (250.0, 150.0),
            (450.0, 120.0),
            (650.0, 150.0),
            (800.0, 200.0),
            (180.0, 750.0),
            (450.0, 750.0),
            (700.0, 750.0),
        ];
        obstacles.extend(
            trees
                .iter()
                .map(|&(x, y)| Obstacle::square(ObstacleKind::Tree, x, y, 90.0)),
        );

        let bushes = [(120.0, 590.0), (300.0, 600.0), (620.0, 590.0), (820.0, 600.0)];
        obstacles.extend(
            bushes
                .iter()
                .map(|&(x, y)| Obstacle::square(ObstacleKind::Bush, x, y, 36.0)),
        );

        obstacles.push(Obstacle::point(ObstacleKind::Campfire, 500.0, 610.0));

        Self::new(obstacles)
    }

    /// true ⇔ точка внутри хотя бы одного padded прямоугольника
    ///
    /// Тотальная функция: работает и для точек вне walk area.
    pub fn is_blocked(&self, point: Vec2) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.contains(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles
            .iter()
            .filter(|obstacle| obstacle.kind == ObstacleKind::Building)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_expands_rect_on_all_sides() {
        let map = ObstacleMap::new(vec![
            Obstacle::rect(ObstacleKind::Building, 100.0, 100.0, 50.0, 20.0).with_padding(10.0),
        ]);

        // Строго внутри padded зоны
        assert!(map.is_blocked(Vec2::new(95.0, 95.0)));
        assert!(map.is_blocked(Vec2::new(155.0, 125.0)));
        assert!(map.is_blocked(Vec2::new(125.0, 110.0)));

        // Строго снаружи
        assert!(!map.is_blocked(Vec2::new(89.0, 110.0)));
        assert!(!map.is_blocked(Vec2::new(161.0, 110.0)));
        assert!(!map.is_blocked(Vec2::new(125.0, 89.0)));
        assert!(!map.is_blocked(Vec2::new(125.0, 131.0)));
    }

    #[test]
    fn test_point_obstacle_blocks_only_padding() {
        let campfire = Obstacle::point(ObstacleKind::Campfire, 500.0, 600.0);
        let padding = ObstacleKind::Campfire.default_padding();

        assert!(campfire.contains(Vec2::new(500.0, 600.0)));
        assert!(campfire.contains(Vec2::new(500.0 + padding - 1.0, 600.0)));
        assert!(!campfire.contains(Vec2::new(500.0 + padding + 1.0, 600.0)));
    }

    #[test]
    fn test_category_selects_default_padding() {
        let tree = Obstacle::square(ObstacleKind::Tree, 0.0, 0.0, 10.0);
        assert_eq!(tree.padding(), ObstacleKind::Tree.default_padding());

        let custom = tree.clone().with_padding(1.5);
        assert_eq!(custom.padding(), 1.5);
        assert_eq!(custom.padded_bounds(), Rect::new(-1.5, -1.5, 11.5, 11.5));
    }

    #[test]
    fn test_points_far_outside_are_not_blocked() {
        let map = ObstacleMap::village();

        assert!(!map.is_blocked(Vec2::new(-10_000.0, -10_000.0)));
        assert!(!map.is_blocked(Vec2::new(f32::MAX, 0.0)));
        assert!(!map.is_blocked(Vec2::new(f32::NAN, f32::NAN)));
    }

    #[test]
    fn test_village_has_three_buildings_with_panels() {
        let map = ObstacleMap::village();
        let panels: Vec<_> = map.buildings().filter_map(|b| b.panel).collect();

        assert_eq!(panels, vec![PanelId::About, PanelId::Projects, PanelId::Contact]);
        assert!(map.is_blocked(Vec2::new(228.0, 480.0)), "центр дома ABOUT");
    }

    #[test]
    fn test_empty_map_blocks_nothing() {
        let map = ObstacleMap::empty();
        assert!(map.is_empty());
        assert!(!map.is_blocked(Vec2::ZERO));
    }
}
