//! World domain — статическая геометрия деревни
//!
//! Содержит:
//! - ObstacleMap (здания, деревья, кусты, костёр + padding)
//! - WalkArea (границы допустимых целей)

pub mod obstacles;
pub mod walk_area;

pub use obstacles::*;
pub use walk_area::*;
