//! ECS Components симуляции
//!
//! - citizen: состояние агента (Citizen, Heading)

pub mod citizen;

pub use citizen::*;
