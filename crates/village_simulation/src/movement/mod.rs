//! Movement domain — выбор целей и интеграция шага
//!
//! Содержит:
//! - sample_valid_target (rejection sampling с бюджетом попыток)
//! - advance_citizen (motion integrator, pure: старое состояние → новое)

pub mod integrator;
pub mod sampler;

pub use integrator::*;
pub use sampler::*;
