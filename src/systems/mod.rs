//! Simulation systems: point-mass integration, soft bodies, particles,
//! collision resolution and entity lifecycle.

pub mod collision;
pub mod lifecycle;
pub mod particle;
pub mod point_mass;
pub mod soft_body;

pub use collision::{resolve_pair, CollisionResolver, CollisionStats};
pub use lifecycle::{ExpiryReport, LifePhase, Lifecycle, SpawnOutcome};
pub use particle::{Particle, Trail, TrailSample};
pub use point_mass::PointMass;
pub use soft_body::SoftBody;
