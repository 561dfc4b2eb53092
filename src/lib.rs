//! 2D discrete collision detection and response.
//!
//! Each fixed step runs a grid broad phase over every body, exact narrow-phase
//! tests on the candidate pairs, and a mass-aware response that pushes solid
//! bodies apart and reflects their velocities. Trigger bodies only report
//! overlaps. See [`world::step`] for the single-call entry point and
//! [`CollisionWorld`] for a container that owns its bodies.

pub mod collision;
pub mod config;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod response;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{CollisionManifold, BroadPhaseStrategy, SpatialGrid, WorldShape, AABB};
pub use config::CollisionConfig;
pub use error::CollisionError;
pub use math::{Pose, Vec2};
pub use objects::{Body, BodyAttributes, BodyView};
pub use response::{PairResponse, ResponseDelta, RestitutionMode};
pub use shapes::{BoxShape, Circle, LineSegment, Shape};
pub use world::{step, CollisionListener, CollisionWorld, StepCoordinator, StepPhase, StepReport, StepStats};
