pub mod collision_world;
pub mod step;

pub use collision_world::CollisionWorld;
pub use step::{step, CollisionListener, StepCoordinator, StepPhase, StepReport, StepStats};
