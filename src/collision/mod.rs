pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod spatial_grid;
pub mod world_shape;

// Re-export key types
pub use aabb::AABB;
pub use detection::{contact, overlaps, MovingShape, EPSILON};
pub use manifold::CollisionManifold;
pub use spatial_grid::{BroadPhaseStrategy, CellRange, SpatialGrid};
pub use world_shape::WorldShape;
