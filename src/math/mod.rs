pub mod pose;
pub mod vec2;

pub use pose::Pose;
pub use vec2::Vec2;
