pub mod body;

pub use body::{Body, BodyAttributes, BodyView};
