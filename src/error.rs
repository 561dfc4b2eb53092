//! Configuration errors raised while building shapes, bodies and step settings.
//!
//! Narrow-phase predicates never return these: once a shape has been validated,
//! every collision test is total over its input.

use thiserror::Error;

/// Errors reported at construction/validation time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Broad-phase cell size must be a positive integer.
    #[error("cell interval must be positive, got {0}")]
    InvalidCellInterval(i64),

    /// A box half-extent or circle radius was negative.
    #[error("{shape} extent must be non-negative, got {value}")]
    NegativeExtent {
        /// Shape kind that failed validation.
        shape: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A shape coordinate was NaN or infinite.
    #[error("{shape} geometry contains a non-finite value")]
    NonFiniteGeometry {
        /// Shape kind that failed validation.
        shape: &'static str,
    },

    /// Mass must be finite and non-negative; zero mass means immovable.
    #[error("body mass must be finite and non-negative, got {0}")]
    InvalidMass(f64),

    /// Restitution coefficients live in [0, 1].
    #[error("restitution must be within [0, 1], got {0}")]
    InvalidRestitution(f64),

    /// The step duration must be finite and non-negative.
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),

    /// Gravity used by integration must be finite.
    #[error("gravity must be finite")]
    NonFiniteGravity,

    /// Configuration text could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),

    /// Configuration could not be written back out.
    #[error("config serialize error: {0}")]
    Serialize(String),
}
