use serde::{Deserialize, Serialize};

use crate::collision::{MovingShape, WorldShape};
use crate::error::CollisionError;
use crate::math::{Pose, Vec2};
use crate::response::ResponseBody;
use crate::shapes::Shape;

/// Physical attributes of a body.
///
/// A body without attributes takes part in collision detection but is never
/// moved by a response, exactly like a static one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyAttributes {
    /// Zero mass is treated as infinite (static).
    pub mass: f64,
    pub is_static: bool,
    /// Triggers report overlaps but never receive a response.
    pub is_trigger: bool,
    /// Coefficient of restitution (bounciness). Range [0, 1].
    pub restitution: f64,
}

impl Default for BodyAttributes {
    fn default() -> Self {
        BodyAttributes {
            mass: 1.0,
            is_static: false,
            is_trigger: false,
            restitution: 0.2,
        }
    }
}

impl BodyAttributes {
    /// Movable body of the given mass.
    pub fn dynamic(mass: f64) -> Result<Self, CollisionError> {
        let attributes = BodyAttributes { mass, ..Default::default() };
        attributes.validate()?;
        Ok(attributes)
    }

    /// Immovable body.
    pub fn fixed() -> Self {
        BodyAttributes { mass: 0.0, is_static: true, ..Default::default() }
    }

    pub fn as_trigger(self) -> Self {
        BodyAttributes { is_trigger: true, ..self }
    }

    pub fn with_restitution(self, restitution: f64) -> Result<Self, CollisionError> {
        let attributes = BodyAttributes { restitution, ..self };
        attributes.validate()?;
        Ok(attributes)
    }

    pub fn validate(&self) -> Result<(), CollisionError> {
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(CollisionError::InvalidMass(self.mass));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(CollisionError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }

    /// 1 / mass, or zero when the body cannot be moved.
    pub fn inverse_mass(&self) -> f64 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }
}

/// One body as seen by a single step: borrowed state that the step may
/// update in place, plus read-only geometry and attributes.
#[derive(Debug)]
pub struct BodyView<'a, K> {
    pub id: K,
    pub shape: &'a Shape,
    pub pose: &'a mut Pose,
    pub velocity: &'a mut Vec2,
    pub attributes: Option<BodyAttributes>,
}

impl<'a, K> BodyView<'a, K> {
    pub fn new(id: K, shape: &'a Shape, pose: &'a mut Pose, velocity: &'a mut Vec2) -> Self {
        BodyView { id, shape, pose, velocity, attributes: None }
    }

    pub fn with_attributes(self, attributes: BodyAttributes) -> Self {
        BodyView { attributes: Some(attributes), ..self }
    }

    /// Segments, bodies without attributes and zero-mass bodies never move.
    pub fn is_static(&self) -> bool {
        self.inverse_mass() == 0.0
    }

    pub fn is_trigger(&self) -> bool {
        self.attributes.map_or(false, |a| a.is_trigger)
    }

    pub fn inverse_mass(&self) -> f64 {
        if self.shape.is_immovable() {
            return 0.0;
        }
        self.attributes.map_or(0.0, |a| a.inverse_mass())
    }

    /// Velocity the body actually moves at during the step; zero when static.
    pub fn effective_velocity(&self) -> Vec2 {
        if self.is_static() {
            Vec2::ZERO
        } else {
            *self.velocity
        }
    }

    /// False when the pose, velocity, shape or attributes hold values the
    /// collision math cannot use. Attributes are public and deserializable, so
    /// they are re-checked here rather than trusted.
    pub fn is_well_formed(&self) -> bool {
        self.pose.is_finite()
            && self.velocity.is_finite()
            && self.shape.validate().is_ok()
            && self.attributes.map_or(true, |a| a.validate().is_ok())
    }

    pub fn world_shape(&self) -> WorldShape {
        self.shape.to_world(self.pose)
    }

    pub fn moving_shape(&self) -> MovingShape {
        MovingShape::new(self.world_shape(), self.effective_velocity())
    }

    pub fn response_body(&self) -> ResponseBody {
        ResponseBody {
            velocity: self.effective_velocity(),
            inverse_mass: self.inverse_mass(),
            restitution: self.attributes.map_or(0.0, |a| a.restitution),
            is_trigger: self.is_trigger(),
        }
    }
}

/// An owned body, kept by [`crate::world::CollisionWorld`] between steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Body<K> {
    pub id: K,
    pub shape: Shape,
    pub pose: Pose,
    pub velocity: Vec2,
    pub attributes: Option<BodyAttributes>,
}

impl<K> Body<K> {
    /// Creates a body at `pose` with no physical attributes.
    pub fn new(id: K, shape: Shape, pose: Pose) -> Result<Self, CollisionError> {
        shape.validate()?;
        Ok(Body { id, shape, pose, velocity: Vec2::ZERO, attributes: None })
    }

    pub fn with_attributes(self, attributes: BodyAttributes) -> Result<Self, CollisionError> {
        attributes.validate()?;
        Ok(Body { attributes: Some(attributes), ..self })
    }

    pub fn with_velocity(self, velocity: Vec2) -> Self {
        Body { velocity, ..self }
    }

    /// Borrows the body for one step.
    pub fn view(&mut self) -> BodyView<'_, K>
    where
        K: Clone,
    {
        BodyView {
            id: self.id.clone(),
            shape: &self.shape,
            pose: &mut self.pose,
            velocity: &mut self.velocity,
            attributes: self.attributes,
        }
    }

    pub fn is_static(&self) -> bool {
        self.shape.is_immovable() || self.attributes.map_or(true, |a| a.inverse_mass() == 0.0)
    }
}
