//! Capability traits the adapter forwards to.
//!
//! Instead of looking sibling components up by name and hoping they expose
//! the right methods, the adapter is generic over these traits and resolves
//! the concrete component types when it is attached.

use engine_component::Component;
use engine_math::{Transform2D, Vec2};

/// A component carrying a 2D position and a rotation in radians.
pub trait TransformAccess: Component {
    fn angle(&self) -> f32;
    fn set_angle(&mut self, angle: f32);
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
}

impl TransformAccess for Transform2D {
    fn angle(&self) -> f32 {
        Transform2D::angle(self)
    }

    fn set_angle(&mut self, angle: f32) {
        Transform2D::set_angle(self, angle);
    }

    fn position(&self) -> Vec2 {
        Transform2D::position(self)
    }

    fn set_position(&mut self, position: Vec2) {
        Transform2D::set_position(self, position);
    }
}

/// A component carrying a single value the adapter treats as opaque.
///
/// `Default` is what [`AccessAdapter::create_internal`](crate::AccessAdapter::create_internal)
/// attaches.
pub trait ValueAccess: Component + Default {
    type Value: Copy + std::fmt::Debug + Send + Sync + 'static;

    fn value(&self) -> Self::Value;
    fn set_value(&mut self, value: Self::Value);

    /// The stored value scaled by `multiplier`. Does not mutate.
    fn multiply_value(&self, multiplier: Self::Value) -> Self::Value;
}
