//! 2D transform component.
//!
//! [`Transform2D`] holds a position in the plane and a rotation angle in
//! radians. The angle is stored exactly as written: no wrapping into
//! `[0, 2π)` or `(-π, π]` is applied.

use engine_component::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D transform: position and rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform2D {
    /// World-space position.
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub angle: f32,
}

impl Transform2D {
    /// The identity transform: origin, no rotation.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        angle: 0.0,
    };

    #[must_use]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn from_position_angle(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Rotation in radians.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform2D {
    fn type_name() -> &'static str {
        "Transform2D"
    }
}
