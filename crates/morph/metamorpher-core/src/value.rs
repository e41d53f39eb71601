//! Animatable value types shipped with the core.

use serde::{Deserialize, Serialize};

use crate::interp::functions::{normalize_quat, quat_from_axis_angle, quat_mul};

/// Identity quaternion (x, y, z, w).
pub const QUAT_IDENTITY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Spatial transform split into TRS.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub translation: [f32; 3],
    /// Quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: [0.0; 3],
        rotation: QUAT_IDENTITY,
        scale: [1.0; 3],
    };

    pub fn from_translation(translation: [f32; 3]) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_axis_angle(axis: [f32; 3], angle: f32) -> Self {
        Self {
            rotation: quat_from_axis_angle(axis, angle),
            ..Self::IDENTITY
        }
    }

    /// Apply an extra rotation about `axis` after the current one.
    pub fn rotate(&mut self, axis: [f32; 3], angle: f32) {
        let q = quat_from_axis_angle(axis, angle);
        self.rotation = normalize_quat(quat_mul(q, self.rotation));
    }

    pub fn translate(&mut self, offset: [f32; 3]) {
        for (t, o) in self.translation.iter_mut().zip(offset) {
            *t += o;
        }
    }
}

/// Linear RGBA colour.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }
}

/// Dynamically typed animatable value, for hosts that pick the animated
/// property at runtime.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    Scalar(f32),
    Vec3([f32; 3]),
    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),
    /// RGBA color
    Color([f32; 4]),
    Transform(Transform),
    /// Step-only boolean value (no blending)
    Bool(bool),
    /// Step-only string/text value (no blending)
    Text(String),
}
