//! Interpolation strategies.
//!
//! A strategy blends two states of one type at a fraction in [0, 1]. Strategies
//! are stateless values the morpher holds by value and calls once per tick, so
//! a new animatable type only needs a new strategy, never a new morpher.
//!
//! Every shipped strategy returns `a` unchanged at t <= 0 and `b` unchanged at
//! t >= 1, so keyframe states are reproduced exactly.

pub mod functions;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::value::{Rgba, Transform, Value};
use functions::{bezier_ease, lerp_array, lerp_f32, slerp_quat};

/// Capability blending two states of `T` at `t`.
pub trait InterpolationStrategy<T> {
    fn blend(&self, a: &T, b: &T, t: f32) -> T;

    /// Write the blend into an existing value.
    fn blend_into(&self, a: &T, b: &T, t: f32, out: &mut T) {
        *out = self.blend(a, b, t);
    }
}

/// Returns `Some(endpoint)` when `t` sits on or beyond a segment boundary.
#[inline]
fn endpoint<'a, T>(a: &'a T, b: &'a T, t: f32) -> Option<&'a T> {
    if t <= 0.0 {
        Some(a)
    } else if t >= 1.0 {
        Some(b)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarInterpolation;

impl InterpolationStrategy<f32> for ScalarInterpolation {
    fn blend(&self, a: &f32, b: &f32, t: f32) -> f32 {
        match endpoint(a, b, t) {
            Some(e) => *e,
            None => lerp_f32(*a, *b, t),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ColorInterpolation;

impl InterpolationStrategy<Rgba> for ColorInterpolation {
    fn blend(&self, a: &Rgba, b: &Rgba, t: f32) -> Rgba {
        match endpoint(a, b, t) {
            Some(e) => *e,
            None => Rgba(lerp_array(&a.0, &b.0, t)),
        }
    }
}

/// Slerp on raw (x, y, z, w) quaternions.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuatInterpolation;

impl InterpolationStrategy<[f32; 4]> for QuatInterpolation {
    fn blend(&self, a: &[f32; 4], b: &[f32; 4], t: f32) -> [f32; 4] {
        match endpoint(a, b, t) {
            Some(e) => *e,
            None => slerp_quat(*a, *b, t),
        }
    }
}

/// TRS blend: translation and scale lerp component-wise, rotation slerps along
/// the shortest arc.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformInterpolation;

impl InterpolationStrategy<Transform> for TransformInterpolation {
    fn blend(&self, a: &Transform, b: &Transform, t: f32) -> Transform {
        if let Some(e) = endpoint(a, b, t) {
            return *e;
        }
        Transform {
            translation: lerp_array(&a.translation, &b.translation, t),
            rotation: slerp_quat(a.rotation, b.rotation, t),
            scale: lerp_array(&a.scale, &b.scale, t),
        }
    }
}

/// Holds the left state for the whole segment and jumps at t = 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepInterpolation;

impl<T: Clone> InterpolationStrategy<T> for StepInterpolation {
    fn blend(&self, a: &T, b: &T, t: f32) -> T {
        if t >= 1.0 {
            b.clone()
        } else {
            a.clone()
        }
    }
}

/// Blend across `Value` kinds. Bool/Text are stepped; mismatched kinds keep
/// the left value (fail-soft).
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueInterpolation;

impl InterpolationStrategy<Value> for ValueInterpolation {
    fn blend(&self, a: &Value, b: &Value, t: f32) -> Value {
        if let Some(e) = endpoint(a, b, t) {
            return e.clone();
        }
        match (a, b) {
            (Value::Scalar(va), Value::Scalar(vb)) => Value::Scalar(lerp_f32(*va, *vb, t)),
            (Value::Vec3(va), Value::Vec3(vb)) => Value::Vec3(lerp_array(va, vb, t)),
            (Value::Quat(qa), Value::Quat(qb)) => Value::Quat(slerp_quat(*qa, *qb, t)),
            (Value::Color(ca), Value::Color(cb)) => Value::Color(lerp_array(ca, cb, t)),
            (Value::Transform(ta), Value::Transform(tb)) => {
                Value::Transform(TransformInterpolation.blend(ta, tb, t))
            }
            _ => a.clone(),
        }
    }
}

/// Cubic-bezier timing curve (x1, y1, x2, y2), CSS-style.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Easing {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Easing {
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        bezier_ease(t, self.x1, self.y1, self.x2, self.y2)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

/// Remaps the segment fraction through an easing curve before delegating.
#[derive(Clone, Copy, Debug, Default)]
pub struct Eased<S> {
    pub inner: S,
    pub easing: Easing,
}

impl<S> Eased<S> {
    pub fn new(inner: S, easing: Easing) -> Self {
        Self { inner, easing }
    }
}

impl<T, S: InterpolationStrategy<T>> InterpolationStrategy<T> for Eased<S> {
    fn blend(&self, a: &T, b: &T, t: f32) -> T {
        self.inner.blend(a, b, self.easing.apply(t))
    }
}

/// Adapts a closure into a strategy.
pub struct FnInterpolation<T, F> {
    f: F,
    _marker: PhantomData<fn(&T, &T, f32) -> T>,
}

impl<T, F> FnInterpolation<T, F>
where
    F: Fn(&T, &T, f32) -> T,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<T, F> InterpolationStrategy<T> for FnInterpolation<T, F>
where
    F: Fn(&T, &T, f32) -> T,
{
    fn blend(&self, a: &T, b: &T, t: f32) -> T {
        (self.f)(a, b, t)
    }
}
