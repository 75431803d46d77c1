//! Interpolation between neighbouring samples.
//! - numeric, vector, colour and near/far types blend linearly
//! - bool, origins and image handles hold the left sample (step)

use crate::value::{
    Cartesian2, Cartesian3, Color, HorizontalOrigin, ImageHandle, NearFarScalar, VerticalOrigin,
};

#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Values a `SampledProperty` can blend between samples.
pub trait Interpolate: Clone {
    /// Value at `t` in [0, 1] between `a` (t = 0) and `b` (t = 1).
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}

impl Interpolate for Cartesian2 {
    #[inline]
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        Cartesian2::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

impl Interpolate for Cartesian3 {
    #[inline]
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        Cartesian3::new(
            lerp_f64(a.x, b.x, t),
            lerp_f64(a.y, b.y, t),
            lerp_f64(a.z, b.z, t),
        )
    }
}

impl Interpolate for Color {
    #[inline]
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        let t = t as f32;
        Color::new(
            lerp_f32(a.red, b.red, t),
            lerp_f32(a.green, b.green, t),
            lerp_f32(a.blue, b.blue, t),
            lerp_f32(a.alpha, b.alpha, t),
        )
    }
}

impl Interpolate for NearFarScalar {
    #[inline]
    fn interpolate(a: &Self, b: &Self, t: f64) -> Self {
        NearFarScalar::new(
            lerp_f64(a.near, b.near, t),
            lerp_f64(a.near_value, b.near_value, t),
            lerp_f64(a.far, b.far, t),
            lerp_f64(a.far_value, b.far_value, t),
        )
    }
}

macro_rules! step_interpolate {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Interpolate for $ty {
                #[inline]
                fn interpolate(a: &Self, _b: &Self, _t: f64) -> Self {
                    a.clone()
                }
            }
        )*
    };
}

step_interpolate!(bool, HorizontalOrigin, VerticalOrigin, ImageHandle);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_blend_component_wise() {
        let a = Cartesian3::new(0.0, 10.0, -4.0);
        let b = Cartesian3::new(10.0, 20.0, 4.0);
        assert_eq!(
            Cartesian3::interpolate(&a, &b, 0.5),
            Cartesian3::new(5.0, 15.0, 0.0)
        );
    }

    #[test]
    fn step_types_hold_left() {
        let a = ImageHandle::new("a.png");
        let b = ImageHandle::new("b.png");
        assert_eq!(ImageHandle::interpolate(&a, &b, 0.99), a);
        assert!(bool::interpolate(&true, &false, 0.7));
    }
}
