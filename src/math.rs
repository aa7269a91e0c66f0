//! Matrix construction helpers.
//!
//! [`Transform`] wraps a column-major `cgmath::Matrix4<f32>` and builds it up
//! from elementary operations. Each operation is applied *after* the ones before
//! it, so `identity().scale(..).rotate(..).translate(..)` first scales, then
//! rotates and finally translates a point (the resulting matrix is `T · R · S`).

use std::ops::Mul;

use cgmath::{InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4};

/// Remaps OpenGL clip-space depth `[-1, 1]` onto the `[0, 1]` range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(Matrix4<f32>);

impl Transform {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Matrix4::from_nonuniform_scale(x, y, z))
    }

    /// Rotate counter-clockwise around `axis` (right-handed). A zero axis is a no-op.
    pub fn rotate(self, axis: impl Into<Vector3<f32>>, angle: impl Into<Rad<f32>>) -> Self {
        let axis = axis.into();
        if axis.magnitude2() == 0.0 {
            return self;
        }
        self.then(Matrix4::from_axis_angle(axis.normalize(), angle))
    }

    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        self.then(Matrix4::from_translation(Vector3::new(x, y, z)))
    }

    /// Right-handed perspective projection with wgpu depth range.
    ///
    /// `aspect` is width divided by height. Points on the near plane map to depth 0,
    /// points on the far plane to depth 1.
    pub fn perspective(fov_y: impl Into<Rad<f32>>, aspect: f32, near: f32, far: f32) -> Self {
        debug_assert!(aspect > 0.0, "aspect ratio must be positive");
        debug_assert!(near > 0.0 && far > near, "expected 0 < near < far");
        Self(OPENGL_TO_WGPU_MATRIX * cgmath::perspective(fov_y, aspect, near, far))
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        self.0
    }

    /// Transform a point, including the perspective divide.
    pub fn transform_point(&self, point: Point3<f32>) -> Point3<f32> {
        let v = self.0 * Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    }

    fn then(self, next: Matrix4<f32>) -> Self {
        Self(next * self.0)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f32>> for Transform {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self(matrix)
    }
}

impl From<Transform> for [[f32; 4]; 4] {
    fn from(transform: Transform) -> Self {
        transform.0.into()
    }
}

/// `a * b` applies `b` first, then `a`.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::Deg;

    use super::*;

    #[test]
    fn identity_keeps_points() {
        let p = Point3::new(1.5, -2.0, 3.0);
        assert_eq!(Transform::identity().transform_point(p), p);
    }

    #[test]
    fn operations_apply_in_call_order() {
        let t = Transform::identity().scale(2.0, 2.0, 2.0).translate(1.0, 2.0, 3.0);
        assert_relative_eq!(
            t.transform_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(3.0, 2.0, 3.0)
        );

        let reversed = Transform::identity().translate(1.0, 2.0, 3.0).scale(2.0, 2.0, 2.0);
        assert_relative_eq!(
            reversed.transform_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(4.0, 4.0, 6.0)
        );
    }

    #[test]
    fn rotation_about_y_is_right_handed() {
        let t = Transform::identity().rotate((0.0, 1.0, 0.0), Deg(90.0));
        assert_relative_eq!(
            t.transform_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(0.0, 0.0, -1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn rotation_axis_is_normalised() {
        let unit = Transform::identity().rotate((0.0, 1.0, 0.0), Deg(30.0));
        let long = Transform::identity().rotate((0.0, 5.0, 0.0), Deg(30.0));
        assert_relative_eq!(unit.matrix(), long.matrix(), epsilon = 1e-6);
    }

    #[test]
    fn zero_axis_rotation_is_a_no_op() {
        let t = Transform::identity().translate(1.0, 0.0, 0.0);
        assert_eq!(t.rotate((0.0, 0.0, 0.0), Deg(45.0)), t);
    }

    #[test]
    fn perspective_maps_near_and_far_to_wgpu_depth_range() {
        let p = Transform::perspective(Deg(60.0), 800.0 / 600.0, 100.0, 1000.0);
        let near = p.transform_point(Point3::new(0.0, 0.0, -100.0));
        let far = p.transform_point(Point3::new(0.0, 0.0, -1000.0));
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_respects_the_field_of_view() {
        // With a 90° vertical fov, a point on the top frustum edge lands on y = 1.
        let p = Transform::perspective(Deg(90.0), 1.0, 1.0, 10.0);
        let edge = p.transform_point(Point3::new(0.0, 5.0, -5.0));
        assert_relative_eq!(edge.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn multiplication_matches_chaining() {
        let s = Transform::identity().scale(3.0, 1.0, 1.0);
        let t = Transform::identity().translate(0.0, 0.0, -5.0);
        assert_eq!(t * s, s.translate(0.0, 0.0, -5.0));
        assert_eq!(Transform::identity() * t, t);
    }
}
