use super::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign};
use zerocopy::AsBytes;

/// A 4x4 affine matrix, stored column-major.
#[repr(C)]
#[derive(AsBytes, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub elements: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(translation: Vec3) -> Self {
        let mut matrix = Self::identity();
        matrix.elements[12] = translation.x;
        matrix.elements[13] = translation.y;
        matrix.elements[14] = translation.z;
        matrix
    }

    /// Builds a rotation matrix from a quaternion of any non-zero norm. The
    /// terms are scaled by `2 / dot(q, q)`, so a quaternion that has drifted
    /// or been rescaled away from unit length still yields a proper
    /// rotation.
    pub fn rotation(rotation: Quat) -> Self {
        let Quat { w, x, y, z } = rotation;
        let norm_sq = Quat::dot(rotation, rotation);
        let s = if norm_sq == 0.0 { 0.0 } else { 2.0 / norm_sq };

        Self {
            elements: [
                1.0 - s * (y * y + z * z),
                s * (x * y + w * z),
                s * (x * z - w * y),
                0.0, //
                s * (x * y - w * z),
                1.0 - s * (x * x + z * z),
                s * (y * z + w * x),
                0.0, //
                s * (x * z + w * y),
                s * (y * z - w * x),
                1.0 - s * (x * x + y * y),
                0.0, //
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    pub fn scale(scale: Vec3) -> Self {
        let mut matrix = Self::identity();
        matrix.elements[0] = scale.x;
        matrix.elements[5] = scale.y;
        matrix.elements[10] = scale.z;
        matrix
    }

    /// Composes `Translation(position) * Rotation(rotation) * Scale(scale)`,
    /// the matrix that maps local coordinates into the parent space.
    pub fn trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::translation(position) * Self::rotation(rotation) * Self::scale(scale)
    }

    /// Splits an affine matrix back into position, rotation and signed
    /// non-uniform scale such that `trs` over the result reproduces the
    /// matrix. The sign of each scalar triple product of the basis columns
    /// decides the sign of the corresponding scale component, which keeps
    /// reflections out of the rotation part.
    ///
    /// A basis column of length zero makes the normalization divide by zero
    /// and produces non-finite output; callers must not pass a singular
    /// matrix.
    pub fn split(&self) -> (Vec3, Quat, Vec3) {
        let e = &self.elements;
        let position = Vec3::new(e[12], e[13], e[14]);

        let x_axis = Vec3::new(e[0], e[1], e[2]);
        let y_axis = Vec3::new(e[4], e[5], e[6]);
        let z_axis = Vec3::new(e[8], e[9], e[10]);

        let x_triple = Vec3::dot(Vec3::cross(y_axis, z_axis), x_axis);
        let y_triple = Vec3::dot(Vec3::cross(z_axis, x_axis), y_axis);
        let z_triple = Vec3::dot(Vec3::cross(x_axis, y_axis), z_axis);

        let scale = Vec3::new(
            axis_sign(x_triple) * x_axis.length(),
            axis_sign(y_triple) * y_axis.length(),
            axis_sign(z_triple) * z_axis.length(),
        );

        // dividing by the signed scale removes both magnitude and reflection
        let rotation = Quat::from_rotation_axes(
            x_axis / scale.x,
            y_axis / scale.y,
            z_axis / scale.z,
        );

        (position, rotation, scale)
    }

    /// Applies the matrix to a point, treating it as having w = 1.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * point.x + e[4] * point.y + e[8] * point.z + e[12],
            e[1] * point.x + e[5] * point.y + e[9] * point.z + e[13],
            e[2] * point.x + e[6] * point.y + e[10] * point.z + e[14],
        )
    }
}

fn axis_sign(triple: f32) -> f32 {
    if triple < 0.0 {
        -1.0
    } else {
        1.0
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut elements = [0.0f32; 16];

        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.elements[k * 4 + row] * rhs.elements[col * 4 + k];
                }
                elements[col * 4 + row] = sum;
            }
        }

        Self { elements }
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
