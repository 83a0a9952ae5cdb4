use super::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;
use zerocopy::AsBytes;

/// A right-handed rotation quaternion, stored scalar-first.
#[repr(C)]
#[derive(AsBytes, Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// The axis must be unit length; the angle is in radians.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let sin = half.sin();
        Self {
            w: half.cos(),
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
        }
    }

    /// Converts a proper rotation matrix, given as its three orthonormal
    /// basis columns, into a quaternion. Branches on the largest component
    /// to keep the divisor well away from zero.
    pub fn from_rotation_axes(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let four_w_sq = 1.0 + x_axis.x + y_axis.y + z_axis.z;
        let four_x_sq = 1.0 + x_axis.x - y_axis.y - z_axis.z;
        let four_y_sq = 1.0 - x_axis.x + y_axis.y - z_axis.z;
        let four_z_sq = 1.0 - x_axis.x - y_axis.y + z_axis.z;

        if four_w_sq >= four_x_sq && four_w_sq >= four_y_sq && four_w_sq >= four_z_sq {
            let w = 0.5 * four_w_sq.sqrt();
            let mult = 0.25 / w;
            Self {
                w,
                x: (y_axis.z - z_axis.y) * mult,
                y: (z_axis.x - x_axis.z) * mult,
                z: (x_axis.y - y_axis.x) * mult,
            }
        } else if four_x_sq >= four_y_sq && four_x_sq >= four_z_sq {
            let x = 0.5 * four_x_sq.sqrt();
            let mult = 0.25 / x;
            Self {
                w: (y_axis.z - z_axis.y) * mult,
                x,
                y: (y_axis.x + x_axis.y) * mult,
                z: (x_axis.z + z_axis.x) * mult,
            }
        } else if four_y_sq >= four_z_sq {
            let y = 0.5 * four_y_sq.sqrt();
            let mult = 0.25 / y;
            Self {
                w: (z_axis.x - x_axis.z) * mult,
                x: (y_axis.x + x_axis.y) * mult,
                y,
                z: (z_axis.y + y_axis.z) * mult,
            }
        } else {
            let z = 0.5 * four_z_sq.sqrt();
            let mult = 0.25 / z;
            Self {
                w: (x_axis.y - y_axis.x) * mult,
                x: (x_axis.z + z_axis.x) * mult,
                y: (z_axis.y + y_axis.z) * mult,
                z,
            }
        }
    }

    pub fn dot(lhs: Self, rhs: Self) -> f32 {
        lhs.w * rhs.w + lhs.x * rhs.x + lhs.y * rhs.y + lhs.z * rhs.z
    }

    pub fn norm(self) -> f32 {
        Self::dot(self, self).sqrt()
    }

    pub fn normalized(self) -> Self {
        let norm = self.norm();
        Self {
            w: self.w / norm,
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }

    /// Rotates a vector by this quaternion. The quaternion must be unit
    /// length.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let axis = Vec3::new(self.x, self.y, self.z);
        let t = Vec3::cross(axis, v) * 2.0;
        v + t * self.w + Vec3::cross(axis, t)
    }

    /// Rotation around the x axis, in radians.
    pub fn pitch(self) -> f32 {
        let Self { w, x, y, z } = self;
        (2.0 * (y * z + w * x)).atan2(w * w - x * x - y * y + z * z)
    }

    /// Rotation around the y axis, in radians.
    pub fn yaw(self) -> f32 {
        let Self { w, x, y, z } = self;
        (-2.0 * (x * z - w * y)).clamp(-1.0, 1.0).asin()
    }

    /// Rotation around the z axis, in radians.
    pub fn roll(self) -> f32 {
        let Self { w, x, y, z } = self;
        (2.0 * (x * y + w * z)).atan2(w * w + x * x - y * y - z * z)
    }
}

impl Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            z: self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
        }
    }
}
