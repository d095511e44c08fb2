// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Plain float32 value records shared by geometry, objects, and the codec.
//!
//! These types carry no arithmetic. They are `#[repr(C)]` and `Pod` so the
//! codec can cast runs of records to and from 32-bit words without `unsafe`.

use bytemuck::{Pod, Zeroable};

/// Two-component float32 vector (texture coordinates).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

const _: () = assert!(std::mem::size_of::<Vec2>() == 8);

impl Vec2 {
    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

/// Three-component float32 vector.
///
/// Used for positions, normals, pivots, and triangle index records. A triangle
/// record stores three vertex indices as floats; see
/// [`GeometryBuffer::load_triangles`](crate::GeometryBuffer::load_triangles).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

const _: () = assert!(std::mem::size_of::<Vec3>() == 12);

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// Quaternion stored as `(a, i, j, k)` with `a` as the scalar part.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    /// Scalar part.
    pub a: f32,
    /// First imaginary component.
    pub i: f32,
    /// Second imaginary component.
    pub j: f32,
    /// Third imaginary component.
    pub k: f32,
}

const _: () = assert!(std::mem::size_of::<Quat>() == 16);

impl Quat {
    /// Identity rotation.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Creates a quaternion from components.
    pub const fn new(a: f32, i: f32, j: f32, k: f32) -> Self {
        Self { a, i, j, k }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 4] {
        [self.a, self.i, self.j, self.k]
    }
}

impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero() {
        assert_eq!(Vec2::default().to_array(), [0.0; 2]);
        assert_eq!(Vec3::default(), Vec3::ZERO);
        assert_eq!(Quat::default().to_array(), [0.0; 4]);
    }

    #[test]
    fn records_cast_to_words_in_field_order() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0);
        let words: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&q));
        assert_eq!(words, &[1.0, 2.0, 3.0, 4.0]);
    }
}
