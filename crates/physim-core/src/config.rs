// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene and decoder settings.

use crate::error::CodecError;

/// What a successful decode does to the objects already in the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodeMode {
    /// Decoded objects replace the collection; prior objects are dropped.
    #[default]
    Replace,
    /// Decoded objects are appended after the existing ones.
    Append,
}

/// Upper bounds on counts declared by an incoming buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeLimits {
    /// Maximum objects per buffer.
    pub max_objects: usize,
    /// Maximum vertices per mesh or collider.
    pub max_vertices: usize,
    /// Maximum triangle records per mesh or collider.
    pub max_triangles: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_objects: 1 << 20,
            max_vertices: 1 << 24,
            max_triangles: 1 << 24,
        }
    }
}

impl DecodeLimits {
    /// No limits beyond the buffer length itself.
    pub const UNBOUNDED: Self = Self {
        max_objects: usize::MAX,
        max_vertices: usize::MAX,
        max_triangles: usize::MAX,
    };

    fn check(what: &'static str, count: usize, limit: usize) -> Result<usize, CodecError> {
        if count > limit {
            return Err(CodecError::LimitExceeded { what, count, limit });
        }
        Ok(count)
    }

    /// Passes `count` through if it is within the object limit.
    pub fn check_objects(&self, count: usize) -> Result<usize, CodecError> {
        Self::check("object", count, self.max_objects)
    }

    /// Passes `count` through if it is within the vertex limit.
    pub fn check_vertices(&self, count: usize) -> Result<usize, CodecError> {
        Self::check("vertex", count, self.max_vertices)
    }

    /// Passes `count` through if it is within the triangle limit.
    pub fn check_triangles(&self, count: usize) -> Result<usize, CodecError> {
        Self::check("triangle", count, self.max_triangles)
    }
}

/// Settings carried by a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Replace or append on decode.
    pub decode_mode: DecodeMode,
    /// Validate triangle indices of decoded geometry.
    pub validate_on_decode: bool,
    /// Count limits applied while decoding.
    pub limits: DecodeLimits,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            decode_mode: DecodeMode::Replace,
            validate_on_decode: true,
            limits: DecodeLimits::default(),
        }
    }
}
