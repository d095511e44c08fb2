// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for geometry validation and the scene codec.

use thiserror::Error;

/// Per-vertex attribute attached to a [`Mesh`](crate::Mesh).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Per-vertex normals.
    Normals,
    /// Per-vertex texture coordinates.
    Uvs,
}

impl core::fmt::Display for Attribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normals => f.write_str("normals"),
            Self::Uvs => f.write_str("UVs"),
        }
    }
}

/// Rejected geometry. The entity that raised it is left as it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A triangle record references a vertex that does not exist.
    #[error(
        "triangle {triangle} references non-existent vertex {value} (vertex count {vertex_count})"
    )]
    TriangleOutOfRange {
        /// Index of the offending triangle record.
        triangle: usize,
        /// Raw component value as stored in the record.
        value: f32,
        /// Vertex count the record was checked against.
        vertex_count: usize,
    },

    /// Normals or UVs count does not match the vertex count.
    #[error("{attribute} count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        /// Attribute being attached.
        attribute: Attribute,
        /// Vertex count.
        expected: usize,
        /// Supplied record count.
        actual: usize,
    },

    /// A mesh with vertices has no normals or UVs attached.
    #[error("mesh has {vertex_count} vertices but no {attribute}")]
    MissingAttribute {
        /// Missing attribute.
        attribute: Attribute,
        /// Vertex count of the mesh.
        vertex_count: usize,
    },

    /// Replacing vertices would leave existing triangles referencing removed vertices.
    #[error("new vertex count {vertex_count} leaves triangle {triangle} dangling")]
    DanglingTriangles {
        /// First triangle record that would dangle.
        triangle: usize,
        /// Proposed vertex count.
        vertex_count: usize,
    },
}

/// A cursor read ran past the end of the supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("buffer truncated at word {offset}: needed {needed} words, {available} available")]
pub struct TruncatedBufferError {
    /// Cursor position of the failed read.
    pub offset: usize,
    /// Words the read required.
    pub needed: usize,
    /// Words remaining after `offset`.
    pub available: usize,
}

/// Errors produced while encoding or decoding a scene buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Decoded or encoded geometry failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Input buffer is shorter than its declared counts imply.
    #[error(transparent)]
    Truncated(#[from] TruncatedBufferError),

    /// A write went past the planned buffer length.
    #[error("write past end of buffer at word {offset} (capacity {capacity})")]
    Overflow {
        /// Cursor position of the failed write.
        offset: usize,
        /// Planned buffer length in words.
        capacity: usize,
    },

    /// The writer finished with a different number of words than planned.
    #[error("planned {planned} words but wrote {written}")]
    SizeMismatch {
        /// Planned buffer length.
        planned: usize,
        /// Words actually written.
        written: usize,
    },

    /// Words remain after the last declared object.
    #[error("{remaining} trailing words after word {offset}")]
    TrailingWords {
        /// Cursor position after the last object.
        offset: usize,
        /// Unconsumed words.
        remaining: usize,
    },

    /// A declared count exceeds the configured decode limit.
    #[error("{what} count {count} exceeds limit {limit}")]
    LimitExceeded {
        /// Which count was checked.
        what: &'static str,
        /// Declared count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A count does not fit in a 32-bit header word.
    #[error("{what} count {count} does not fit in a header word")]
    CountTooLarge {
        /// Which count overflowed.
        what: &'static str,
        /// Offending count.
        count: usize,
    },

    /// Byte input is not a whole number of words.
    #[error("byte length {len} is not a multiple of 4")]
    UnalignedByteLength {
        /// Byte length.
        len: usize,
    },

    /// Casting a word run into records failed.
    #[error("record cast failed: {0}")]
    RecordCast(#[from] bytemuck::PodCastError),
}

impl CodecError {
    /// Returns true for errors caused by geometry validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true for errors caused by a short input buffer.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated(_))
    }
}
