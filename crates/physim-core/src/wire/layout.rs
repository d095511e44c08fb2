// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Size planning for the scene buffer.
//!
//! Encoding is two-pass: every component first contributes its word count to a
//! [`WordBudget`], the buffer is allocated once at the total, and then written
//! sequentially. Each component's `serialized_word_length` is computed through
//! the same budget so the planner and the writer share one set of widths.

use super::words::WireRecord;
use crate::math::{Quat, Vec3};

/// Header words per mesh block (vertices, triangles, normals, UVs counts).
pub const MESH_HEADER_WORDS: usize = 4;

/// Header words per collider block (vertices, triangles counts).
pub const COLLIDER_HEADER_WORDS: usize = 2;

/// Header words at the start of a scene buffer (object count).
pub const SCENE_HEADER_WORDS: usize = 1;

/// Words of an object with empty mesh and collider: pose plus block headers.
pub const MIN_OBJECT_WORDS: usize = WordBudget::new()
    .record::<Vec3>()
    .record::<Quat>()
    .header(MESH_HEADER_WORDS)
    .header(COLLIDER_HEADER_WORDS)
    .total();

/// Accumulates word-length contributions from typed sub-encoders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordBudget {
    words: usize,
}

impl WordBudget {
    /// Empty budget.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: 0 }
    }

    /// Adds `n` count-header words.
    #[must_use]
    pub const fn header(self, n: usize) -> Self {
        Self {
            words: self.words + n,
        }
    }

    /// Adds `count` records of type `T`.
    #[must_use]
    pub const fn records<T: WireRecord>(self, count: usize) -> Self {
        Self {
            words: self.words + count * T::WORDS,
        }
    }

    /// Adds one inline record of type `T`.
    #[must_use]
    pub const fn record<T: WireRecord>(self) -> Self {
        self.records::<T>(1)
    }

    /// Total planned words.
    pub const fn total(self) -> usize {
        self.words
    }
}
