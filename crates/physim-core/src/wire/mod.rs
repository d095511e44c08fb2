// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene wire format.
//!
//! A scene buffer is a flat run of 32-bit words in native byte order with no
//! padding, alignment markers, or version tag:
//!
//! ```text
//! word[0]                     object count (u32)
//! per object:
//!   3 words                   pivot x, y, z (f32)
//!   4 words                   rotation a, i, j, k (f32)
//!   4 words                   mesh vertices, triangles, normals, UVs counts (u32)
//!   vertices * 3              mesh positions
//!   triangles * 3             mesh triangle records
//!   normals * 3               mesh normals
//!   uvs * 2                   mesh UVs
//!   2 words                   collider vertices, triangles counts (u32)
//!   vertices * 3              collider positions
//!   triangles * 3             collider triangle records
//! ```
//!
//! The normals and UVs counts always equal the mesh vertex count.

mod inspect;
mod layout;
mod read;
mod words;
mod write;

pub use inspect::{inspect, ObjectSummary, SceneSummary};
pub use layout::{
    WordBudget, COLLIDER_HEADER_WORDS, MESH_HEADER_WORDS, MIN_OBJECT_WORDS, SCENE_HEADER_WORDS,
};
pub use read::decode_objects;
pub use words::{bytes_to_words, words_to_bytes, WireRecord, WordReader, WordWriter, WORD_BYTES};
pub use write::{encode_objects, encoded_word_length};
