// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene buffer writer.

use tracing::{debug, trace};

use super::layout::{WordBudget, SCENE_HEADER_WORDS};
use super::words::WordWriter;
use crate::error::CodecError;
use crate::object::PhysicalObject;

/// Planned word length of a buffer holding `objects`.
pub fn encoded_word_length(objects: &[PhysicalObject]) -> usize {
    objects
        .iter()
        .fold(WordBudget::new().header(SCENE_HEADER_WORDS), |budget, object| {
            object.budget(budget)
        })
        .total()
}

/// Encodes `objects`, in order, into one contiguous word buffer.
///
/// The total length is planned first, the buffer is allocated once, and every
/// object is then written sequentially. The caller owns the result.
///
/// # Errors
///
/// Fails with a validation error if a mesh with vertices lacks normals or UVs,
/// and with [`CodecError::CountTooLarge`] if a count does not fit in a header
/// word. Planning and writing disagreeing surfaces as
/// [`CodecError::Overflow`] or [`CodecError::SizeMismatch`].
pub fn encode_objects(objects: &[PhysicalObject]) -> Result<Vec<u32>, CodecError> {
    let total = encoded_word_length(objects);
    let mut writer = WordWriter::new(total);
    writer.put_count("object", objects.len())?;
    for object in objects {
        let start = writer.position();
        object.write(&mut writer)?;
        trace!(id = %object.id(), words = writer.position() - start, "object encoded");
    }
    let words = writer.finish()?;
    debug!(objects = objects.len(), words = words.len(), "scene encoded");
    Ok(words)
}
