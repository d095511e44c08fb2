// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Header walk over a scene buffer without materializing objects.

use super::words::{WireRecord, WordReader};
use crate::error::CodecError;
use crate::math::{Quat, Vec2, Vec3};

/// Per-object counts and word span found in a buffer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectSummary {
    /// Position in the buffer's object sequence.
    pub index: usize,
    /// Word offset of the object's first word.
    pub offset: usize,
    /// Words occupied by the object.
    pub words: usize,
    /// Mesh pivot.
    pub pivot: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Mesh vertex count.
    pub mesh_vertices: usize,
    /// Mesh triangle count.
    pub mesh_triangles: usize,
    /// Collider vertex count.
    pub collider_vertices: usize,
    /// Collider triangle count.
    pub collider_triangles: usize,
}

/// Result of [`inspect`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SceneSummary {
    /// Total words in the buffer.
    pub total_words: usize,
    /// One entry per object, in buffer order.
    pub objects: Vec<ObjectSummary>,
}

/// Walks the headers of `words` and reports each object's layout.
///
/// Array contents are skipped, not copied or validated. The same truncation
/// and trailing-word rules as [`decode_objects`](super::decode_objects) apply.
pub fn inspect(words: &[u32]) -> Result<SceneSummary, CodecError> {
    let mut reader = WordReader::new(words);
    let count = reader.read_count()?;
    let mut objects = Vec::new();
    for index in 0..count {
        let offset = reader.position();
        let pivot = reader.read_record::<Vec3>()?;
        let rotation = reader.read_record::<Quat>()?;

        let mesh_vertices = reader.read_count()?;
        let mesh_triangles = reader.read_count()?;
        let normals = reader.read_count()?;
        let uvs = reader.read_count()?;
        skip_records::<Vec3>(&mut reader, mesh_vertices)?;
        skip_records::<Vec3>(&mut reader, mesh_triangles)?;
        skip_records::<Vec3>(&mut reader, normals)?;
        skip_records::<Vec2>(&mut reader, uvs)?;

        let collider_vertices = reader.read_count()?;
        let collider_triangles = reader.read_count()?;
        skip_records::<Vec3>(&mut reader, collider_vertices)?;
        skip_records::<Vec3>(&mut reader, collider_triangles)?;

        objects.push(ObjectSummary {
            index,
            offset,
            words: reader.position() - offset,
            pivot,
            rotation,
            mesh_vertices,
            mesh_triangles,
            collider_vertices,
            collider_triangles,
        });
    }
    if reader.remaining() != 0 {
        return Err(CodecError::TrailingWords {
            offset: reader.position(),
            remaining: reader.remaining(),
        });
    }
    Ok(SceneSummary {
        total_words: words.len(),
        objects,
    })
}

fn skip_records<T: WireRecord>(reader: &mut WordReader<'_>, count: usize) -> Result<(), CodecError> {
    let len = count.saturating_mul(T::WORDS);
    reader.skip(len)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::wire::encode_objects;

    #[test]
    fn summary_matches_encoded_objects() {
        let objects = demo::triangle_scene(2).into_objects();
        let words = encode_objects(&objects).unwrap();
        let summary = inspect(&words).unwrap();
        assert_eq!(summary.total_words, words.len());
        assert_eq!(summary.objects.len(), 2);
        let first = &summary.objects[0];
        assert_eq!(first.offset, 1);
        assert_eq!(first.words, objects[0].serialized_word_length());
        assert_eq!(first.pivot, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!((first.mesh_vertices, first.mesh_triangles), (3, 1));
        assert_eq!((first.collider_vertices, first.collider_triangles), (3, 1));
        assert_eq!(summary.objects[1].offset, 1 + first.words);
    }

    #[test]
    fn truncated_buffer_is_reported() {
        let words = encode_objects(&[demo::triangle_object()]).unwrap();
        assert!(inspect(&words[..words.len() - 1]).unwrap_err().is_truncated());
    }
}
