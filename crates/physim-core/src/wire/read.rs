// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene buffer reader.

use tracing::{debug, trace, warn};

use super::layout::MIN_OBJECT_WORDS;
use super::words::WordReader;
use crate::config::SceneConfig;
use crate::error::CodecError;
use crate::object::PhysicalObject;

/// Decodes every object in a scene buffer.
///
/// Pivot and rotation are read as inline floats, mirroring the writer. Each
/// decoded object receives a fresh identifier. The whole buffer must be
/// consumed; leftover words are rejected.
///
/// # Errors
///
/// [`CodecError::Truncated`] when the buffer is shorter than its counts
/// imply, [`CodecError::LimitExceeded`] when a count breaks
/// `config.limits`, [`CodecError::Validation`] when decoded geometry is
/// invalid (only checked with `validate_on_decode`, except for the
/// normals/UVs headers which must always match the vertex count), and
/// [`CodecError::TrailingWords`] when words remain.
pub fn decode_objects(
    words: &[u32],
    config: &SceneConfig,
) -> Result<Vec<PhysicalObject>, CodecError> {
    let result = decode_inner(words, config);
    if let Err(err) = &result {
        warn!(%err, words = words.len(), "scene decode rejected");
    }
    result
}

fn decode_inner(words: &[u32], config: &SceneConfig) -> Result<Vec<PhysicalObject>, CodecError> {
    let mut reader = WordReader::new(words);
    let count = config.limits.check_objects(reader.read_count()?)?;
    // Reserve no more than the buffer could possibly hold.
    let mut objects = Vec::with_capacity(count.min(reader.remaining() / MIN_OBJECT_WORDS));
    for index in 0..count {
        let start = reader.position();
        let object = PhysicalObject::read(&mut reader, config)?;
        trace!(index, id = %object.id(), words = reader.position() - start, "object decoded");
        objects.push(object);
    }
    if reader.remaining() != 0 {
        return Err(CodecError::TrailingWords {
            offset: reader.position(),
            remaining: reader.remaining(),
        });
    }
    debug!(objects = objects.len(), words = words.len(), "scene decoded");
    Ok(objects)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DecodeLimits;
    use crate::demo;
    use crate::error::{TruncatedBufferError, ValidationError};
    use crate::wire::encode_objects;

    #[test]
    fn empty_buffer_is_truncated() {
        assert_eq!(
            decode_objects(&[], &SceneConfig::default()).unwrap_err(),
            CodecError::Truncated(TruncatedBufferError {
                offset: 0,
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn every_proper_prefix_is_truncated() {
        let words = encode_objects(&[demo::triangle_object()]).unwrap();
        for len in 1..words.len() {
            let err = decode_objects(&words[..len], &SceneConfig::default()).unwrap_err();
            assert!(err.is_truncated(), "prefix {len}: {err:?}");
        }
    }

    #[test]
    fn trailing_words_are_rejected() {
        let mut words = encode_objects(&[]).unwrap();
        words.push(42);
        assert_eq!(
            decode_objects(&words, &SceneConfig::default()).unwrap_err(),
            CodecError::TrailingWords {
                offset: 1,
                remaining: 1
            }
        );
    }

    #[test]
    fn object_limit_is_checked_before_reading() {
        let config = SceneConfig {
            limits: DecodeLimits {
                max_objects: 0,
                ..DecodeLimits::default()
            },
            ..SceneConfig::default()
        };
        let words = encode_objects(&[demo::triangle_object()]).unwrap();
        assert!(matches!(
            decode_objects(&words, &config),
            Err(CodecError::LimitExceeded { what: "object", .. })
        ));
    }

    #[test]
    fn mismatched_normals_header_is_rejected() {
        let mut words = encode_objects(&[demo::triangle_object()]).unwrap();
        words[10] = 2;
        assert!(matches!(
            decode_objects(&words, &SceneConfig::default()),
            Err(CodecError::Validation(ValidationError::CountMismatch { .. }))
        ));
    }

    #[test]
    fn bad_triangle_is_rejected_only_when_validating() {
        let mut words = encode_objects(&[demo::triangle_object()]).unwrap();
        // first mesh triangle record starts after 12 header/pose words and 9 position words
        words[12 + 9 + 2] = 7.0f32.to_bits();
        assert!(decode_objects(&words, &SceneConfig::default())
            .unwrap_err()
            .is_validation());

        let lenient = SceneConfig {
            validate_on_decode: false,
            ..SceneConfig::default()
        };
        let objects = decode_objects(&words, &lenient).unwrap();
        assert_eq!(objects[0].mesh().triangles()[0].z, 7.0);
    }
}
