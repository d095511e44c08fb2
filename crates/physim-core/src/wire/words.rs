// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounds-checked word cursors.
//!
//! The scene buffer is a flat run of 32-bit words in native byte order. Counts
//! are stored as `u32` words; every other field is an `f32` stored bit-for-bit.

use bytemuck::Pod;

use crate::error::{CodecError, TruncatedBufferError};
use crate::math::{Quat, Vec2, Vec3};

/// Bytes per wire word.
pub const WORD_BYTES: usize = std::mem::size_of::<u32>();

/// A fixed-width record stored as consecutive float words.
///
/// `WORDS` is the single source of truth for how many words a record occupies;
/// size planning, writing, and reading all go through it.
pub trait WireRecord: Pod {
    /// Words occupied by one record.
    const WORDS: usize = std::mem::size_of::<Self>() / WORD_BYTES;
}

impl WireRecord for Vec2 {}
impl WireRecord for Vec3 {}
impl WireRecord for Quat {}

const _: () = assert!(<Vec2 as WireRecord>::WORDS == 2);
const _: () = assert!(<Vec3 as WireRecord>::WORDS == 3);
const _: () = assert!(<Quat as WireRecord>::WORDS == 4);

/// Converts a count into a header word.
pub(crate) fn count_word(what: &'static str, count: usize) -> Result<u32, CodecError> {
    u32::try_from(count).map_err(|_| CodecError::CountTooLarge { what, count })
}

/// Writer over a buffer allocated once at its planned length.
#[derive(Debug)]
pub struct WordWriter {
    words: Vec<u32>,
    cursor: usize,
}

impl WordWriter {
    /// Allocates a zeroed buffer of exactly `len` words.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len],
            cursor: 0,
        }
    }

    /// Current cursor position in words.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Words left before the planned end.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    fn slot(&mut self, len: usize) -> Result<&mut [u32], CodecError> {
        let capacity = self.words.len();
        let end = self
            .cursor
            .checked_add(len)
            .filter(|end| *end <= capacity)
            .ok_or(CodecError::Overflow {
                offset: self.cursor,
                capacity,
            })?;
        let out = &mut self.words[self.cursor..end];
        self.cursor = end;
        Ok(out)
    }

    /// Writes one raw word.
    pub fn put_u32(&mut self, value: u32) -> Result<(), CodecError> {
        self.slot(1)?[0] = value;
        Ok(())
    }

    /// Writes a count as a header word.
    pub fn put_count(&mut self, what: &'static str, count: usize) -> Result<(), CodecError> {
        self.put_u32(count_word(what, count)?)
    }

    /// Writes one record inline.
    pub fn put_record<T: WireRecord>(&mut self, record: &T) -> Result<(), CodecError> {
        self.put_records(std::slice::from_ref(record))
    }

    /// Writes a run of records back to back.
    pub fn put_records<T: WireRecord>(&mut self, records: &[T]) -> Result<(), CodecError> {
        let src: &[u32] = bytemuck::cast_slice(records);
        self.slot(src.len())?.copy_from_slice(src);
        Ok(())
    }

    /// Returns the buffer, failing unless exactly the planned words were written.
    pub fn finish(self) -> Result<Vec<u32>, CodecError> {
        if self.cursor != self.words.len() {
            return Err(CodecError::SizeMismatch {
                planned: self.words.len(),
                written: self.cursor,
            });
        }
        Ok(self.words)
    }
}

/// Reader over a borrowed word buffer.
#[derive(Debug)]
pub struct WordReader<'a> {
    words: &'a [u32],
    cursor: usize,
}

impl<'a> WordReader<'a> {
    /// Creates a reader positioned at word 0.
    #[must_use]
    pub fn new(words: &'a [u32]) -> Self {
        Self { words, cursor: 0 }
    }

    /// Current cursor position in words.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Unconsumed words.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    /// Consumes `len` words.
    pub fn take(&mut self, len: usize) -> Result<&'a [u32], TruncatedBufferError> {
        let available = self.remaining();
        if len > available {
            return Err(TruncatedBufferError {
                offset: self.cursor,
                needed: len,
                available,
            });
        }
        let out = &self.words[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(out)
    }

    /// Skips `len` words.
    pub fn skip(&mut self, len: usize) -> Result<(), TruncatedBufferError> {
        self.take(len).map(|_| ())
    }

    /// Reads one raw word.
    pub fn read_u32(&mut self) -> Result<u32, TruncatedBufferError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a count header word.
    pub fn read_count(&mut self) -> Result<usize, TruncatedBufferError> {
        // u32 always fits in usize on supported targets.
        Ok(self.read_u32()? as usize)
    }

    /// Reads one inline record.
    pub fn read_record<T: WireRecord>(&mut self) -> Result<T, CodecError> {
        let words = self.take(T::WORDS)?;
        Ok(bytemuck::try_pod_read_unaligned(bytemuck::cast_slice(words))?)
    }

    /// Reads `count` consecutive records.
    ///
    /// The remaining length is checked before anything is allocated, so a
    /// hostile count cannot force a large allocation.
    pub fn read_records<T: WireRecord>(&mut self, count: usize) -> Result<Vec<T>, CodecError> {
        let len = count.checked_mul(T::WORDS).ok_or(TruncatedBufferError {
            offset: self.cursor,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let words = self.take(len)?;
        Ok(bytemuck::try_cast_slice::<u32, T>(words)?.to_vec())
    }
}

/// Views a word buffer as native-endian bytes.
pub fn words_to_bytes(words: &[u32]) -> &[u8] {
    bytemuck::cast_slice(words)
}

/// Copies native-endian bytes into words.
pub fn bytes_to_words(bytes: &[u8]) -> Result<Vec<u32>, CodecError> {
    if bytes.len() % WORD_BYTES != 0 {
        return Err(CodecError::UnalignedByteLength { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .map(|chunk| {
            let mut raw = [0u8; WORD_BYTES];
            raw.copy_from_slice(chunk);
            u32::from_ne_bytes(raw)
        })
        .collect())
}
