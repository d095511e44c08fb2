// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Object identifier types.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Thin wrapper around a physical-object identifier.
///
/// Identifiers are issued once per constructed object by [`ObjectId::next`]
/// from a process-wide monotonically increasing counter.
///
/// # Invariants
/// - Zero (`ObjectId(0)`) is reserved as invalid and is never issued.
/// - Issued identifiers are never reused within a process.
/// - Identifiers are not part of the wire format; decoded objects receive
///   fresh identifiers.
///
/// The `#[repr(transparent)]` attribute keeps `ObjectId` layout-identical to
/// `u64` across the FFI boundary.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u64);

impl ObjectId {
    /// Issues the next process-wide identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Constructs an `ObjectId` from a raw `u64` value (FFI interop).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying raw value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
