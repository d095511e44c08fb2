// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! physim-core: composite physics objects and the scene word-buffer codec.
//!
//! A [`Scene`] owns an ordered collection of [`PhysicalObject`]s, each holding a
//! [`Mesh`], a [`Collider`], a pivot, and a rotation. The [`wire`] module packs
//! a scene into one contiguous, self-describing buffer of 32-bit words and
//! reads it back, with every cursor access bounds-checked.
#![forbid(unsafe_code)]

mod collider;
mod config;
/// Diagnostic fixtures (single-triangle object and scenes).
pub mod demo;
mod error;
mod geometry;
mod ident;
/// Plain float32 value records.
pub mod math;
mod mesh;
mod object;
mod scene;
mod shared;
pub mod wire;

/// Physical-shape geometry.
pub use collider::Collider;
/// Scene and decoder settings.
pub use config::{DecodeLimits, DecodeMode, SceneConfig};
/// Validation and codec errors.
pub use error::{Attribute, CodecError, TruncatedBufferError, ValidationError};
/// Positions plus triangle connectivity.
pub use geometry::GeometryBuffer;
/// Object identifiers.
pub use ident::ObjectId;
/// Value records.
pub use math::{Quat, Vec2, Vec3};
/// Renderable geometry.
pub use mesh::Mesh;
/// Objects and the tick hook.
pub use object::{tick_all, PhysicalObject, Tickable};
/// The object collection and codec entry points.
pub use scene::Scene;
/// Lock-serialized scene for multi-threaded hosts.
pub use shared::SharedScene;
