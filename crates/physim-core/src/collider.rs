// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Physical-shape geometry.

use crate::config::DecodeLimits;
use crate::error::{CodecError, ValidationError};
use crate::geometry::GeometryBuffer;
use crate::math::Vec3;
use crate::wire::{WordBudget, WordReader, WordWriter};

/// Geometry describing an object's physical shape (no normals or UVs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collider {
    geometry: GeometryBuffer,
    // Not carried by the wire format.
    center_of_mass: Vec3,
}

impl Collider {
    /// Empty collider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing geometry.
    #[must_use]
    pub fn from_geometry(geometry: GeometryBuffer) -> Self {
        Self {
            geometry,
            center_of_mass: Vec3::ZERO,
        }
    }

    /// Underlying positions and triangles.
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        self.geometry.vertices()
    }

    /// Triangle index records.
    pub fn triangles(&self) -> &[Vec3] {
        self.geometry.triangles()
    }

    /// Number of vertices.
    pub fn vertices_count(&self) -> usize {
        self.geometry.vertices_count()
    }

    /// Number of triangle records.
    pub fn triangles_count(&self) -> usize {
        self.geometry.triangles_count()
    }

    /// Center of mass (reserved; not used by the codec).
    pub fn center_of_mass(&self) -> Vec3 {
        self.center_of_mass
    }

    /// Sets the center of mass.
    pub fn set_center_of_mass(&mut self, center: Vec3) {
        self.center_of_mass = center;
    }

    /// Attaches vertex positions; see [`GeometryBuffer::load_vertices`].
    pub fn load_vertices(&mut self, vertices: Vec<Vec3>) -> Result<(), ValidationError> {
        self.geometry.load_vertices(vertices)
    }

    /// Attaches triangle records; see [`GeometryBuffer::load_triangles`].
    pub fn load_triangles(&mut self, triangles: Vec<Vec3>) -> Result<(), ValidationError> {
        self.geometry.load_triangles(triangles)
    }

    /// Checks every triangle against the vertex count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.geometry.validate()
    }

    /// Words for positions and triangles, excluding headers.
    pub fn serialized_word_length(&self) -> usize {
        self.budget(WordBudget::new()).total()
    }

    pub(crate) fn budget(&self, budget: WordBudget) -> WordBudget {
        self.geometry.budget(budget)
    }

    pub(crate) fn write(&self, writer: &mut WordWriter) -> Result<(), CodecError> {
        writer.put_count("collider vertices", self.vertices_count())?;
        writer.put_count("collider triangles", self.triangles_count())?;
        self.geometry.write_vertices(writer)?;
        self.geometry.write_triangles(writer)
    }

    pub(crate) fn read(
        reader: &mut WordReader<'_>,
        limits: &DecodeLimits,
    ) -> Result<Self, CodecError> {
        let vertices = limits.check_vertices(reader.read_count()?)?;
        let triangles = limits.check_triangles(reader.read_count()?)?;
        let mut geometry = GeometryBuffer::new();
        geometry.load_vertices_from_cursor(reader, vertices)?;
        geometry.load_triangles_from_cursor(reader, triangles)?;
        Ok(Self::from_geometry(geometry))
    }
}
