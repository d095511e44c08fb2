// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vertex positions plus triangle connectivity, shared by meshes and colliders.

use crate::error::{CodecError, ValidationError};
use crate::math::Vec3;
use crate::wire::{WordBudget, WordReader, WordWriter};

/// Vertex position array plus triangle index array.
///
/// Each triangle record stores three vertex indices as floats. Every component,
/// truncated toward zero, must index an existing vertex. The buffer owns both
/// arrays; replacing one drops the previous allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    vertices: Vec<Vec3>,
    triangles: Vec<Vec3>,
}

impl GeometryBuffer {
    /// Empty geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds geometry from vertices and triangles, validating the triangles.
    pub fn from_parts(vertices: Vec<Vec3>, triangles: Vec<Vec3>) -> Result<Self, ValidationError> {
        let mut geometry = Self::new();
        geometry.load_vertices(vertices)?;
        geometry.load_triangles(triangles)?;
        Ok(geometry)
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Triangle index records.
    pub fn triangles(&self) -> &[Vec3] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn vertices_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangle records.
    pub fn triangles_count(&self) -> usize {
        self.triangles.len()
    }

    /// Attaches a vertex array, taking ownership.
    ///
    /// Fails with [`ValidationError::DanglingTriangles`] if the currently
    /// attached triangles reference a vertex the new array does not have; the
    /// previous vertices are kept in that case.
    pub fn load_vertices(&mut self, vertices: Vec<Vec3>) -> Result<(), ValidationError> {
        if let Err(ValidationError::TriangleOutOfRange { triangle, .. }) =
            check_triangles(&self.triangles, vertices.len())
        {
            return Err(ValidationError::DanglingTriangles {
                triangle,
                vertex_count: vertices.len(),
            });
        }
        self.vertices = vertices;
        Ok(())
    }

    /// Attaches a triangle array, taking ownership.
    ///
    /// Every component of every record is checked against the current vertex
    /// count before anything is committed. On failure the previous triangles
    /// are left untouched.
    pub fn load_triangles(&mut self, triangles: Vec<Vec3>) -> Result<(), ValidationError> {
        check_triangles(&triangles, self.vertices.len())?;
        self.triangles = triangles;
        Ok(())
    }

    /// Reads `count` vertex records at the reader's cursor and advances it.
    ///
    /// No validation is performed; see [`GeometryBuffer::validate`].
    pub fn load_vertices_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.vertices = reader.read_records(count)?;
        Ok(())
    }

    /// Reads `count` triangle records at the reader's cursor and advances it.
    ///
    /// No validation is performed; see [`GeometryBuffer::validate`].
    pub fn load_triangles_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.triangles = reader.read_records(count)?;
        Ok(())
    }

    /// Checks every triangle against the vertex count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_triangles(&self.triangles, self.vertices.len())
    }

    /// Words occupied by the vertex and triangle arrays, excluding headers.
    pub fn serialized_word_length(&self) -> usize {
        self.budget(WordBudget::new()).total()
    }

    pub(crate) fn budget(&self, budget: WordBudget) -> WordBudget {
        budget
            .records::<Vec3>(self.vertices.len())
            .records::<Vec3>(self.triangles.len())
    }

    pub(crate) fn write_vertices(&self, writer: &mut WordWriter) -> Result<(), CodecError> {
        writer.put_records(&self.vertices)
    }

    pub(crate) fn write_triangles(&self, writer: &mut WordWriter) -> Result<(), CodecError> {
        writer.put_records(&self.triangles)
    }
}

fn check_triangles(triangles: &[Vec3], vertex_count: usize) -> Result<(), ValidationError> {
    for (triangle, record) in triangles.iter().enumerate() {
        for value in record.to_array() {
            if !index_in_range(value, vertex_count) {
                return Err(ValidationError::TriangleOutOfRange {
                    triangle,
                    value,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

/// Truncates `value` toward zero and checks it against `vertex_count`.
fn index_in_range(value: f32, vertex_count: usize) -> bool {
    if !value.is_finite() || value < 0.0 {
        return false;
    }
    // Finite and non-negative, so the saturating cast is exact after trunc.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = value.trunc() as u64;
    index < u64::try_from(vertex_count).unwrap_or(u64::MAX)
}
