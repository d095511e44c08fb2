// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Renderable geometry: positions and triangles plus per-vertex normals and UVs.

use tracing::debug;

use crate::config::DecodeLimits;
use crate::error::{Attribute, CodecError, ValidationError};
use crate::geometry::GeometryBuffer;
use crate::math::{Vec2, Vec3};
use crate::wire::{WordBudget, WordReader, WordWriter};

/// Geometry with per-vertex normals and texture coordinates.
///
/// When attached, `normals` and `uvs` always have exactly one record per
/// vertex. Either may be absent until the caller attaches it. A mesh with no
/// vertices never holds attributes, so the empty mesh has one representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    geometry: GeometryBuffer,
    normals: Option<Vec<Vec3>>,
    uvs: Option<Vec<Vec2>>,
}

impl Mesh {
    /// Empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// Per-vertex normals, if attached.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Per-vertex texture coordinates, if attached.
    pub fn uvs(&self) -> Option<&[Vec2]> {
        self.uvs.as_deref()
    }

    /// Number of vertices.
    pub fn vertices_count(&self) -> usize {
        self.geometry.vertices_count()
    }

    /// Number of triangle records.
    pub fn triangles_count(&self) -> usize {
        self.geometry.triangles_count()
    }

    /// Attaches vertex positions.
    ///
    /// Normals and UVs attached for a different vertex count no longer match
    /// and are dropped.
    pub fn load_vertices(&mut self, vertices: Vec<Vec3>) -> Result<(), ValidationError> {
        let count = vertices.len();
        self.geometry.load_vertices(vertices)?;
        if count == 0 {
            self.normals = None;
            self.uvs = None;
            return Ok(());
        }
        if self.normals.as_ref().is_some_and(|n| n.len() != count) {
            debug!(count, "vertex count changed; dropping normals");
            self.normals = None;
        }
        if self.uvs.as_ref().is_some_and(|u| u.len() != count) {
            debug!(count, "vertex count changed; dropping UVs");
            self.uvs = None;
        }
        Ok(())
    }

    /// Attaches triangle records; see [`GeometryBuffer::load_triangles`].
    pub fn load_triangles(&mut self, triangles: Vec<Vec3>) -> Result<(), ValidationError> {
        self.geometry.load_triangles(triangles)
    }

    /// Attaches normals. Fails unless there is exactly one per vertex.
    pub fn load_normals(&mut self, normals: Vec<Vec3>) -> Result<(), ValidationError> {
        check_count(Attribute::Normals, self.vertices_count(), normals.len())?;
        self.normals = attached(normals);
        Ok(())
    }

    /// Attaches UVs. Fails unless there is exactly one per vertex.
    pub fn load_uvs(&mut self, uvs: Vec<Vec2>) -> Result<(), ValidationError> {
        check_count(Attribute::Uvs, self.vertices_count(), uvs.len())?;
        self.uvs = attached(uvs);
        Ok(())
    }

    /// Reads `count` vertex records at the cursor.
    pub fn load_vertices_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.geometry.load_vertices_from_cursor(reader, count)
    }

    /// Reads `count` triangle records at the cursor.
    pub fn load_triangles_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.geometry.load_triangles_from_cursor(reader, count)
    }

    /// Reads `count` normal records at the cursor.
    pub fn load_normals_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.normals = attached(reader.read_records(count)?);
        Ok(())
    }

    /// Reads `count` UV records at the cursor.
    pub fn load_uvs_from_cursor(
        &mut self,
        reader: &mut WordReader<'_>,
        count: usize,
    ) -> Result<(), CodecError> {
        self.uvs = attached(reader.read_records(count)?);
        Ok(())
    }

    /// Checks triangles and per-vertex attribute counts.
    ///
    /// Absent attributes pass; use [`Mesh::ensure_complete`] before encoding.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.geometry.validate()?;
        let count = self.vertices_count();
        if let Some(normals) = &self.normals {
            check_count(Attribute::Normals, count, normals.len())?;
        }
        if let Some(uvs) = &self.uvs {
            check_count(Attribute::Uvs, count, uvs.len())?;
        }
        Ok(())
    }

    /// Checks that a mesh with vertices has both normals and UVs attached.
    pub fn ensure_complete(&self) -> Result<(), ValidationError> {
        let vertex_count = self.vertices_count();
        if vertex_count == 0 {
            return Ok(());
        }
        if self.normals.is_none() {
            return Err(ValidationError::MissingAttribute {
                attribute: Attribute::Normals,
                vertex_count,
            });
        }
        if self.uvs.is_none() {
            return Err(ValidationError::MissingAttribute {
                attribute: Attribute::Uvs,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Words for positions, normals, UVs, and triangles, excluding headers.
    pub fn serialized_word_length(&self) -> usize {
        self.budget(WordBudget::new()).total()
    }

    pub(crate) fn budget(&self, budget: WordBudget) -> WordBudget {
        let count = self.vertices_count();
        self.geometry
            .budget(budget)
            .records::<Vec3>(count)
            .records::<Vec2>(count)
    }

    /// Writes the header and arrays: positions, triangles, normals, UVs.
    pub(crate) fn write(&self, writer: &mut WordWriter) -> Result<(), CodecError> {
        self.ensure_complete()?;
        let count = self.vertices_count();
        writer.put_count("mesh vertices", count)?;
        writer.put_count("mesh triangles", self.triangles_count())?;
        writer.put_count("mesh normals", count)?;
        writer.put_count("mesh UVs", count)?;
        self.geometry.write_vertices(writer)?;
        self.geometry.write_triangles(writer)?;
        writer.put_records(self.normals().unwrap_or_default())?;
        writer.put_records(self.uvs().unwrap_or_default())?;
        Ok(())
    }

    /// Reads a mesh block written by [`Mesh::write`].
    pub(crate) fn read(
        reader: &mut WordReader<'_>,
        limits: &DecodeLimits,
    ) -> Result<Self, CodecError> {
        let vertices = limits.check_vertices(reader.read_count()?)?;
        let triangles = limits.check_triangles(reader.read_count()?)?;
        let normals = reader.read_count()?;
        let uvs = reader.read_count()?;
        check_count(Attribute::Normals, vertices, normals)?;
        check_count(Attribute::Uvs, vertices, uvs)?;

        let mut mesh = Self::new();
        mesh.load_vertices_from_cursor(reader, vertices)?;
        mesh.load_triangles_from_cursor(reader, triangles)?;
        mesh.load_normals_from_cursor(reader, normals)?;
        mesh.load_uvs_from_cursor(reader, uvs)?;
        Ok(mesh)
    }
}

/// Empty attribute arrays are stored as absent.
fn attached<T>(records: Vec<T>) -> Option<Vec<T>> {
    (!records.is_empty()).then_some(records)
}

fn check_count(attribute: Attribute, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::CountMismatch {
            attribute,
            expected,
            actual,
        });
    }
    Ok(())
}
