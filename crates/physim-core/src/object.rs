// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Physical objects and the per-tick hook.

use crate::collider::Collider;
use crate::config::SceneConfig;
use crate::error::CodecError;
use crate::ident::ObjectId;
use crate::math::{Quat, Vec3};
use crate::mesh::Mesh;
use crate::wire::{WordBudget, WordReader, WordWriter, COLLIDER_HEADER_WORDS, MESH_HEADER_WORDS};

/// Something advanced once per simulation step.
pub trait Tickable {
    /// Advances by `delta` seconds.
    fn tick(&mut self, delta: f64);
}

/// Calls [`Tickable::tick`] on every item, in order, exactly once.
pub fn tick_all<T: Tickable>(items: &mut [T], delta: f64) {
    for item in items {
        item.tick(delta);
    }
}

/// One simulated entity: visual mesh, collision shape, pivot, and orientation.
///
/// Not `Clone`: identifiers are never shared. Use [`PhysicalObject::duplicate`].
#[derive(Debug)]
pub struct PhysicalObject {
    id: ObjectId,
    mesh: Mesh,
    collider: Collider,
    mesh_pivot: Vec3,
    rotation: Quat,
}

impl Default for PhysicalObject {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicalObject {
    /// Empty object with a freshly issued identifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ObjectId::next(),
            mesh: Mesh::new(),
            collider: Collider::new(),
            mesh_pivot: Vec3::ZERO,
            rotation: Quat::default(),
        }
    }

    /// Identifier assigned at construction.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Visual mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Mutable visual mesh.
    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Replaces the mesh, dropping the previous one.
    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    /// Collision shape.
    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Mutable collision shape.
    pub fn collider_mut(&mut self) -> &mut Collider {
        &mut self.collider
    }

    /// Replaces the collider, dropping the previous one.
    pub fn set_collider(&mut self, collider: Collider) {
        self.collider = collider;
    }

    /// Offset of the mesh relative to the object origin.
    pub fn mesh_pivot(&self) -> Vec3 {
        self.mesh_pivot
    }

    /// Sets the mesh pivot.
    pub fn set_mesh_pivot(&mut self, pivot: Vec3) {
        self.mesh_pivot = pivot;
    }

    /// Orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Sets the orientation.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Copies every field except the identifier, which is freshly issued.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: ObjectId::next(),
            mesh: self.mesh.clone(),
            collider: self.collider.clone(),
            mesh_pivot: self.mesh_pivot,
            rotation: self.rotation,
        }
    }

    /// Field-for-field equality, ignoring the identifier.
    pub fn same_content(&self, other: &Self) -> bool {
        self.mesh == other.mesh
            && self.collider == other.collider
            && self.mesh_pivot == other.mesh_pivot
            && self.rotation == other.rotation
    }

    /// Words this object occupies in a scene buffer, headers included.
    pub fn serialized_word_length(&self) -> usize {
        self.budget(WordBudget::new()).total()
    }

    pub(crate) fn budget(&self, budget: WordBudget) -> WordBudget {
        let budget = budget
            .record::<Vec3>()
            .record::<Quat>()
            .header(MESH_HEADER_WORDS)
            .header(COLLIDER_HEADER_WORDS);
        self.collider.budget(self.mesh.budget(budget))
    }

    pub(crate) fn write(&self, writer: &mut WordWriter) -> Result<(), CodecError> {
        writer.put_record(&self.mesh_pivot)?;
        writer.put_record(&self.rotation)?;
        self.mesh.write(writer)?;
        self.collider.write(writer)
    }

    /// Reads one object; the result gets a fresh identifier.
    pub(crate) fn read(
        reader: &mut WordReader<'_>,
        config: &SceneConfig,
    ) -> Result<Self, CodecError> {
        let mesh_pivot = reader.read_record::<Vec3>()?;
        let rotation = reader.read_record::<Quat>()?;
        let mesh = Mesh::read(reader, &config.limits)?;
        let collider = Collider::read(reader, &config.limits)?;
        if config.validate_on_decode {
            mesh.validate()?;
            collider.validate()?;
        }
        Ok(Self {
            id: ObjectId::next(),
            mesh,
            collider,
            mesh_pivot,
            rotation,
        })
    }
}

impl Tickable for PhysicalObject {
    /// Reserved for motion and force integration; currently changes nothing.
    fn tick(&mut self, _delta: f64) {}
}
