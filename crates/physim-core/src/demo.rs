// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Diagnostic fixtures: a single-triangle object and scenes built from it.

use tracing::error;

use crate::collider::Collider;
use crate::error::ValidationError;
use crate::geometry::GeometryBuffer;
use crate::math::{Quat, Vec2, Vec3};
use crate::mesh::Mesh;
use crate::object::PhysicalObject;
use crate::scene::Scene;

const TRIANGLE_VERTICES: [Vec3; 3] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
];
const TRIANGLE_INDICES: [Vec3; 1] = [Vec3::new(0.0, 1.0, 2.0)];
const TRIANGLE_UVS: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)];

/// Pivot given to [`triangle_object`].
pub const TRIANGLE_PIVOT: Vec3 = Vec3::new(1.0, 2.0, 3.0);
/// Rotation given to [`triangle_object`].
pub const TRIANGLE_ROTATION: Quat = Quat::new(0.0, 1.0, 0.0, 0.0);

fn triangle_parts() -> Result<(Mesh, Collider), ValidationError> {
    let mut mesh = Mesh::new();
    mesh.load_vertices(TRIANGLE_VERTICES.to_vec())?;
    mesh.load_triangles(TRIANGLE_INDICES.to_vec())?;
    mesh.load_normals(vec![Vec3::ZERO; TRIANGLE_VERTICES.len()])?;
    mesh.load_uvs(TRIANGLE_UVS.to_vec())?;
    let geometry = GeometryBuffer::from_parts(TRIANGLE_VERTICES.to_vec(), TRIANGLE_INDICES.to_vec())?;
    Ok((mesh, Collider::from_geometry(geometry)))
}

/// One object: a unit right triangle as both mesh and collider.
///
/// Normals are zero, UVs are `(0,0) (0,1) (1,1)`, the pivot is
/// [`TRIANGLE_PIVOT`] and the rotation [`TRIANGLE_ROTATION`].
pub fn triangle_object() -> PhysicalObject {
    let mut object = PhysicalObject::new();
    match triangle_parts() {
        Ok((mesh, collider)) => {
            object.set_mesh(mesh);
            object.set_collider(collider);
        }
        Err(err) => error!(%err, "triangle fixture rejected; leaving geometry empty"),
    }
    object.set_mesh_pivot(TRIANGLE_PIVOT);
    object.set_rotation(TRIANGLE_ROTATION);
    object
}

/// A scene of `count` [`triangle_object`]s.
pub fn triangle_scene(count: usize) -> Scene {
    let mut scene = Scene::new();
    for _ in 0..count {
        scene.add_object(triangle_object());
    }
    scene
}
