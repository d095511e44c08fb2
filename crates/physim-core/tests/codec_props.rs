// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Property tests for the scene buffer: size law, round trip, and hostile input.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use physim_core::wire::{decode_objects, encode_objects, inspect};
use physim_core::{Collider, Mesh, PhysicalObject, Quat, Scene, SceneConfig, Vec2, Vec3};

fn finite() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn vec2() -> impl Strategy<Value = Vec2> {
    (finite(), finite()).prop_map(|(x, y)| Vec2::new(x, y))
}

fn triangles(vertex_count: usize) -> BoxedStrategy<Vec<Vec3>> {
    if vertex_count == 0 {
        return Just(Vec::new()).boxed();
    }
    #[allow(clippy::cast_precision_loss)]
    let max = vertex_count as f32;
    let index = move || (0.0f32..max).prop_map(f32::floor);
    prop::collection::vec(
        (index(), index(), index()).prop_map(|(a, b, c)| Vec3::new(a, b, c)),
        0..6,
    )
    .boxed()
}

fn mesh() -> impl Strategy<Value = Mesh> {
    (0usize..8, any::<bool>())
        .prop_flat_map(|(n, attach)| {
            (
                prop::collection::vec(vec3(), n),
                triangles(n),
                prop::collection::vec(vec3(), n),
                prop::collection::vec(vec2(), n),
                Just(attach),
            )
        })
        .prop_map(|(vertices, tris, normals, uvs, attach)| {
            let mut mesh = Mesh::new();
            let empty = vertices.is_empty();
            mesh.load_vertices(vertices).unwrap();
            mesh.load_triangles(tris).unwrap();
            // A mesh without vertices may go without attributes entirely.
            if !empty || attach {
                mesh.load_normals(normals).unwrap();
                mesh.load_uvs(uvs).unwrap();
            }
            mesh
        })
}

fn collider() -> impl Strategy<Value = Collider> {
    (0usize..8)
        .prop_flat_map(|n| (prop::collection::vec(vec3(), n), triangles(n)))
        .prop_map(|(vertices, tris)| {
            let mut collider = Collider::new();
            collider.load_vertices(vertices).unwrap();
            collider.load_triangles(tris).unwrap();
            collider
        })
}

prop_compose! {
    fn object()(
        mesh in mesh(),
        collider in collider(),
        pivot in vec3(),
        rot in (finite(), finite(), finite(), finite()),
    ) -> PhysicalObject {
        let mut obj = PhysicalObject::new();
        obj.set_mesh(mesh);
        obj.set_collider(collider);
        obj.set_mesh_pivot(pivot);
        obj.set_rotation(Quat::new(rot.0, rot.1, rot.2, rot.3));
        obj
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn encoded_length_is_header_plus_object_lengths(objects in prop::collection::vec(object(), 0..5)) {
        let words = encode_objects(&objects).unwrap();
        let expected = 1 + objects.iter().map(PhysicalObject::serialized_word_length).sum::<usize>();
        prop_assert_eq!(words.len(), expected);
        prop_assert_eq!(words[0] as usize, objects.len());
    }

    #[test]
    fn decode_reproduces_every_field(objects in prop::collection::vec(object(), 0..5)) {
        let words = encode_objects(&objects).unwrap();
        let back = decode_objects(&words, &SceneConfig::default()).unwrap();
        prop_assert_eq!(back.len(), objects.len());
        for (a, b) in back.iter().zip(&objects) {
            prop_assert!(a.same_content(b));
        }
        prop_assert_eq!(encode_objects(&back).unwrap(), words);
    }

    #[test]
    fn objects_without_mesh_vertices_round_trip(collider in collider(), count in 1usize..4) {
        let mut objects: Vec<_> = (0..count).map(|_| PhysicalObject::new()).collect();
        objects[0].set_collider(collider);
        let words = encode_objects(&objects).unwrap();
        let back = decode_objects(&words, &SceneConfig::default()).unwrap();
        for (a, b) in back.iter().zip(&objects) {
            prop_assert!(a.same_content(b));
        }
    }

    #[test]
    fn arbitrary_words_never_panic(words in prop::collection::vec(any::<u32>(), 0..256)) {
        let mut scene = Scene::new();
        let _ = scene.set_all_data(&words);
        let _ = inspect(&words);
    }

    #[test]
    fn small_counts_with_garbage_never_panic(
        head in prop::collection::vec(0u32..8, 0..24),
        tail in prop::collection::vec(any::<u32>(), 0..64),
    ) {
        let mut words = head;
        words.extend(tail);
        let _ = decode_objects(&words, &SceneConfig::default());
    }
}
