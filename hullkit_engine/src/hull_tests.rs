// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::hull::*;
use crate::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn cube_corners() -> Vec<DVec3> {
    itertools::iproduct!([-1.0, 1.0], [-1.0, 1.0], [-1.0, 1.0])
        .map(|(x, y, z)| DVec3::new(x, y, z))
        .collect()
}

fn random_box(seed: u64, n: usize) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            DVec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect()
}

fn random_ball(seed: u64, n: usize) -> Vec<DVec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    while points.len() < n {
        let p = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() <= 1.0 {
            points.push(p);
        }
    }
    points
}

/// Hull vertex positions, in lexicographic order.
fn sorted_vertices(hull: &ConvexHull) -> Vec<Vec3Ord> {
    hull.mesh()
        .vertex_positions()
        .into_iter()
        .map(|(_, p)| p.to_ord())
        .sorted()
        .collect()
}

#[derive(Clone)]
struct Shape {
    name: &'static str,
    points: Vec<DVec3>,
    vertices: usize,
    faces: usize,
    edges: usize,
}

#[test]
pub fn test_known_shapes() {
    init_logging();

    let tetrahedron = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
    let mut cube_and_origin = cube_corners();
    cube_and_origin.push(DVec3::ZERO);
    let mut tetrahedron_with_interior = tetrahedron.clone();
    tetrahedron_with_interior.extend([
        DVec3::splat(0.1),
        DVec3::new(0.2, 0.1, 0.3),
        DVec3::new(0.01, 0.01, 0.01),
    ]);
    let octahedron = vec![DVec3::X, -DVec3::X, DVec3::Y, -DVec3::Y, DVec3::Z, -DVec3::Z];
    let mut octahedron_with_duplicates = octahedron.clone();
    octahedron_with_duplicates.extend(octahedron.clone());

    let shapes = &[
        Shape {
            name: "tetrahedron",
            points: tetrahedron,
            vertices: 4,
            faces: 4,
            edges: 6,
        },
        Shape {
            name: "cube",
            points: cube_corners(),
            vertices: 8,
            faces: 12,
            edges: 18,
        },
        Shape {
            name: "cube and origin",
            points: cube_and_origin,
            vertices: 8,
            faces: 12,
            edges: 18,
        },
        Shape {
            name: "tetrahedron with interior points",
            points: tetrahedron_with_interior,
            vertices: 4,
            faces: 4,
            edges: 6,
        },
        Shape {
            name: "octahedron",
            points: octahedron,
            vertices: 6,
            faces: 8,
            edges: 12,
        },
        Shape {
            name: "octahedron with duplicates",
            points: octahedron_with_duplicates,
            vertices: 6,
            faces: 8,
            edges: 12,
        },
    ];

    for shape in shapes {
        let hull = ConvexHull::from_points(&shape.points);
        assert_eq!(hull.status(), HullStatus::Complete, "{}", shape.name);
        assert_eq!(hull.mesh().num_vertices(), shape.vertices, "{}", shape.name);
        assert_eq!(hull.faces().len(), shape.faces, "{}", shape.name);
        assert_eq!(hull.stats().edges, shape.edges, "{}", shape.name);
        assert_eq!(hull.mesh().num_halfedges(), 2 * shape.edges, "{}", shape.name);
        validate_hull(&hull).unwrap_or_else(|err| panic!("{}: {err}", shape.name));
        validate_containment(&hull, &shape.points, 0.0)
            .unwrap_or_else(|err| panic!("{}: {err}", shape.name));
    }
}

#[test]
pub fn test_interior_point_is_not_a_vertex() {
    let mut points = cube_corners();
    points.push(DVec3::ZERO);
    let hull = ConvexHull::from_points(&points);
    assert_eq!(hull.hull_point_indices(), (0..8).collect::<Vec<_>>());
    assert!(!hull
        .mesh()
        .vertex_positions()
        .iter()
        .any(|(_, p)| *p == DVec3::ZERO));
}

#[test]
pub fn test_points_on_a_face_plane_are_not_vertices() {
    let points = [
        DVec3::ZERO,
        DVec3::new(4.0, 0.0, 0.0),
        DVec3::new(0.0, 4.0, 0.0),
        DVec3::new(0.0, 0.0, 4.0),
        // On the bottom face
        DVec3::new(1.0, 1.0, 0.0),
        // On the slanted face, x + y + z = 4
        DVec3::new(1.0, 1.0, 2.0),
        // On an edge
        DVec3::new(2.0, 2.0, 0.0),
    ];
    let hull = ConvexHull::from_points(&points);
    assert_eq!(hull.hull_point_indices(), vec![0, 1, 2, 3]);
    assert_eq!(hull.faces().len(), 4);
    validate_hull(&hull).unwrap();
}

#[test]
pub fn test_degenerate_inputs() {
    init_logging();

    let flat: Vec<DVec3> = random_box(1, 50)
        .into_iter()
        .map(|p| DVec3::new(p.x, p.y, 0.5))
        .collect();
    let vertical: Vec<DVec3> = random_box(2, 50)
        .into_iter()
        .map(|p| DVec3::new(2.0, p.y, p.z))
        .collect();
    let line: Vec<DVec3> = (0..10)
        .map(|i| DVec3::new(1.0, 2.0, 3.0) * i as f64)
        .collect();
    let vertical_line: Vec<DVec3> = (0..10).map(|i| DVec3::new(1.0, 1.0, i as f64)).collect();
    let same_point = vec![DVec3::splat(3.0); 6];

    let cases = vec![
        ("empty", vec![], DegenerateReason::TooFewPoints(0)),
        (
            "three points",
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            DegenerateReason::TooFewPoints(3),
        ),
        ("flat", flat, DegenerateReason::Coplanar),
        ("vertical plane", vertical, DegenerateReason::Coplanar),
        ("line", line, DegenerateReason::Collinear),
        ("vertical line", vertical_line, DegenerateReason::Collinear),
        ("same point", same_point, DegenerateReason::Collinear),
    ];

    let strategies = [
        InitialSimplexStrategy::PlanarProjection,
        InitialSimplexStrategy::Spatial { epsilon: 1e-9 },
    ];
    for initial_simplex in strategies {
        let mut hull = ConvexHull::with_config(QuickhullConfig {
            initial_simplex,
            ..Default::default()
        });
        for (name, points, reason) in &cases {
            let status = hull.build(points);
            assert_eq!(status, HullStatus::Degenerate(*reason), "{name}");
            assert!(hull.is_empty(), "{name}");
            assert_eq!(hull.mesh().num_vertices(), 0, "{name}");
            assert_eq!(hull.mesh().num_halfedges(), 0, "{name}");
            assert!(hull.hull_point_indices().is_empty(), "{name}");
        }
    }
}

#[test]
pub fn test_random_clouds_are_contained() {
    init_logging();
    for seed in 0..8 {
        for points in [random_box(seed, 500), random_ball(seed + 100, 500)] {
            let hull = ConvexHull::from_points(&points);
            assert_eq!(hull.status(), HullStatus::Complete);
            validate_hull(&hull).unwrap();
            validate_containment(&hull, &points, 1e-9).unwrap();

            // Every vertex sits exactly on the input point it was made from
            let conn = hull.mesh().read_connectivity();
            let positions = hull.mesh().read_positions();
            let point_indices = hull.mesh().read_point_indices();
            for (v, _) in conn.iter_vertices() {
                let i = point_indices[v].expect("Hull vertex without input point");
                assert_eq!(positions[v], points[i]);
            }

            let vertices = sorted_vertices(&hull);
            assert!(
                vertices.windows(2).all(|w| w[0] != w[1]),
                "Two hull vertices share a position"
            );
        }
    }
}

#[test]
pub fn test_duplicated_random_clouds() {
    init_logging();
    for seed in 0..8 {
        let single = random_ball(seed, 300);
        let doubled = [single.clone(), single.clone()].concat();

        let hull = ConvexHull::from_points(&doubled);
        assert_eq!(hull.status(), HullStatus::Complete);
        validate_hull(&hull).unwrap();
        validate_containment(&hull, &doubled, 1e-9).unwrap();

        let vertices = sorted_vertices(&hull);
        assert!(
            vertices.windows(2).all(|w| w[0] != w[1]),
            "Two hull vertices share a position"
        );
        let expected = sorted_vertices(&ConvexHull::from_points(&single));
        assert_eq!(vertices, expected);
    }
}

#[test]
pub fn test_validate_each_step() {
    let config = QuickhullConfig {
        validate_each_step: true,
        ..Default::default()
    };
    let points = random_ball(7, 300);
    let mut hull = ConvexHull::with_config(config);
    assert_eq!(hull.build(&points), HullStatus::Complete);
    validate_hull(&hull).unwrap();
}

#[test]
pub fn test_hull_of_hull() {
    for seed in 0..4 {
        let points = random_ball(seed, 400);
        let hull = ConvexHull::from_points(&points);
        let vertices: Vec<DVec3> = hull
            .mesh()
            .vertex_positions()
            .into_iter()
            .map(|(_, p)| p)
            .collect();

        let rebuilt = ConvexHull::from_points(&vertices);
        assert_eq!(rebuilt.hull_point_indices().len(), vertices.len());
        assert_eq!(sorted_vertices(&rebuilt), sorted_vertices(&hull));
        assert_eq!(rebuilt.faces().len(), hull.faces().len());
        validate_hull(&rebuilt).unwrap();
    }
}

#[test]
pub fn test_permutation_invariance() {
    let mut rng = StdRng::seed_from_u64(42);
    for seed in 0..4 {
        let mut points = random_box(seed, 300);
        let reference = sorted_vertices(&ConvexHull::from_points(&points));
        for _ in 0..3 {
            points.shuffle(&mut rng);
            let hull = ConvexHull::from_points(&points);
            assert_eq!(sorted_vertices(&hull), reference);
            validate_hull(&hull).unwrap();
        }
    }
}

#[test]
pub fn test_input_point_types() {
    let cube_f32: Vec<Vec3> = cube_corners().iter().map(|p| p.as_vec3()).collect();
    let cube_arrays: Vec<[f32; 3]> = cube_f32.iter().map(|p| p.to_array()).collect();
    let cube_tuples: Vec<(f64, f64, f64)> = cube_corners().iter().map(|p| (p.x, p.y, p.z)).collect();

    let expected = sorted_vertices(&ConvexHull::from_points(&cube_corners()));
    assert_eq!(sorted_vertices(&ConvexHull::from_points(&cube_f32)), expected);
    assert_eq!(sorted_vertices(&ConvexHull::from_points(&cube_arrays)), expected);
    assert_eq!(sorted_vertices(&ConvexHull::from_points(&cube_tuples)), expected);
}

#[test]
pub fn test_triangles_wind_outwards() {
    let points = random_ball(3, 200);
    let hull = ConvexHull::from_points(&points);
    let (vertices, indices) = hull.to_indexed_triangles();
    let center = vertices.iter().fold(DVec3::ZERO, |acc, &p| acc + p) / vertices.len() as f64;
    assert_eq!(indices.len(), hull.triangles().len());
    for [i, j, k] in indices {
        let [a, b, c] = [i, j, k].map(|i| vertices[i as usize]);
        assert!(orient3d(a, b, c, center) < 0.0);
    }
}
