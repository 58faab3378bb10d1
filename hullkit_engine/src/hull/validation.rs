// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::prelude::*;

use super::{ConvexHull, FaceRegistry};

/// Checks that the hull is a closed triangulated 2-manifold with no leftover
/// isolated vertices.
pub fn validate_hull(hull: &ConvexHull) -> Result<()> {
    validate_manifold(hull.mesh(), hull.face_registry(), false)
}

/// Checks that no point in `points` lies farther than `tolerance` outside the
/// plane of any hull face.
pub fn validate_containment<P: HullPoint>(
    hull: &ConvexHull,
    points: &[P],
    tolerance: f64,
) -> Result<()> {
    let registry = hull.face_registry();
    for face in registry.face_ids() {
        let [a, b, c] = registry.face_positions(hull.mesh(), face);
        for (i, point) in points.iter().enumerate() {
            let point = point.to_dvec3();
            if !point.is_finite() {
                continue;
            }
            let distance = signed_distance(a, b, c, point);
            if distance > tolerance {
                bail!("Point {i} at {point} is {distance} outside face {face:?}");
            }
        }
    }
    Ok(())
}

/// Structural checks on a mesh and the faces registered on it. Isolated
/// vertices are only accepted if `allow_isolated` is set, since the builder
/// leaves some behind until it finishes.
pub fn validate_manifold(
    mesh: &HalfEdgeMesh,
    faces: &FaceRegistry,
    allow_isolated: bool,
) -> Result<()> {
    let conn = mesh.read_connectivity();
    let halfedge_faces = faces.read_halfedge_faces(mesh);

    let mut degrees: HashMap<VertexId, usize> = HashMap::new();
    for (h, halfedge) in conn.iter_halfedges() {
        let walk = conn.at_halfedge(h);
        match walk.twin().twin().try_end() {
            Err(err) => bail!("Broken twin link at {h:?}: {err}"),
            Ok(back) if back != h => bail!("The twin of {:?} is not {h:?}", halfedge.twin()),
            Ok(_) => {}
        }
        match walk.next().prev().try_end() {
            Err(err) => bail!("Broken next link at {h:?}: {err}"),
            Ok(back) if back != h => bail!("The next of {h:?} does not point back to it"),
            Ok(_) => {}
        }
        if walk.next().src().try_end()? != walk.dst().try_end()? {
            bail!("{h:?} and its next are not chained");
        }
        match halfedge_faces[h] {
            None => bail!("{h:?} does not border any face"),
            Some(face) if !faces.contains(face) => bail!("{h:?} borders removed face {face:?}"),
            Some(_) => {}
        }
        *degrees.entry(halfedge.vertex()).or_default() += 1;
    }

    for (face, data) in faces.iter() {
        if !conn.halfedge_exists(data.halfedge()) {
            bail!("The halfedge of {face:?} was deleted");
        }
        let cycle: SVec<HalfEdgeId> = conn.halfedge_loop_iter(data.halfedge()).take(4).collect();
        if cycle.len() != 3 {
            bail!("{face:?} is not a triangle");
        }
        for h in cycle {
            if halfedge_faces[h] != Some(face) {
                bail!("{h:?} is in the cycle of {face:?}, but maps to {:?}", halfedge_faces[h]);
            }
        }
    }

    let mut isolated = 0;
    for (v, vertex) in conn.iter_vertices() {
        let degree = degrees.get(&v).copied().unwrap_or(0);
        match vertex.halfedge() {
            None if degree > 0 => bail!("{v:?} has {degree} edges but no outgoing halfedge"),
            None if allow_isolated => isolated += 1,
            None => bail!("{v:?} is isolated"),
            Some(h) => {
                if conn.at_halfedge(h).src().try_end() != Ok(v) {
                    bail!("The outgoing halfedge of {v:?} does not start at it");
                }
                // A single fan around the vertex must reach all its edges
                let fan = conn.outgoing_halfedges_iter(v).take(degree + 1).count();
                if fan != degree {
                    bail!("{v:?} has {degree} edges but its fan reaches {fan}");
                }
            }
        }
    }

    if !faces.is_empty() {
        let v = (conn.num_vertices() - isolated) as i64;
        let e = conn.num_edges() as i64;
        let f = faces.len() as i64;
        if v - e + f != 2 {
            bail!("Euler characteristic is {}, expected 2 (V={v}, E={e}, F={f})", v - e + f);
        }
    }

    Ok(())
}
