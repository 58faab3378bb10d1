// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::VecDeque;

use crate::prelude::*;

use super::{validation, FaceRegistry, InitialSimplexStrategy, QuickhullConfig};

/// Why a build stopped before producing a hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateReason {
    /// Fewer than four finite input points.
    TooFewPoints(usize),
    /// All the points lie on a line (or on a single spot).
    Collinear,
    /// All the points lie on a plane.
    Coplanar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HullStatus {
    NotBuilt,
    /// The input has no 3D hull. The mesh is left empty.
    Degenerate(DegenerateReason),
    Complete,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HullStats {
    pub input_points: usize,
    /// Number of points added on top of the initial tetrahedron.
    pub iterations: usize,
    pub vertices: usize,
    pub faces: usize,
    pub edges: usize,
}

/// The convex hull of a point set, built with the quickhull algorithm.
///
/// The hull boundary is a [`HalfEdgeMesh`] whose vertices remember the input
/// point they came from (the `point_index` channel), plus a [`FaceRegistry`]
/// with one outward-facing triangle per face.
///
/// ```
/// use hullkit_engine::hull::{ConvexHull, HullStatus};
///
/// let points = [
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [0.0, 0.0, 1.0],
///     [0.1, 0.1, 0.1],
/// ];
/// let mut hull = ConvexHull::new();
/// assert_eq!(hull.build(&points), HullStatus::Complete);
/// assert_eq!(hull.faces().len(), 4);
/// assert_eq!(hull.hull_point_indices(), vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct ConvexHull {
    config: QuickhullConfig,
    mesh: HalfEdgeMesh,
    faces: FaceRegistry,
    points: Vec<DVec3>,
    status: HullStatus,
    iterations: u32,
}

impl ConvexHull {
    pub fn new() -> Self {
        Self::with_config(QuickhullConfig::default())
    }

    pub fn with_config(config: QuickhullConfig) -> Self {
        let mut mesh = HalfEdgeMesh::new();
        let faces = FaceRegistry::new(&mut mesh);
        Self {
            config,
            mesh,
            faces,
            points: Vec::new(),
            status: HullStatus::NotBuilt,
            iterations: 0,
        }
    }

    /// Shorthand for building a hull with the default config.
    pub fn from_points<P: HullPoint>(points: &[P]) -> Self {
        let mut hull = Self::new();
        hull.build(points);
        hull
    }

    /// Builds the hull of `points`, discarding any previously built hull.
    /// Non-finite points are ignored.
    ///
    /// Degenerate inputs are not an error: the returned status tells why the
    /// mesh was left empty.
    #[profiling::function]
    pub fn build<P: HullPoint>(&mut self, points: &[P]) -> HullStatus {
        self.reset();
        self.points = points.iter().map(|p| p.to_dvec3()).collect();
        log::debug!("Building the convex hull of {} points", self.points.len());

        let candidates: Vec<usize> = (0..self.points.len())
            .filter(|&i| self.points[i].is_finite())
            .collect();
        if candidates.len() < self.points.len() {
            log::warn!(
                "Ignoring {} non-finite input points",
                self.points.len() - candidates.len()
            );
        }
        if candidates.len() < 4 {
            return self.terminate(DegenerateReason::TooFewPoints(candidates.len()));
        }

        let seeds = match self.find_initial_simplex(&candidates) {
            Ok(seeds) => seeds,
            Err(reason) => return self.terminate(reason),
        };
        log::debug!("Initial tetrahedron at points {seeds:?}");
        let initial_faces = self.build_tetrahedron(seeds);

        // Copies of a corner are already on the hull
        let corners = seeds.map(|i| self.points[i]);
        let pool = candidates
            .into_iter()
            .filter(|&i| !corners.contains(&self.points[i]))
            .collect();
        let mut queue = VecDeque::new();
        self.assign_outside_points(&initial_faces, pool, &mut queue);

        // The queue may hold faces that were removed, or that got their
        // points stolen, after being pushed. Those are skipped.
        while let Some(face) = queue.pop_front() {
            if !self.faces.contains(face) {
                continue;
            }
            let apex = match self.faces.read_farthest_points()[face] {
                Some(apex) => apex,
                None => continue,
            };
            self.iterations += 1;
            self.add_point_to_hull(face, apex, &mut queue);

            if self.config.validate_each_step {
                if let Err(err) = validation::validate_manifold(&self.mesh, &self.faces, true) {
                    panic!(
                        "Hull is malformed after iteration {}: {err:?}",
                        self.iterations
                    );
                }
            }
        }

        self.remove_isolated_vertices();
        self.status = HullStatus::Complete;
        log::info!(
            "Convex hull done: {} vertices and {} faces after {} iterations",
            self.mesh.num_vertices(),
            self.faces.len(),
            self.iterations
        );
        self.status
    }

    /// Drops the current hull and the stored input points.
    pub fn reset(&mut self) {
        self.mesh.clear();
        self.faces.clear(&self.mesh);
        self.points.clear();
        self.status = HullStatus::NotBuilt;
        self.iterations = 0;
    }

    fn terminate(&mut self, reason: DegenerateReason) -> HullStatus {
        log::warn!("Degenerate input ({reason:?}). The hull is left empty");
        self.mesh.clear();
        self.faces.clear(&self.mesh);
        self.status = HullStatus::Degenerate(reason);
        self.status
    }

    /// Picks the four corners of the initial tetrahedron, as input indices.
    fn find_initial_simplex(&self, candidates: &[usize]) -> Result<[usize; 4], DegenerateReason> {
        let points = &self.points;
        let a = candidates[0];
        let pa = points[a];

        let b = match self.config.initial_simplex {
            InitialSimplexStrategy::PlanarProjection => candidates
                .iter_cpy()
                .find(|&i| points[i].x != pa.x || points[i].y != pa.y),
            InitialSimplexStrategy::Spatial { epsilon } => candidates
                .iter_cpy()
                .find(|&i| points[i].distance(pa) > epsilon),
        }
        .ok_or(DegenerateReason::Collinear)?;
        let pb = points[b];

        let c = match self.config.initial_simplex {
            InitialSimplexStrategy::PlanarProjection => candidates
                .iter_cpy()
                .find(|&i| orient2d(pa, pb, points[i]) != 0.0),
            InitialSimplexStrategy::Spatial { epsilon } => {
                let dir = (pb - pa).normalize();
                candidates
                    .iter_cpy()
                    .find(|&i| dir.cross(points[i] - pa).length() > epsilon)
            }
        };
        let c = match c {
            Some(c) => c,
            // In the planar test, a miss means every point lies on the
            // vertical plane through a and b. Check if they also share a line.
            None if candidates
                .iter()
                .all(|&i| (pb - pa).cross(points[i] - pa) == DVec3::ZERO) =>
            {
                return Err(DegenerateReason::Collinear)
            }
            None => match self.config.initial_simplex {
                InitialSimplexStrategy::PlanarProjection => return Err(DegenerateReason::Coplanar),
                InitialSimplexStrategy::Spatial { .. } => return Err(DegenerateReason::Collinear),
            },
        };
        let pc = points[c];

        let mut d = None;
        let mut max_volume = 0.0;
        for i in candidates.iter_cpy() {
            let volume = orient3d(pa, pb, pc, points[i]).abs();
            if volume > max_volume {
                d = Some(i);
                max_volume = volume;
            }
        }
        let d = d.ok_or(DegenerateReason::Coplanar)?;
        if let InitialSimplexStrategy::Spatial { epsilon } = self.config.initial_simplex {
            let height = max_volume / triangle_normal(pa, pb, pc).length();
            if height <= epsilon {
                return Err(DegenerateReason::Coplanar);
            }
        }

        Ok([a, b, c, d])
    }

    /// Adds the tetrahedron with corners at the `seeds` to the mesh, with all
    /// of its faces pointing outwards. Returns its four faces.
    fn build_tetrahedron(&mut self, seeds: [usize; 4]) -> [FaceId; 4] {
        let [pa, pb, pc, pd] = seeds.map(|i| self.points[i]);
        let volume = orient3d(pa, pb, pc, pd);

        let vertices = seeds.map(|i| self.add_hull_vertex(i));
        let mut edges = HashMap::new();
        {
            let mut conn = self.mesh.write_connectivity();
            for (i, j) in (0..4).tuple_combinations() {
                let h = edit_ops::add_edge(&mut conn, vertices[i], vertices[j]);
                edges.insert((i, j), h);
                edges.insert((j, i), conn.twin(h));
            }
        }

        // When d is above the plane of (a, b, c), that face must be flipped,
        // and so do the others.
        let triangles = if volume > 0.0 {
            [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
        } else {
            [[0, 1, 2], [0, 3, 1], [1, 3, 2], [2, 3, 0]]
        };
        triangles.map(|[i, j, k]| {
            self.faces
                .add_triangle_face(&self.mesh, [edges[&(i, j)], edges[&(j, k)], edges[&(k, i)]])
        })
    }

    fn add_hull_vertex(&self, point: usize) -> VertexId {
        let v = self.mesh.add_vertex(self.points[point]);
        self.mesh.write_point_indices()[v] = Some(point);
        v
    }

    /// Moves every point in `pool` strictly outside one of `faces` into the
    /// outside set of the first such face. Faces that get points are pushed
    /// to `queue`. The remaining points are inside the hull and dropped.
    #[profiling::function]
    fn assign_outside_points(
        &mut self,
        faces: &[FaceId],
        mut pool: Vec<usize>,
        queue: &mut VecDeque<FaceId>,
    ) {
        for &face in faces {
            if pool.is_empty() {
                break;
            }
            let [a, b, c] = self.faces.face_positions(&self.mesh, face);
            if triangle_normal(a, b, c) == DVec3::ZERO {
                continue;
            }
            let mut outside = Vec::new();
            let mut farthest = None;
            let mut max_distance = 0.0;
            pool.retain(|&i| {
                let point = self.points[i];
                // Rounding can put a copy of a corner slightly above the plane
                let on_corner = point == a || point == b || point == c;
                if on_corner || !is_strictly_outside(a, b, c, point) {
                    return true;
                }
                let distance = signed_distance(a, b, c, point);
                if farthest.is_none() || distance > max_distance {
                    farthest = Some(i);
                    max_distance = distance;
                }
                outside.push(i);
                false
            });
            if farthest.is_some() {
                self.faces.write_outside_sets()[face] = outside;
                self.faces.write_farthest_points()[face] = farthest;
                queue.push_back(face);
            }
        }
        if !pool.is_empty() {
            log::trace!("{} points fell inside the hull", pool.len());
        }
    }

    /// Replaces every face visible from input point `apex` with a fan of
    /// triangles around it. `face` must be visible.
    #[profiling::function]
    fn add_point_to_hull(&mut self, face: FaceId, apex: usize, queue: &mut VecDeque<FaceId>) {
        let visible = self.visible_faces(face, self.points[apex]);
        let (mut pool, horizon_edges) = self.remove_faces(&visible);
        let horizon = self.extract_horizon(&horizon_edges);
        log::trace!(
            "Iteration {}: point {apex} sees {} faces, horizon of {} edges",
            self.iterations,
            visible.len(),
            horizon.len()
        );
        let new_faces = self.cap_horizon(apex, &horizon);
        let apex_point = self.points[apex];
        pool.retain(|&i| self.points[i] != apex_point);
        self.assign_outside_points(&new_faces, pool, queue);
    }

    /// Breadth-first search over the faces adjacent to `start`, collecting the
    /// connected region of faces that have `point` strictly outside.
    #[profiling::function]
    fn visible_faces(&self, start: FaceId, point: DVec3) -> Vec<FaceId> {
        let stamp = self.iterations;
        let conn = self.mesh.read_connectivity();
        let halfedge_faces = self.faces.read_halfedge_faces(&self.mesh);
        let mut stamps = self.faces.write_visit_stamps();

        let mut visible = vec![start];
        let mut worklist = VecDeque::from([start]);
        stamps[start] = stamp;
        while let Some(face) = worklist.pop_front() {
            for h in conn.halfedge_loop_iter(self.faces[face].halfedge()) {
                let neighbor = halfedge_faces[conn.twin(h)]
                    .unwrap_or_else(|| panic!("The twin of {h:?} does not border any face"));
                if stamps[neighbor] == stamp {
                    continue;
                }
                stamps[neighbor] = stamp;
                let [a, b, c] = self.faces.face_positions(&self.mesh, neighbor);
                if is_strictly_outside(a, b, c, point) {
                    visible.push(neighbor);
                    worklist.push_back(neighbor);
                }
            }
        }
        visible
    }

    /// Removes the `visible` faces and the edges between them. Returns the
    /// union of their outside sets, and the surviving halfedges of the removed
    /// faces, which are now the horizon.
    fn remove_faces(&mut self, visible: &[FaceId]) -> (Vec<usize>, Vec<HalfEdgeId>) {
        let mut pool = Vec::new();
        let mut boundary = Vec::with_capacity(visible.len() * 3);
        for &face in visible {
            pool.extend(self.faces.write_outside_sets().take(face));
            boundary.extend(self.faces.face_halfedges(&self.mesh, face));
            self.faces.remove_face(&self.mesh, face);
        }

        let mut horizon_edges = Vec::new();
        for h in boundary {
            // Edges between two removed faces show up twice
            if !self.mesh.read_connectivity().halfedge_exists(h) {
                continue;
            }
            let twin = self.mesh.read_connectivity().twin(h);
            if self.faces.face_of(&self.mesh, twin).is_none() {
                self.mesh.erase_edge(h);
            } else {
                horizon_edges.push(h);
            }
        }
        (pool, horizon_edges)
    }

    /// Sorts the horizon edges in loop order.
    fn extract_horizon(&self, horizon_edges: &[HalfEdgeId]) -> Vec<HalfEdgeId> {
        let start = match horizon_edges.first() {
            Some(&h) => h,
            None => panic!("Removing the visible faces left no horizon"),
        };
        let horizon: Vec<HalfEdgeId> = self
            .mesh
            .read_connectivity()
            .halfedge_loop_iter(start)
            .collect();
        assert_eq!(
            horizon.len(),
            horizon_edges.len(),
            "The horizon is not a single closed loop"
        );
        horizon
    }

    /// Connects every horizon vertex to a new vertex at input point `apex`,
    /// closing the hole with one triangle per horizon edge.
    fn cap_horizon(&mut self, apex: usize, horizon: &[HalfEdgeId]) -> Vec<FaceId> {
        let p = self.add_hull_vertex(apex);
        let mut conn = self.mesh.write_connectivity();
        let (spokes, spoke_twins): (Vec<_>, Vec<_>) = horizon
            .iter_cpy()
            .map(|h| {
                let src = conn.src_vertex(h);
                let spoke = edit_ops::add_edge(&mut conn, src, p);
                (spoke, conn.twin(spoke))
            })
            .unzip();
        drop(conn);

        // Horizon edge i goes from u_i to u_i+1. Its triangle is closed by
        // the spoke u_i+1 -> p and the way back p -> u_i.
        let next_spokes = spokes.iter_cpy().cycle().skip(1);
        horizon
            .iter_cpy()
            .zip(next_spokes)
            .zip(spoke_twins.iter_cpy())
            .map(|((h, to_apex), from_apex)| {
                self.faces
                    .add_triangle_face(&self.mesh, [h, to_apex, from_apex])
            })
            .collect()
    }

    fn remove_isolated_vertices(&mut self) {
        let isolated: Vec<VertexId> = self
            .mesh
            .read_connectivity()
            .iter_vertices()
            .filter(|(_, vertex)| vertex.halfedge().is_none())
            .map(|(v, _)| v)
            .collect();
        if !isolated.is_empty() {
            log::debug!("Removing {} isolated vertices", isolated.len());
        }
        for v in isolated {
            self.mesh.erase_vertex(v);
        }
    }

    pub fn status(&self) -> HullStatus {
        self.status
    }

    pub fn config(&self) -> &QuickhullConfig {
        &self.config
    }

    /// True when there is no hull: nothing was built yet, or the input was
    /// degenerate.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn mesh(&self) -> &HalfEdgeMesh {
        &self.mesh
    }

    pub fn face_registry(&self) -> &FaceRegistry {
        &self.faces
    }

    /// The points given to the last build, widened to f64.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// One halfedge per face. The face is the `next` cycle of the halfedge.
    pub fn faces(&self) -> Vec<HalfEdgeId> {
        self.faces.iter().map(|(_, face)| face.halfedge()).collect()
    }

    /// The corners of every face, wound counter-clockwise when seen from
    /// outside the hull.
    pub fn triangles(&self) -> Vec<[VertexId; 3]> {
        self.faces
            .face_ids()
            .map(|face| self.faces.face_vertices(&self.mesh, face))
            .collect()
    }

    /// The hull as a compact vertex buffer plus triangle indices into it.
    pub fn to_indexed_triangles(&self) -> (Vec<DVec3>, Vec<[u32; 3]>) {
        let conn = self.mesh.read_connectivity();
        let mapping = conn.vertex_mapping();
        let positions = self.mesh.read_positions();
        let vertices = conn.iter_vertices().map(|(v, _)| positions[v]).collect();
        let indices = self
            .triangles()
            .into_iter()
            .map(|tri| tri.map(|v| mapping[v]))
            .collect();
        (vertices, indices)
    }

    /// Indices of the input points that ended up as hull vertices, sorted.
    pub fn hull_point_indices(&self) -> Vec<usize> {
        let conn = self.mesh.read_connectivity();
        let point_indices = self.mesh.read_point_indices();
        conn.iter_vertices()
            .filter_map(|(v, _)| point_indices[v])
            .sorted()
            .collect()
    }

    pub fn stats(&self) -> HullStats {
        let conn = self.mesh.read_connectivity();
        HullStats {
            input_points: self.points.len(),
            iterations: self.iterations as usize,
            vertices: conn.num_vertices(),
            faces: self.faces.len(),
            edges: conn.num_edges(),
        }
    }
}

impl Default for ConvexHull {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron_points() -> Vec<DVec3> {
        vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]
    }

    #[test]
    fn test_initial_simplex_planar() {
        let mut hull = ConvexHull::new();
        // Same (x, y) as the first point, so it can't be the second one.
        let points = vec![
            DVec3::ZERO,
            DVec3::Z,
            DVec3::X,
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::Y,
            DVec3::new(0.2, 0.2, 5.0),
        ];
        hull.points = points.clone();
        let seeds = hull.find_initial_simplex(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(&seeds[..3], &[0, 2, 4]);
        assert_eq!(seeds[3], 5);
    }

    #[test]
    fn test_initial_simplex_spatial() {
        let mut hull = ConvexHull::with_config(QuickhullConfig {
            initial_simplex: InitialSimplexStrategy::Spatial { epsilon: 0.01 },
            ..Default::default()
        });
        hull.points = vec![
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 0.001),
            DVec3::Z,
            DVec3::new(0.0, 0.005, 0.5),
            DVec3::X,
            DVec3::Y,
        ];
        let seeds = hull.find_initial_simplex(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(seeds, [0, 2, 4, 5]);
    }

    #[test]
    fn test_spatial_rejects_nearly_flat_input() {
        let mut hull = ConvexHull::with_config(QuickhullConfig {
            initial_simplex: InitialSimplexStrategy::Spatial { epsilon: 0.01 },
            ..Default::default()
        });
        let points = [
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::new(1.0, 1.0, 0.001),
        ];
        assert_eq!(
            hull.build(&points),
            HullStatus::Degenerate(DegenerateReason::Coplanar)
        );
        // The default strategy only rejects exactly flat input
        assert_eq!(ConvexHull::from_points(&points).status(), HullStatus::Complete);
    }

    #[test]
    fn test_tetrahedron_faces_point_outwards() {
        for points in [tetrahedron_points(), tetrahedron_points().into_iter().rev().collect()] {
            let hull = ConvexHull::from_points(&points);
            let centroid = points.iter().fold(DVec3::ZERO, |acc, &p| acc + p) / 4.0;
            for face in hull.face_registry().face_ids() {
                let [a, b, c] = hull.face_registry().face_positions(hull.mesh(), face);
                assert!(orient3d(a, b, c, centroid) < 0.0);
            }
        }
    }

    #[test]
    fn test_sphere_points_are_all_on_the_hull() {
        // Many faces get removed while still queued with points on a sphere
        let n = 200;
        let golden_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
        let points: Vec<DVec3> = (0..n)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
                let r = (1.0 - y * y).sqrt();
                let theta = i as f64 * golden_angle;
                DVec3::new(r * theta.cos(), y, r * theta.sin())
            })
            .collect();
        let mut hull = ConvexHull::with_config(QuickhullConfig {
            validate_each_step: true,
            ..Default::default()
        });
        assert_eq!(hull.build(&points), HullStatus::Complete);
        assert_eq!(hull.hull_point_indices(), (0..n).collect::<Vec<_>>());
        assert_eq!(hull.faces().len(), 2 * n - 4);
        validation::validate_hull(&hull).unwrap();
        validation::validate_containment(&hull, &points, 1e-9).unwrap();
    }

    #[test]
    fn test_non_finite_points_are_ignored() {
        let mut points = tetrahedron_points();
        points.insert(2, DVec3::new(f64::NAN, 0.0, 0.0));
        points.push(DVec3::splat(f64::INFINITY));
        let hull = ConvexHull::from_points(&points);
        assert_eq!(hull.status(), HullStatus::Complete);
        assert_eq!(hull.hull_point_indices(), vec![0, 1, 3, 4]);

        let hull = ConvexHull::from_points(&points[..4]);
        assert_eq!(
            hull.status(),
            HullStatus::Degenerate(DegenerateReason::TooFewPoints(3))
        );
    }

    #[test]
    fn test_stats() {
        let mut points = tetrahedron_points();
        points.push(DVec3::splat(1.0));
        let hull = ConvexHull::from_points(&points);
        let stats = hull.stats();
        assert_eq!(stats.input_points, 5);
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.vertices, 5);
        assert_eq!(stats.faces, 6);
        assert_eq!(stats.edges, 9);
    }

    #[test]
    fn test_indexed_triangles() {
        let hull = ConvexHull::from_points(&tetrahedron_points());
        let (vertices, indices) = hull.to_indexed_triangles();
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 4);
        for [i, j, k] in indices {
            let (a, b, c) = (vertices[i as usize], vertices[j as usize], vertices[k as usize]);
            let normal = triangle_normal(a, b, c);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - DVec3::splat(0.25)) > 0.0);
        }
    }

    #[test]
    fn test_rebuild_resets_state() {
        let mut hull = ConvexHull::new();
        let mut cube = Vec::new();
        for (x, y, z) in itertools::iproduct!([-1.0, 1.0], [-1.0, 1.0], [-1.0, 1.0]) {
            cube.push(DVec3::new(x, y, z));
        }
        hull.build(&cube);
        assert_eq!(hull.faces().len(), 12);

        hull.build(&tetrahedron_points());
        assert_eq!(hull.faces().len(), 4);
        assert_eq!(hull.mesh().num_vertices(), 4);
        assert_eq!(hull.stats().iterations, 0);
        validation::validate_hull(&hull).unwrap();

        hull.build(&cube[..3]);
        assert!(hull.is_empty());
        assert_eq!(hull.mesh().num_vertices(), 0);
        assert_eq!(hull.points().len(), 3);
    }
}
