// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cell::{Ref, RefMut};

use crate::prelude::*;

use slotmap::SlotMap;

/// A triangular face, identified by one of its halfedges.
#[derive(Debug, Clone)]
pub struct Face {
    halfedge: HalfEdgeId,
}

impl Face {
    pub fn halfedge(&self) -> HalfEdgeId {
        self.halfedge
    }
}

/// Channel ids for the per-face bookkeeping of the hull builder.
#[derive(Debug, Clone)]
pub struct FaceChannels {
    /// Indices of the input points strictly outside the face's plane.
    pub outside_set: ChannelId<FaceId, Vec<usize>>,
    /// The member of `outside_set` farthest from the face's plane.
    pub farthest_point: ChannelId<FaceId, Option<usize>>,
    /// Number of the last iteration whose visibility search reached this face.
    pub visit_stamp: ChannelId<FaceId, u32>,
}

/// The faces of a hull under construction. Faces live outside the mesh: the
/// registry owns their arena and their channels, and annotates the mesh
/// halfedges with the face they border through a halfedge channel named
/// `face`.
///
/// Removing a face drops all its channel values, so stale bookkeeping never
/// outlives the face it belonged to.
#[derive(Debug, Clone)]
pub struct FaceRegistry {
    faces: SlotMap<FaceId, Face>,
    pub channels: MeshChannels,
    face_channels: FaceChannels,
    halfedge_face: ChannelId<HalfEdgeId, Option<FaceId>>,
}

impl FaceRegistry {
    /// Creates an empty registry, registering the `face` halfedge channel on
    /// `mesh`.
    pub fn new(mesh: &mut HalfEdgeMesh) -> Self {
        let mut channels = MeshChannels::default();
        let face_channels = FaceChannels {
            outside_set: channels.ensure_channel("outside_set", Vec::new()),
            farthest_point: channels.ensure_channel("farthest_point", None),
            visit_stamp: channels.ensure_channel("visit_stamp", 0),
        };
        Self {
            faces: SlotMap::with_key(),
            channels,
            face_channels,
            halfedge_face: mesh.add_halfedge_property("face", None),
        }
    }

    /// Links the three halfedges into a closed cycle and registers the cycle
    /// as a new face.
    pub fn add_triangle_face(&mut self, mesh: &HalfEdgeMesh, edges: [HalfEdgeId; 3]) -> FaceId {
        let [e1, e2, e3] = edges;
        edit_ops::add_triangle(&mut mesh.write_connectivity(), e1, e2, e3);
        let face = self.faces.insert(Face { halfedge: e1 });
        let mut halfedge_face = self.write_halfedge_faces(mesh);
        for h in edges {
            halfedge_face[h] = Some(face);
        }
        face
    }

    /// Unregisters `face`. Its halfedges are left in the mesh, but no longer
    /// border any face.
    pub fn remove_face(&mut self, mesh: &HalfEdgeMesh, face: FaceId) {
        let halfedges = self.face_halfedges(mesh, face);
        let mut halfedge_face = self.write_halfedge_faces(mesh);
        for h in halfedges {
            if halfedge_face[h] == Some(face) {
                halfedge_face[h] = None;
            }
        }
        self.faces.remove(face);
        self.channels.remove_key(face);
    }

    /// The three halfedges of `face`, in cycle order. Panics if the face
    /// cycle is not a triangle.
    pub fn face_halfedges(&self, mesh: &HalfEdgeMesh, face: FaceId) -> [HalfEdgeId; 3] {
        mesh.read_connectivity()
            .halfedge_loop_iter(self[face].halfedge)
            .collect_triple()
    }

    /// The three corners of `face`, in outward winding order.
    pub fn face_vertices(&self, mesh: &HalfEdgeMesh, face: FaceId) -> [VertexId; 3] {
        let halfedges = self.face_halfedges(mesh, face);
        let conn = mesh.read_connectivity();
        let vertices = halfedges.map(|h| conn.src_vertex(h));
        vertices
    }

    pub fn face_positions(&self, mesh: &HalfEdgeMesh, face: FaceId) -> [DVec3; 3] {
        let vertices = self.face_vertices(mesh, face);
        let positions = mesh.read_positions();
        let points = vertices.map(|v| positions[v]);
        points
    }

    /// The face bordered by `h`, if any.
    pub fn face_of(&self, mesh: &HalfEdgeMesh, h: HalfEdgeId) -> Option<FaceId> {
        self.read_halfedge_faces(mesh)[h]
    }

    pub fn contains(&self, face: FaceId) -> bool {
        self.faces.contains_key(face)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter()
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// Drops every face along with its channel values. The halfedge
    /// annotations are cleared too.
    pub fn clear(&mut self, mesh: &HalfEdgeMesh) {
        self.faces.clear();
        self.channels.clear_values();
        self.write_halfedge_faces(mesh).clear();
    }

    pub fn read_halfedge_faces<'a>(
        &self,
        mesh: &'a HalfEdgeMesh,
    ) -> Ref<'a, Channel<HalfEdgeId, Option<FaceId>>> {
        mesh.channels
            .read_channel(self.halfedge_face)
            .expect("Could not read halfedge faces")
    }

    pub fn write_halfedge_faces<'a>(
        &self,
        mesh: &'a HalfEdgeMesh,
    ) -> RefMut<'a, Channel<HalfEdgeId, Option<FaceId>>> {
        mesh.channels
            .write_channel(self.halfedge_face)
            .expect("Could not write halfedge faces")
    }

    pub fn read_outside_sets(&self) -> Ref<'_, Channel<FaceId, Vec<usize>>> {
        self.channels
            .read_channel(self.face_channels.outside_set)
            .expect("Could not read outside sets")
    }

    pub fn write_outside_sets(&self) -> RefMut<'_, Channel<FaceId, Vec<usize>>> {
        self.channels
            .write_channel(self.face_channels.outside_set)
            .expect("Could not write outside sets")
    }

    pub fn read_farthest_points(&self) -> Ref<'_, Channel<FaceId, Option<usize>>> {
        self.channels
            .read_channel(self.face_channels.farthest_point)
            .expect("Could not read farthest points")
    }

    pub fn write_farthest_points(&self) -> RefMut<'_, Channel<FaceId, Option<usize>>> {
        self.channels
            .write_channel(self.face_channels.farthest_point)
            .expect("Could not write farthest points")
    }

    pub fn write_visit_stamps(&self) -> RefMut<'_, Channel<FaceId, u32>> {
        self.channels
            .write_channel(self.face_channels.visit_stamp)
            .expect("Could not write visit stamps")
    }
}

impl std::ops::Index<FaceId> for FaceRegistry {
    type Output = Face;

    fn index(&self, face: FaceId) -> &Self::Output {
        self.faces
            .get(face)
            .unwrap_or_else(|| panic!("FaceId index error for {face:?}. Has the face been removed?"))
    }
}
