// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

use super::*;

#[cold]
fn erased(id: impl std::fmt::Debug) -> ! {
    panic!("Mesh access through {id:?}, which was erased")
}

impl Index<VertexId> for MeshConnectivity {
    type Output = Vertex;

    fn index(&self, v: VertexId) -> &Vertex {
        self.vertices.get(v).unwrap_or_else(|| erased(v))
    }
}

impl IndexMut<VertexId> for MeshConnectivity {
    fn index_mut(&mut self, v: VertexId) -> &mut Vertex {
        self.vertices.get_mut(v).unwrap_or_else(|| erased(v))
    }
}

impl Index<HalfEdgeId> for MeshConnectivity {
    type Output = HalfEdge;

    fn index(&self, h: HalfEdgeId) -> &HalfEdge {
        self.halfedges.get(h).unwrap_or_else(|| erased(h))
    }
}

impl IndexMut<HalfEdgeId> for MeshConnectivity {
    fn index_mut(&mut self, h: HalfEdgeId) -> &mut HalfEdge {
        self.halfedges.get_mut(h).unwrap_or_else(|| erased(h))
    }
}

impl MeshConnectivity {
    /// `None` once the vertex is erased.
    pub fn vertex(&self, v: VertexId) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    /// `None` once the halfedge is erased.
    pub fn halfedge(&self, h: HalfEdgeId) -> Option<&HalfEdge> {
        self.halfedges.get(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "was erased")]
    fn test_erased_vertex_index_panics() {
        let mesh = HalfEdgeMesh::new();
        let v = mesh.add_vertex(DVec3::ZERO);
        mesh.erase_vertex(v);
        let conn = mesh.read_connectivity();
        assert!(conn.vertex(v).is_none());
        let _ = &conn[v];
    }
}
