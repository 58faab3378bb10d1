// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalError {
    VertexHasNoHalfedge(VertexId),
    VertexDeleted(VertexId),
    HalfEdgeDeleted(HalfEdgeId),
    NoHalfedgeTo(VertexId),
}

impl std::fmt::Display for TraversalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalError::VertexHasNoHalfedge(v) => write!(f, "{v:?} is isolated"),
            TraversalError::VertexDeleted(v) => write!(f, "{v:?} was erased"),
            TraversalError::HalfEdgeDeleted(h) => write!(f, "{h:?} was erased"),
            TraversalError::NoHalfedgeTo(v) => write!(f, "No halfedge leads to {v:?}"),
        }
    }
}

impl std::error::Error for TraversalError {}

/// A chain of navigation steps over a mesh. The first failing step is
/// remembered, and every later step is skipped, so a whole chain like
/// `conn.at_halfedge(h).twin().next().src()` can be checked once at the end.
#[derive(Clone, Copy)]
pub struct Walker<'a, L> {
    conn: &'a MeshConnectivity,
    at: Result<L, TraversalError>,
}

impl MeshConnectivity {
    pub fn at_halfedge(&self, h: HalfEdgeId) -> Walker<'_, HalfEdgeId> {
        Walker { conn: self, at: Ok(h) }
    }

    pub fn at_vertex(&self, v: VertexId) -> Walker<'_, VertexId> {
        Walker { conn: self, at: Ok(v) }
    }
}

impl<'a, L: Copy + std::fmt::Debug> Walker<'a, L> {
    fn step<L2>(self, f: impl FnOnce(&'a MeshConnectivity, L) -> Result<L2, TraversalError>) -> Walker<'a, L2> {
        Walker {
            conn: self.conn,
            at: self.at.and_then(|at| f(self.conn, at)),
        }
    }

    /// Where the walk ended. Panics if any step failed.
    pub fn end(self) -> L {
        match self.at {
            Ok(at) => at,
            Err(err) => panic!("Invalid mesh traversal: {err}"),
        }
    }

    pub fn try_end(self) -> Result<L, TraversalError> {
        self.at
    }
}

fn halfedge_data(conn: &MeshConnectivity, h: HalfEdgeId) -> Result<&HalfEdge, TraversalError> {
    conn.halfedge(h).ok_or(TraversalError::HalfEdgeDeleted(h))
}

impl<'a> Walker<'a, HalfEdgeId> {
    pub fn twin(self) -> Self {
        self.step(|conn, h| Ok(halfedge_data(conn, h)?.twin))
    }

    pub fn next(self) -> Self {
        self.step(|conn, h| Ok(halfedge_data(conn, h)?.next))
    }

    pub fn prev(self) -> Self {
        self.step(|conn, h| Ok(halfedge_data(conn, h)?.prev))
    }

    /// The next outgoing halfedge around the source vertex.
    pub fn rotate(self) -> Self {
        self.twin().next()
    }

    pub fn src(self) -> Walker<'a, VertexId> {
        self.step(|conn, h| Ok(halfedge_data(conn, h)?.vertex))
    }

    pub fn dst(self) -> Walker<'a, VertexId> {
        self.twin().src()
    }

    pub fn endpoints(self) -> Result<(VertexId, VertexId), TraversalError> {
        Ok((self.src().try_end()?, self.dst().try_end()?))
    }
}

impl<'a> Walker<'a, VertexId> {
    pub fn halfedge(self) -> Walker<'a, HalfEdgeId> {
        self.step(|conn, v| {
            conn.vertex(v)
                .ok_or(TraversalError::VertexDeleted(v))?
                .halfedge
                .ok_or(TraversalError::VertexHasNoHalfedge(v))
        })
    }

    /// All the outgoing halfedges. Empty for isolated vertices.
    pub fn outgoing(self) -> Result<SVec<HalfEdgeId>, TraversalError> {
        let v = self.at?;
        if self.conn.vertex(v).is_none() {
            return Err(TraversalError::VertexDeleted(v));
        }
        Ok(self.conn.outgoing_halfedges_iter(v).collect())
    }

    /// The halfedge going from this vertex to `other`.
    pub fn halfedge_to(self, other: VertexId) -> Walker<'a, HalfEdgeId> {
        let found = self.outgoing().and_then(|outgoing| {
            outgoing
                .into_iter()
                .find(|&h| self.conn.dst_vertex(h) == other)
                .ok_or(TraversalError::NoHalfedgeTo(other))
        });
        Walker {
            conn: self.conn,
            at: found,
        }
    }

    pub fn degree(self) -> Result<usize, TraversalError> {
        Ok(self.outgoing()?.len())
    }
}
