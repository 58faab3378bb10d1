// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local edit operations. All of them run in time bounded by the degree of
//! the vertices involved, never by the size of the mesh.
//!
//! Misuse (erasing an erased edge, joining halfedges whose endpoints do not
//! match) means an invariant of the caller is already broken, so these
//! functions panic instead of returning errors.

use super::*;

/// Allocates a twin pair going from `src` to `dst` and returns the `src ->
/// dst` halfedge. The pair is not linked into any face cycle: it forms a
/// closed two-element cycle on its own. If an endpoint was isolated, its
/// outgoing halfedge is set to the new pair.
pub fn add_edge(mesh: &mut MeshConnectivity, src: VertexId, dst: VertexId) -> HalfEdgeId {
    assert!(src != dst, "add_edge: Cannot create a loop edge at {src:?}");
    let (h, t) = mesh.alloc_halfedge_pair(src, dst);
    if mesh[src].halfedge.is_none() {
        mesh[src].halfedge = Some(h);
    }
    if mesh[dst].halfedge.is_none() {
        mesh[dst].halfedge = Some(t);
    }
    h
}

/// Makes `b` follow `a` in their cycle. The target of `a` must be the source
/// of `b`.
pub fn join(mesh: &mut MeshConnectivity, a: HalfEdgeId, b: HalfEdgeId) {
    let a_dst = mesh.dst_vertex(a);
    let b_src = mesh.src_vertex(b);
    assert!(
        a_dst == b_src,
        "join: {a:?} ends at {a_dst:?} but {b:?} starts at {b_src:?}"
    );
    mesh.link(a, b);
}

/// Links three halfedges, chained `v0 -> v1 -> v2 -> v0`, into a closed
/// cycle. The previous `next` / `prev` links of the three halfedges are
/// overwritten.
pub fn add_triangle(mesh: &mut MeshConnectivity, e1: HalfEdgeId, e2: HalfEdgeId, e3: HalfEdgeId) {
    join(mesh, e1, e2);
    join(mesh, e2, e3);
    join(mesh, e3, e1);
}

/// Erases the twin pair `h` belongs to. The cycles on both sides are stitched
/// across the gap, and the endpoints get a different outgoing halfedge (or
/// none, if they become isolated).
///
/// The replacement outgoing halfedge is found by rotating around the vertex,
/// so vertices with edges that were never linked into a cycle may be reported
/// as isolated too early.
pub fn erase_edge(mesh: &mut MeshConnectivity, h: HalfEdgeId) {
    let t = mesh[h].twin;
    let (h_next, h_prev) = (mesh[h].next, mesh[h].prev);
    let (t_next, t_prev) = (mesh[t].next, mesh[t].prev);
    let (a, b) = (mesh[h].vertex, mesh[t].vertex);

    // `t_next` is the outgoing halfedge after `h` when rotating around `a`.
    // Same with `h_next` around `b`.
    if mesh[a].halfedge == Some(h) {
        mesh[a].halfedge = (t_next != h).then_some(t_next);
    }
    if mesh[b].halfedge == Some(t) {
        mesh[b].halfedge = (h_next != t).then_some(h_next);
    }

    // NOTE: When the edge is a spike (h_next == t or t_next == h), one of
    // these writes only touches the pair that's about to be removed.
    mesh.link(h_prev, t_next);
    mesh.link(t_prev, h_next);

    mesh.remove_halfedge_pair(h);
}

/// Erases every edge incident to `v`, then `v` itself.
pub fn erase_vertex(mesh: &mut MeshConnectivity, v: VertexId) {
    let outgoing: SVec<HalfEdgeId> = mesh.outgoing_halfedges_iter(v).collect();
    for h in outgoing {
        erase_edge(mesh, h);
    }
    debug_assert!(mesh.is_isolated(v), "erase_vertex: {v:?} still has edges");
    mesh.remove_vertex(v);
}

/// Splits the edge of `h` at the isolated vertex `x`. Let (a, b) the (src,
/// dst) endpoints of `h`. After the split `h` goes from a to x, its twin from
/// x to a, and the returned halfedge from x to b.
pub fn split_edge(mesh: &mut MeshConnectivity, h: HalfEdgeId, x: VertexId) -> HalfEdgeId {
    assert!(mesh.is_isolated(x), "split_edge: {x:?} must be isolated");
    let t = mesh[h].twin;
    let b = mesh[t].vertex;
    let h_next = mesh[h].next;
    let t_prev = mesh[t].prev;

    let (n, n_twin) = mesh.alloc_halfedge_pair(x, b);
    mesh[t].vertex = x;
    mesh[x].halfedge = Some(n);
    if mesh[b].halfedge == Some(t) {
        mesh[b].halfedge = Some(n_twin);
    }

    mesh.link(h, n);
    if h_next == t {
        // Spike at b: walk out on n and come back on its twin.
        mesh.link(n, n_twin);
    } else {
        mesh.link(n, h_next);
        mesh.link(t_prev, n_twin);
    }
    mesh.link(n_twin, t);
    n
}
