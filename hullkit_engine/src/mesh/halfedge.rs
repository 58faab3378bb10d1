// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    cell::{Ref, RefCell, RefMut},
    marker::PhantomData,
};

use crate::prelude::*;

use glam::DVec3;
use slotmap::{Key, SecondaryMap, SlotMap};

/// Implements indexing traits so the mesh data structure can be used to access
/// vertex or halfedge information using ids as indices.
pub mod mesh_index_impls;

/// Type-safe wrappers over the internal allocator indices used as pointers
pub mod id_types;
pub use id_types::*;

/// An API to represent type-safe and error-handled graph traversals over a mesh
pub mod traversals;
pub use traversals::*;

/// Local topological edits: adding and erasing edges, vertices and triangles
pub mod edit_ops;

/// Dense renumbering of mesh elements, used when exporting
pub mod mappings;

pub mod channels;
pub use channels::*;

/// HalfEdge meshes are a type of linked list. This means it is sometimes
/// impossible to ensure some algorithms will terminate when the mesh is
/// malformed. To ensure the code never goes into an infinite loop, this max
/// number of iterations will be performed before panicking. Hull horizons and
/// vertex fans can get long on big inputs, so this is generous.
pub const MAX_LOOP_ITERATIONS: usize = 1 << 20;

/// A directed arc between two vertices. Halfedges only exist in twin pairs:
/// The `twin` is fixed when the pair is allocated and never reassigned. The
/// `next` and `prev` pointers link the halfedge in a closed cycle. A freshly
/// allocated pair forms a two-element cycle with itself.
///
/// Faces are not stored here. Algorithms annotate halfedges with faces using
/// a halfedge channel.
#[derive(Debug, Clone)]
pub struct HalfEdge {
    twin: HalfEdgeId,
    next: HalfEdgeId,
    prev: HalfEdgeId,
    vertex: VertexId,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    halfedge: Option<HalfEdgeId>,
}

impl HalfEdge {
    pub fn twin(&self) -> HalfEdgeId {
        self.twin
    }
    pub fn next(&self) -> HalfEdgeId {
        self.next
    }
    pub fn prev(&self) -> HalfEdgeId {
        self.prev
    }
    /// The source vertex of this halfedge
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }
}

impl Vertex {
    /// One of the outgoing halfedges, or `None` for isolated vertices.
    pub fn halfedge(&self) -> Option<HalfEdgeId> {
        self.halfedge
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshConnectivity {
    vertices: SlotMap<VertexId, Vertex>,
    halfedges: SlotMap<HalfEdgeId, HalfEdge>,
}

/// A halfedge mesh: The connectivity, plus a set of channels attaching data
/// to the vertices and halfedges. Two channels are always present: the vertex
/// `position` and the `point_index`, which records the input point a vertex
/// was created from.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    connectivity: RefCell<MeshConnectivity>,
    pub channels: MeshChannels,
    default_channels: DefaultChannels,
}

/// This helper struct is stored in meshes and contains the channel ids for the
/// "well-known" channels that are always present. This avoids unnecessary
/// string lookups to fetch frequently used channels like `position`.
#[derive(Debug, Clone)]
pub struct DefaultChannels {
    pub position: ChannelId<VertexId, DVec3>,
    pub point_index: ChannelId<VertexId, Option<usize>>,
}

impl DefaultChannels {
    pub fn with_position(channels: &mut MeshChannels) -> Self {
        Self {
            position: channels.ensure_channel("position", DVec3::ZERO),
            point_index: channels.ensure_channel("point_index", None),
        }
    }
}

pub type Positions = Channel<VertexId, DVec3>;

impl MeshConnectivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the halfedges of the cycle `h0` belongs to, in `next` order.
    pub fn halfedge_loop(&self, h0: HalfEdgeId) -> SVec<HalfEdgeId> {
        self.halfedge_loop_iter(h0).collect()
    }

    /// Returns the source vertices along the cycle `h0` belongs to.
    pub fn loop_vertices(&self, h0: HalfEdgeId) -> SVec<VertexId> {
        self.halfedge_loop_iter(h0)
            .map(|h| self[h].vertex)
            .collect()
    }

    /// Returns an iterator that follows the next pointer for halfedges starting
    /// at `h0` until closing the loop.
    pub fn halfedge_loop_iter(&self, h0: HalfEdgeId) -> HalfedgeOpIterator<'_, NextOp> {
        HalfedgeOpIterator::new(self, Some(h0))
    }

    /// Returns an iterator over the halfedges going out of `v`, following the
    /// `twin -> next` rotation. Isolated vertices produce an empty iterator.
    pub fn outgoing_halfedges_iter(&self, v: VertexId) -> HalfedgeOpIterator<'_, CycleFanOp> {
        HalfedgeOpIterator::new(self, self[v].halfedge)
    }

    pub fn twin(&self, h: HalfEdgeId) -> HalfEdgeId {
        self[h].twin
    }

    pub fn next(&self, h: HalfEdgeId) -> HalfEdgeId {
        self[h].next
    }

    pub fn prev(&self, h: HalfEdgeId) -> HalfEdgeId {
        self[h].prev
    }

    pub fn src_vertex(&self, h: HalfEdgeId) -> VertexId {
        self[h].vertex
    }

    /// The target is read through the twin, so it is valid even for halfedges
    /// that are not linked into any face cycle yet.
    pub fn dst_vertex(&self, h: HalfEdgeId) -> VertexId {
        self[self[h].twin].vertex
    }

    pub fn edge_endpoints(&self, h: HalfEdgeId) -> (VertexId, VertexId) {
        (self.src_vertex(h), self.dst_vertex(h))
    }

    pub fn is_isolated(&self, v: VertexId) -> bool {
        self[v].halfedge.is_none()
    }

    pub fn iter_vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter()
    }

    pub fn iter_halfedges(&self) -> impl Iterator<Item = (HalfEdgeId, &HalfEdge)> {
        self.halfedges.iter()
    }

    /// Adds a new vertex to the mesh, disconnected from everything else.
    /// Returns its handle.
    fn alloc_vertex(&mut self) -> VertexId {
        self.vertices.insert(Vertex { halfedge: None })
    }

    /// Allocates a twin pair going `src -> dst` and `dst -> src`. The pair is
    /// linked as a closed two-element cycle. Vertex pointers are not updated.
    fn alloc_halfedge_pair(&mut self, src: VertexId, dst: VertexId) -> (HalfEdgeId, HalfEdgeId) {
        let h = self.halfedges.insert(HalfEdge {
            twin: HalfEdgeId::null(),
            next: HalfEdgeId::null(),
            prev: HalfEdgeId::null(),
            vertex: src,
        });
        let t = self.halfedges.insert(HalfEdge {
            twin: h,
            next: h,
            prev: h,
            vertex: dst,
        });
        let h_data = &mut self[h];
        h_data.twin = t;
        h_data.next = t;
        h_data.prev = t;
        (h, t)
    }

    /// Removes a twin pair from the mesh. This does not attempt to preserve
    /// mesh connectivity and should only be used as part of internal
    /// operations.
    fn remove_halfedge_pair(&mut self, h: HalfEdgeId) {
        let t = self[h].twin;
        self.halfedges.remove(h);
        self.halfedges.remove(t);
    }

    /// Removes a vertex from the mesh. This does not attempt to preserve mesh
    /// connectivity and should only be used as part of internal operations.
    fn remove_vertex(&mut self, vertex: VertexId) {
        self.vertices.remove(vertex);
    }

    /// Sets `a.next = b` and `b.prev = a`.
    fn link(&mut self, a: HalfEdgeId, b: HalfEdgeId) {
        self[a].next = b;
        self[b].prev = a;
    }

    pub fn vertex_exists(&self, vertex: VertexId) -> bool {
        self.vertex(vertex).is_some()
    }

    pub fn halfedge_exists(&self, halfedge: HalfEdgeId) -> bool {
        self.halfedge(halfedge).is_some()
    }

    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges, that is, twin pairs.
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Frees all the vertices and halfedges.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.halfedges.clear();
    }

    pub fn vertex_mapping(&self) -> mappings::MeshMapping<VertexId> {
        mappings::MeshMapping::new(&self.vertices)
    }
}

impl HalfEdgeMesh {
    pub fn new() -> Self {
        let mut channels = MeshChannels::default();
        let default_channels = DefaultChannels::with_position(&mut channels);
        Self {
            channels,
            default_channels,
            connectivity: RefCell::new(MeshConnectivity::new()),
        }
    }

    pub fn read_connectivity(&self) -> Ref<'_, MeshConnectivity> {
        self.connectivity.borrow()
    }

    pub fn write_connectivity(&self) -> RefMut<'_, MeshConnectivity> {
        self.connectivity.borrow_mut()
    }

    pub fn read_positions(&self) -> Ref<'_, Positions> {
        self.channels
            .read_channel(self.default_channels.position)
            .expect("Could not read positions")
    }

    pub fn write_positions(&self) -> RefMut<'_, Positions> {
        self.channels
            .write_channel(self.default_channels.position)
            .expect("Could not write positions")
    }

    pub fn read_point_indices(&self) -> Ref<'_, Channel<VertexId, Option<usize>>> {
        self.channels
            .read_channel(self.default_channels.point_index)
            .expect("Could not read point indices")
    }

    pub fn write_point_indices(&self) -> RefMut<'_, Channel<VertexId, Option<usize>>> {
        self.channels
            .write_channel(self.default_channels.point_index)
            .expect("Could not write point indices")
    }

    /// Allocates an isolated vertex at `position`.
    pub fn add_vertex(&self, position: DVec3) -> VertexId {
        let v = self.write_connectivity().alloc_vertex();
        self.write_positions()[v] = position;
        v
    }

    /// Registers a vertex property. Properties registered twice under the same
    /// name and value type share their storage.
    pub fn add_vertex_property<T: ChannelValue>(
        &mut self,
        name: &str,
        default: T,
    ) -> ChannelId<VertexId, T> {
        self.channels.ensure_channel(name, default)
    }

    /// Registers a halfedge property. Properties registered twice under the
    /// same name and value type share their storage.
    pub fn add_halfedge_property<T: ChannelValue>(
        &mut self,
        name: &str,
        default: T,
    ) -> ChannelId<HalfEdgeId, T> {
        self.channels.ensure_channel(name, default)
    }

    /// Erases a vertex along with all its incident edges, and drops its
    /// values from every vertex and halfedge channel.
    pub fn erase_vertex(&self, v: VertexId) {
        let outgoing: SVec<HalfEdgeId> = self.read_connectivity().outgoing_halfedges_iter(v).collect();
        for h in outgoing {
            self.erase_edge(h);
        }
        edit_ops::erase_vertex(&mut self.write_connectivity(), v);
        self.channels.remove_key(v);
    }

    /// Erases the twin pair of `h`, dropping the values of both halfedges
    /// from every halfedge channel.
    pub fn erase_edge(&self, h: HalfEdgeId) {
        let twin = self.read_connectivity().twin(h);
        edit_ops::erase_edge(&mut self.write_connectivity(), h);
        self.channels.remove_key(h);
        self.channels.remove_key(twin);
    }

    pub fn num_vertices(&self) -> usize {
        self.read_connectivity().num_vertices()
    }

    pub fn num_halfedges(&self) -> usize {
        self.read_connectivity().num_halfedges()
    }

    /// Frees all the mesh storage. Channels stay registered, but lose all
    /// their values.
    pub fn clear(&self) {
        self.write_connectivity().clear();
        self.channels.clear_values();
    }

    /// Position of every vertex, keyed by id.
    pub fn vertex_positions(&self) -> Vec<(VertexId, DVec3)> {
        let conn = self.read_connectivity();
        let positions = self.read_positions();
        conn.iter_vertices()
            .map(|(v, _)| (v, positions[v]))
            .collect()
    }
}

impl Default for HalfEdgeMesh {
    fn default() -> Self {
        Self::new()
    }
}

pub trait HalfEdgeOp {
    fn op(conn: &MeshConnectivity, h: HalfEdgeId) -> HalfEdgeId;
}

pub struct NextOp;
impl HalfEdgeOp for NextOp {
    fn op(conn: &MeshConnectivity, h: HalfEdgeId) -> HalfEdgeId {
        conn[h].next
    }
}

pub struct CycleFanOp;
impl HalfEdgeOp for CycleFanOp {
    fn op(conn: &MeshConnectivity, h: HalfEdgeId) -> HalfEdgeId {
        conn[conn[h].twin].next
    }
}

/// A lazy walk that repeatedly applies `Op` from a start halfedge until the
/// start is reached again. Assumes a consistent mesh: it will panic after
/// [`MAX_LOOP_ITERATIONS`] steps rather than loop forever.
pub struct HalfedgeOpIterator<'a, Op: HalfEdgeOp> {
    conn: &'a MeshConnectivity,
    start: Option<HalfEdgeId>,
    next: Option<HalfEdgeId>,
    count: usize,
    _op: PhantomData<Op>,
}

impl<'a, Op: HalfEdgeOp> HalfedgeOpIterator<'a, Op> {
    fn new(conn: &'a MeshConnectivity, start: Option<HalfEdgeId>) -> Self {
        Self {
            conn,
            start,
            next: start,
            count: 0,
            _op: PhantomData,
        }
    }
}

impl<'a, Op: HalfEdgeOp> Iterator for HalfedgeOpIterator<'a, Op> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if self.count >= MAX_LOOP_ITERATIONS {
            panic!("Max number of iterations reached. Is the mesh malformed?");
        } else if self.count > 0 && Some(current) == self.start {
            None
        } else {
            self.next = Some(Op::op(self.conn, current));
            self.count += 1;
            Some(current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pair_is_a_two_cycle() {
        let mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(DVec3::ZERO);
        let b = mesh.add_vertex(DVec3::X);
        let mut conn = mesh.write_connectivity();
        let h = edit_ops::add_edge(&mut conn, a, b);
        let t = conn.twin(h);

        assert_eq!(conn.twin(t), h);
        assert_eq!(conn.edge_endpoints(h), (a, b));
        assert_eq!(conn.edge_endpoints(t), (b, a));
        assert_eq!(conn.halfedge_loop(h).as_slice(), &[h, t]);
        assert_eq!(conn.num_edges(), 1);
        assert_eq!(conn.num_halfedges(), 2);
    }

    #[test]
    fn test_isolated_vertex_has_no_outgoing() {
        let mesh = HalfEdgeMesh::new();
        let v = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        let conn = mesh.read_connectivity();
        assert!(conn.is_isolated(v));
        assert_eq!(conn.outgoing_halfedges_iter(v).count(), 0);
        assert_eq!(mesh.read_positions()[v], DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_properties_alias_by_name() {
        let mut mesh = HalfEdgeMesh::new();
        let v = mesh.add_vertex(DVec3::ZERO);
        let a = mesh.add_vertex_property::<u32>("marker", 0);
        let b = mesh.add_vertex_property::<u32>("marker", 9);
        mesh.channels.write_channel(a).unwrap()[v] = 3;
        assert_eq!(mesh.channels.read_channel(b).unwrap()[v], 3);

        let h_prop = mesh.add_halfedge_property::<bool>("marker", true);
        let w = mesh.add_vertex(DVec3::X);
        let h = edit_ops::add_edge(&mut mesh.write_connectivity(), v, w);
        assert!(mesh.channels.read_channel(h_prop).unwrap()[h]);
    }

    #[test]
    fn test_clear() {
        let mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(DVec3::ZERO);
        let b = mesh.add_vertex(DVec3::ONE);
        edit_ops::add_edge(&mut mesh.write_connectivity(), a, b);
        mesh.clear();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert!(mesh.read_positions().is_empty());
    }
}
