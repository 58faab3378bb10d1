// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

slotmap::new_key_type! {
    /// One direction of an edge. Always allocated together with its twin.
    pub struct HalfEdgeId;
}
slotmap::new_key_type! { pub struct VertexId; }
slotmap::new_key_type! {
    /// A face of the hull. Faces are not part of the mesh connectivity, they
    /// live in a separate registry and are linked to halfedges via a channel.
    pub struct FaceId;
}
