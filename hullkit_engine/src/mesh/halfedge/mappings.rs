// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slotmap::{Key, SecondaryMap, SlotMap};

/// Dense `0..n` numbering of the live ids of an arena, in arena iteration
/// order. Erased slots leave no gaps.
pub struct MeshMapping<K: Key> {
    dense: SecondaryMap<K, u32>,
}

impl<K: Key> MeshMapping<K> {
    pub fn new<V>(arena: &SlotMap<K, V>) -> Self {
        let dense = arena
            .keys()
            .zip(0u32..)
            .collect::<SecondaryMap<K, u32>>();
        Self { dense }
    }

    /// The dense index of `id`, or `None` if it was not live when the mapping
    /// was made.
    pub fn get(&self, id: K) -> Option<u32> {
        self.dense.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }
}

impl<K: Key> std::ops::Index<K> for MeshMapping<K> {
    type Output = u32;

    fn index(&self, id: K) -> &u32 {
        match self.dense.get(id) {
            Some(i) => i,
            None => panic!("{id:?} has no dense index"),
        }
    }
}
