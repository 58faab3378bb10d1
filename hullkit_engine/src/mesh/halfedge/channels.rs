// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    any::{Any, TypeId},
    cell::{Ref, RefCell, RefMut},
    fmt::Debug,
    marker::PhantomData,
    rc::Rc,
};

use bimap::BiMap;

use super::*;

/// The kind of mesh element a channel annotates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ElementKind {
    Vertex,
    HalfEdge,
    Face,
}

/// Id types that can key a channel.
pub trait ChannelKey: slotmap::Key + Debug + Copy + 'static {
    const KIND: ElementKind;
}

impl ChannelKey for VertexId {
    const KIND: ElementKind = ElementKind::Vertex;
}
impl ChannelKey for HalfEdgeId {
    const KIND: ElementKind = ElementKind::HalfEdge;
}
impl ChannelKey for FaceId {
    const KIND: ElementKind = ElementKind::Face;
}

/// Anything cloneable with a default can be stored in a channel.
pub trait ChannelValue: Debug + Clone + Default + 'static {}
impl<T: Debug + Clone + Default + 'static> ChannelValue for T {}

/// Per-element data, e.g. the `position` of every vertex.
///
/// A channel reads as if every key held its `default` until written. Values
/// are kept in a [`SecondaryMap`], so a stale key whose slot was reused by a
/// newer element never sees the newer element's value.
#[derive(Clone, Debug)]
pub struct Channel<K: ChannelKey, V: ChannelValue> {
    values: SecondaryMap<K, V>,
    default: V,
}

impl<K: ChannelKey, V: ChannelValue> Channel<K, V> {
    pub fn with_default(default: V) -> Self {
        Self {
            values: SecondaryMap::new(),
            default,
        }
    }

    /// The value for `key`, only if it was written.
    pub fn get(&self, key: K) -> Option<&V> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.values.remove(key)
    }

    /// Moves the value out, leaving the default behind.
    pub fn take(&mut self, key: K) -> V {
        match self.values.remove(key) {
            Some(value) => value,
            None => self.default.clone(),
        }
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Number of written entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> {
        self.values.iter_mut()
    }
}

impl<K: ChannelKey, V: ChannelValue> std::ops::Index<K> for Channel<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        self.values.get(key).unwrap_or(&self.default)
    }
}

impl<K: ChannelKey, V: ChannelValue> std::ops::IndexMut<K> for Channel<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        let default = &self.default;
        match self.values.entry(key) {
            Some(entry) => entry.or_insert_with(|| default.clone()),
            None => panic!("Cannot write channel value for {key:?}: the element was erased"),
        }
    }
}

slotmap::new_key_type! {
    /// Untyped handle to a channel inside its [`ChannelGroup`].
    pub struct RawChannelId;
}

/// Typed handle to a channel. Only valid for the [`MeshChannels`] that issued
/// it.
pub struct ChannelId<K: ChannelKey, V: ChannelValue> {
    raw: RawChannelId,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K: ChannelKey, V: ChannelValue> ChannelId<K, V> {
    fn from_raw(raw: RawChannelId) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub fn raw(&self) -> RawChannelId {
        self.raw
    }
}

// Derives would require `V: Copy`, so these are written by hand.
impl<K: ChannelKey, V: ChannelValue> Clone for ChannelId<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K: ChannelKey, V: ChannelValue> Copy for ChannelId<K, V> {}
impl<K: ChannelKey, V: ChannelValue> PartialEq for ChannelId<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
impl<K: ChannelKey, V: ChannelValue> Eq for ChannelId<K, V> {}
impl<K: ChannelKey, V: ChannelValue> Debug for ChannelId<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChannelId<{:?}>({:?})", K::KIND, self.raw)
    }
}

type SharedChannel<K, V> = Rc<RefCell<Channel<K, V>>>;

/// All the channels of one key and value type, addressable by name or id.
/// Each channel is borrowed on its own, so one can be written while others
/// are read.
#[derive(Debug)]
pub struct ChannelGroup<K: ChannelKey, V: ChannelValue> {
    names: BiMap<String, RawChannelId>,
    slots: SlotMap<RawChannelId, SharedChannel<K, V>>,
}

impl<K: ChannelKey, V: ChannelValue> Default for ChannelGroup<K, V> {
    fn default() -> Self {
        Self {
            names: BiMap::new(),
            slots: SlotMap::with_key(),
        }
    }
}

impl<K: ChannelKey, V: ChannelValue> Clone for ChannelGroup<K, V> {
    fn clone(&self) -> Self {
        // Cloned Rcs would share storage between both groups
        let mut slots = self.slots.clone();
        for (_, channel) in slots.iter_mut() {
            let copy = channel.borrow().clone();
            *channel = Rc::new(RefCell::new(copy));
        }
        Self {
            names: self.names.clone(),
            slots,
        }
    }
}

impl<K: ChannelKey, V: ChannelValue> ChannelGroup<K, V> {
    /// Returns the channel called `name`, creating it with `default` if
    /// missing. An existing channel keeps its own default.
    pub fn ensure_channel(&mut self, name: &str, default: V) -> ChannelId<K, V> {
        if let Some(&raw) = self.names.get_by_left(name) {
            return ChannelId::from_raw(raw);
        }
        let raw = self
            .slots
            .insert(Rc::new(RefCell::new(Channel::with_default(default))));
        self.names.insert(name.to_owned(), raw);
        ChannelId::from_raw(raw)
    }

    /// Like `ensure_channel`, but fails if `name` is taken.
    pub fn create_channel(&mut self, name: &str, default: V) -> Result<ChannelId<K, V>> {
        if self.names.contains_left(name) {
            bail!("A channel named {name} already exists");
        }
        Ok(self.ensure_channel(name, default))
    }

    /// Unregisters the channel and hands back its contents. Fails if the
    /// channel does not exist or is currently borrowed.
    pub fn remove_channel(&mut self, id: ChannelId<K, V>) -> Result<Channel<K, V>> {
        let shared = self
            .slots
            .remove(id.raw)
            .ok_or_else(|| anyhow!("Cannot remove {id:?}: no such channel"))?;
        self.names.remove_by_right(&id.raw);
        match Rc::try_unwrap(shared) {
            Ok(cell) => Ok(cell.into_inner()),
            Err(_) => bail!("Cannot remove {id:?}: the channel is still borrowed"),
        }
    }

    pub fn channel_id(&self, name: &str) -> Option<ChannelId<K, V>> {
        self.names.get_by_left(name).map(|&raw| ChannelId::from_raw(raw))
    }

    pub fn channel_name(&self, id: ChannelId<K, V>) -> Option<&str> {
        self.names.get_by_right(&id.raw).map(String::as_str)
    }

    fn slot(&self, id: ChannelId<K, V>) -> Result<&SharedChannel<K, V>> {
        self.slots
            .get(id.raw)
            .ok_or_else(|| anyhow!("{id:?} does not exist in this mesh"))
    }

    /// Fails if the channel is being written.
    pub fn read_channel(&self, id: ChannelId<K, V>) -> Result<Ref<Channel<K, V>>> {
        self.slot(id)?
            .try_borrow()
            .map_err(|err| anyhow!("Cannot read {id:?}: {err}"))
    }

    /// Fails if the channel is being read or written.
    pub fn write_channel(&self, id: ChannelId<K, V>) -> Result<RefMut<Channel<K, V>>> {
        self.slot(id)?
            .try_borrow_mut()
            .map_err(|err| anyhow!("Cannot write {id:?}: {err}"))
    }
}

/// The operations on a [`ChannelGroup`] that do not depend on its value type.
pub trait AnyChannelGroup: Any + Debug + dyn_clone::DynClone {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    /// Drops the values for `key` in every channel. Panics if a channel is
    /// borrowed.
    fn forget_key(&self, key: slotmap::KeyData);
    /// Drops every value in every channel. Panics if a channel is borrowed.
    fn forget_all(&self);
    fn names(&self) -> Vec<String>;
}

dyn_clone::clone_trait_object!(AnyChannelGroup);

impl<K: ChannelKey, V: ChannelValue> AnyChannelGroup for ChannelGroup<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn forget_key(&self, key: slotmap::KeyData) {
        let key = K::from(key);
        for channel in self.slots.values() {
            channel.borrow_mut().remove(key);
        }
    }

    fn forget_all(&self) {
        for channel in self.slots.values() {
            channel.borrow_mut().clear();
        }
    }

    fn names(&self) -> Vec<String> {
        self.names.left_values().cloned().collect()
    }
}

/// Every channel of a mesh, for any element kind and value type. Channel
/// groups are created on demand the first time a channel of their type is
/// registered.
#[derive(Default, Debug, Clone)]
pub struct MeshChannels {
    groups: HashMap<(ElementKind, TypeId), Box<dyn AnyChannelGroup>>,
}

impl MeshChannels {
    fn group_key<K: ChannelKey, V: ChannelValue>() -> (ElementKind, TypeId) {
        (K::KIND, TypeId::of::<V>())
    }

    fn group<K: ChannelKey, V: ChannelValue>(&self) -> Result<&ChannelGroup<K, V>> {
        let group = self
            .groups
            .get(&Self::group_key::<K, V>())
            .ok_or_else(|| {
                anyhow!(
                    "No {:?} channels hold {}",
                    K::KIND,
                    std::any::type_name::<V>()
                )
            })?;
        match group.as_any().downcast_ref() {
            Some(group) => Ok(group),
            None => unreachable!("Channel groups are keyed by their value type"),
        }
    }

    fn group_mut<K: ChannelKey, V: ChannelValue>(&mut self) -> Result<&mut ChannelGroup<K, V>> {
        let group = self
            .groups
            .get_mut(&Self::group_key::<K, V>())
            .ok_or_else(|| {
                anyhow!(
                    "No {:?} channels hold {}",
                    K::KIND,
                    std::any::type_name::<V>()
                )
            })?;
        match group.as_any_mut().downcast_mut() {
            Some(group) => Ok(group),
            None => unreachable!("Channel groups are keyed by their value type"),
        }
    }

    fn group_or_insert<K: ChannelKey, V: ChannelValue>(&mut self) -> &mut ChannelGroup<K, V> {
        let group = self
            .groups
            .entry(Self::group_key::<K, V>())
            .or_insert_with(|| Box::new(ChannelGroup::<K, V>::default()));
        match group.as_any_mut().downcast_mut() {
            Some(group) => group,
            None => unreachable!("Channel groups are keyed by their value type"),
        }
    }

    /// See [`ChannelGroup::ensure_channel`]
    pub fn ensure_channel<K: ChannelKey, V: ChannelValue>(
        &mut self,
        name: &str,
        default: V,
    ) -> ChannelId<K, V> {
        self.group_or_insert().ensure_channel(name, default)
    }

    /// See [`ChannelGroup::create_channel`]
    pub fn create_channel<K: ChannelKey, V: ChannelValue>(
        &mut self,
        name: &str,
        default: V,
    ) -> Result<ChannelId<K, V>> {
        self.group_or_insert().create_channel(name, default)
    }

    /// See [`ChannelGroup::remove_channel`]
    pub fn remove_channel<K: ChannelKey, V: ChannelValue>(
        &mut self,
        id: ChannelId<K, V>,
    ) -> Result<Channel<K, V>> {
        self.group_mut()?.remove_channel(id)
    }

    pub fn read_channel<K: ChannelKey, V: ChannelValue>(
        &self,
        id: ChannelId<K, V>,
    ) -> Result<Ref<Channel<K, V>>> {
        self.group()?.read_channel(id)
    }

    pub fn write_channel<K: ChannelKey, V: ChannelValue>(
        &self,
        id: ChannelId<K, V>,
    ) -> Result<RefMut<Channel<K, V>>> {
        self.group()?.write_channel(id)
    }

    pub fn read_channel_by_name<K: ChannelKey, V: ChannelValue>(
        &self,
        name: &str,
    ) -> Result<Ref<Channel<K, V>>> {
        let id = self
            .channel_id(name)
            .ok_or_else(|| anyhow!("There is no channel named {name}"))?;
        self.read_channel(id)
    }

    pub fn channel_id<K: ChannelKey, V: ChannelValue>(
        &self,
        name: &str,
    ) -> Option<ChannelId<K, V>> {
        self.group().ok()?.channel_id(name)
    }

    pub fn channel_name<K: ChannelKey, V: ChannelValue>(
        &self,
        id: ChannelId<K, V>,
    ) -> Option<&str> {
        self.group().ok()?.channel_name(id)
    }

    /// Drops the values for `key` from every channel keyed by `K`, whatever
    /// their value type. Called when the element itself is erased.
    pub fn remove_key<K: ChannelKey>(&self, key: K) {
        self.groups
            .iter()
            .filter(|((kind, _), _)| *kind == K::KIND)
            .for_each(|(_, group)| group.forget_key(key.data()));
    }

    /// Drops every value of every channel. The channels and their ids stay
    /// valid.
    pub fn clear_values(&self) {
        for group in self.groups.values() {
            group.forget_all();
        }
    }

    /// Names of the channels keyed by `K`, sorted.
    pub fn channel_names<K: ChannelKey>(&self) -> Vec<String> {
        self.groups
            .iter()
            .filter(|((kind, _), _)| *kind == K::KIND)
            .flat_map(|(_, group)| group.names())
            .sorted()
            .collect()
    }
}
