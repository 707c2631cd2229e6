use std::{vec, vec::Vec};

use crate::{
  error::Error,
  node::{Link, Node, Offset},
};

/// Offset of the head sentinel. It is the first slot of every arena and is never
/// released.
pub(crate) const HEAD: Offset = 0;

#[derive(Debug)]
enum Slot<K, V> {
  /// The head sentinel: a full-height tower without a key.
  Head(Vec<Link>),
  Occupied(Node<K, V>),
  /// A released slot, linked to the next released slot.
  Vacant(Link),
}

/// Slot storage for the nodes of a skiplist.
///
/// Nodes refer to each other by [`Offset`], so one node can be reachable from
/// several towers while being owned by exactly one slot. Released slots form an
/// intrusive free list and are handed out again before the storage grows.
#[derive(Debug)]
pub(crate) struct Arena<K, V> {
  slots: Vec<Slot<K, V>>,
  free: Link,
  len: usize,
  capacity: Option<u32>,
}

impl<K, V> Arena<K, V> {
  /// Creates an arena whose head tower spans `max_height` levels.
  pub(crate) fn new(max_height: usize) -> Self {
    Self {
      slots: vec![Slot::Head(vec![None; max_height])],
      free: None,
      len: 0,
      capacity: None,
    }
  }

  /// Caps the arena at `capacity` nodes and reserves room for all of them.
  pub(crate) fn reserve_fixed(&mut self, capacity: u32) -> Result<(), Error> {
    self.slots.try_reserve_exact(capacity as usize)?;
    self.capacity = Some(capacity);
    Ok(())
  }

  /// Returns the number of live nodes.
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len
  }

  /// Moves `node` into a slot and returns its offset.
  ///
  /// On error the arena is unchanged and `node` is dropped.
  pub(crate) fn alloc(&mut self, node: Node<K, V>) -> Result<Offset, Error> {
    if let Some(cap) = self.capacity {
      if self.len >= cap as usize {
        return Err(Error::Full(cap));
      }
    }

    if let Some(offset) = self.free {
      let slot = &mut self.slots[offset as usize];
      match *slot {
        Slot::Vacant(next) => self.free = next,
        _ => unreachable!("free list points at a live slot"),
      }
      *slot = Slot::Occupied(node);
      self.len += 1;
      return Ok(offset);
    }

    let offset = Offset::try_from(self.slots.len()).map_err(|_| Error::Full(Offset::MAX))?;
    self.slots.try_reserve(1)?;
    self.slots.push(Slot::Occupied(node));
    self.len += 1;
    Ok(offset)
  }

  /// Takes the node out of its slot and puts the slot on the free list.
  ///
  /// The caller must have unlinked the node from every level first.
  pub(crate) fn dealloc(&mut self, offset: Offset) -> Node<K, V> {
    debug_assert_ne!(offset, HEAD, "the head is never released");
    let slot = core::mem::replace(&mut self.slots[offset as usize], Slot::Vacant(self.free));
    match slot {
      Slot::Occupied(node) => {
        self.free = Some(offset);
        self.len -= 1;
        node
      }
      _ => unreachable!("released a slot that holds no node"),
    }
  }

  #[inline]
  pub(crate) fn node(&self, offset: Offset) -> &Node<K, V> {
    match &self.slots[offset as usize] {
      Slot::Occupied(node) => node,
      _ => unreachable!("offset {offset} does not hold a node"),
    }
  }

  #[inline]
  pub(crate) fn node_mut(&mut self, offset: Offset) -> &mut Node<K, V> {
    match &mut self.slots[offset as usize] {
      Slot::Occupied(node) => node,
      _ => unreachable!("offset {offset} does not hold a node"),
    }
  }

  /// Returns the successor of `offset` on `level`. `offset` may be the head.
  #[inline]
  pub(crate) fn next(&self, offset: Offset, level: usize) -> Link {
    match &self.slots[offset as usize] {
      Slot::Head(tower) => tower[level],
      Slot::Occupied(node) => node.tower()[level],
      Slot::Vacant(_) => unreachable!("offset {offset} was released"),
    }
  }

  /// Points the tower of `offset` at `link` on `level`. `offset` may be the head.
  #[inline]
  pub(crate) fn set_next(&mut self, offset: Offset, level: usize, link: Link) {
    match &mut self.slots[offset as usize] {
      Slot::Head(tower) => tower[level] = link,
      Slot::Occupied(node) => node.tower_mut()[level] = link,
      Slot::Vacant(_) => unreachable!("offset {offset} was released"),
    }
  }

  /// Drops every node and unlinks the head. Reserved storage is kept.
  pub(crate) fn clear(&mut self) {
    self.slots.truncate(1);
    if let Some(Slot::Head(tower)) = self.slots.first_mut() {
      tower.fill(None);
    }
    self.free = None;
    self.len = 0;
  }

  /// Returns the number of slots ever handed out, released ones included.
  #[cfg(test)]
  pub(crate) fn slots(&self) -> usize {
    self.slots.len() - 1
  }
}
