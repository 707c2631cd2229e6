use std::vec::Vec;

use crate::error::Error;

/// Position of a slot in the [`Arena`](crate::arena::Arena).
pub(crate) type Offset = u32;

/// Link to the next node on one level. `None` marks the tail of that level.
pub(crate) type Link = Option<Offset>;

/// A key-value pair together with its tower of forward links.
///
/// `tower[i]` is the successor on level `i`, so a node occupies levels
/// `0..=level()`. Dropping a node releases its key, value and tower at once.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
  pub(crate) key: K,
  pub(crate) value: V,
  tower: Vec<Link>,
}

impl<K, V> Node<K, V> {
  /// Builds an unlinked node occupying levels `0..=level`.
  #[inline]
  pub(crate) fn new(key: K, value: V, level: usize) -> Result<Self, Error> {
    let mut tower = Vec::new();
    tower.try_reserve_exact(level + 1)?;
    tower.resize(level + 1, None);
    Ok(Self { key, value, tower })
  }

  /// Returns the highest level this node is linked on.
  #[inline]
  pub(crate) fn level(&self) -> usize {
    self.tower.len() - 1
  }

  #[inline]
  pub(crate) fn tower(&self) -> &[Link] {
    &self.tower
  }

  #[inline]
  pub(crate) fn tower_mut(&mut self) -> &mut [Link] {
    &mut self.tower
  }

  #[inline]
  pub(crate) fn into_value(self) -> V {
    self.value
  }
}
