#![doc = include_str!("../README.md")]
#![cfg_attr(not(all(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use core::cmp;

mod arena;
mod node;

mod error;
pub use error::Error;

mod options;
pub use options::Options;

/// A map implementation based on skiplist
pub mod map;
pub use map::SkipMap;

/// The largest number of levels a [`SkipMap`] can be configured with.
pub const MAX_HEIGHT: usize = 32;

/// The number of levels a [`SkipMap`] uses unless configured otherwise,
/// i.e. towers span levels `0..=24`.
pub const DEFAULT_MAX_HEIGHT: u8 = 25;

/// Chance that a tower grows by one more level.
const PROBABILITY: f64 = 0.5;

/// Comparator defines the total order the keys of a [`SkipMap`] are kept in.
///
/// Implementations must be a strict total order: antisymmetric, transitive, and
/// returning [`Ordering::Equal`](cmp::Ordering::Equal) only for keys that are the
/// same entry. A comparator violating this silently breaks the ordering and
/// uniqueness of the map.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator.
pub trait Comparator<K: ?Sized> {
  /// Compares two keys.
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering;
}

impl<K, F> Comparator<K> for F
where
  K: ?Sized,
  F: Fn(&K, &K) -> cmp::Ordering,
{
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    self(a, b)
  }
}

/// Ascend is a comparator that orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ascend;

impl<K: ?Sized + Ord> Comparator<K> for Ascend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    a.cmp(b)
  }
}

/// Descend is a comparator that orders keys in reverse of their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Descend;

impl<K: ?Sized + Ord> Comparator<K> for Descend {
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    b.cmp(a)
  }
}

/// Adapts a `less_than` / `equal` predicate pair into a [`Comparator`].
///
/// The pair must agree with each other: `equal(a, b)` holds exactly when neither
/// `less_than(a, b)` nor `less_than(b, a)` does.
#[derive(Clone, Copy)]
pub struct Predicates<L, E> {
  less_than: L,
  equal: E,
}

impl<L, E> Predicates<L, E> {
  /// Creates a comparator from a `less_than` and an `equal` predicate.
  #[inline]
  pub const fn new(less_than: L, equal: E) -> Self {
    Self { less_than, equal }
  }
}

impl<L, E> core::fmt::Debug for Predicates<L, E> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Predicates").finish_non_exhaustive()
  }
}

impl<K, L, E> Comparator<K> for Predicates<L, E>
where
  K: ?Sized,
  L: Fn(&K, &K) -> bool,
  E: Fn(&K, &K) -> bool,
{
  #[inline]
  fn compare(&self, a: &K, b: &K) -> cmp::Ordering {
    if (self.less_than)(a, b) {
      cmp::Ordering::Less
    } else if (self.equal)(a, b) {
      cmp::Ordering::Equal
    } else {
      cmp::Ordering::Greater
    }
  }
}
