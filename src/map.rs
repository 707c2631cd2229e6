use core::{cmp, mem};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
  arena::{Arena, HEAD},
  error::Error,
  node::{Link, Node, Offset},
  Ascend, Comparator, Options, Predicates, MAX_HEIGHT, PROBABILITY,
};

/// An ordered map based on a skiplist.
///
/// Keys are kept sorted by the comparator `C` (their [`Ord`] order by default).
/// Every entry gets a tower of random height: level 0 links all entries in order
/// and each level above links a random half of the level below, so lookups,
/// insertions and removals take expected `O(log n)` steps.
///
/// The map is single-threaded. Reads take `&self` and writes `&mut self`; to
/// share one map between threads, put it behind a lock.
///
/// ## Example
///
/// ```rust
/// use skipmap::SkipMap;
///
/// let mut map = SkipMap::new();
/// map.upsert(5, "five").unwrap();
/// map.upsert(1, "one").unwrap();
///
/// assert_eq!(map.get(&1), Some(&"one"));
/// assert_eq!(map.upsert(1, "uno").unwrap(), Some("one"));
/// assert_eq!(map.delete(&5), Some("five"));
/// assert_eq!(map.len(), 1);
/// ```
pub struct SkipMap<K, V, C = Ascend> {
  arena: Arena<K, V>,
  /// Highest level any node is linked on. Searches start here.
  level: usize,
  rng: SmallRng,
  opts: Options,
  cmp: C,
}

impl<K, V, C> core::fmt::Debug for SkipMap<K, V, C> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("SkipMap")
      .field("len", &self.len())
      .field("level", &self.level)
      .field("max_height", &self.opts.max_height)
      .finish()
  }
}

impl<K: Ord, V> Default for SkipMap<K, V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<K: Ord, V> SkipMap<K, V> {
  /// Creates an empty map ordered by [`Ord`], with the default [`Options`].
  #[inline]
  pub fn new() -> Self {
    Self::with_comparator(Ascend)
  }
}

impl<K, V, L, E> SkipMap<K, V, Predicates<L, E>>
where
  L: Fn(&K, &K) -> bool,
  E: Fn(&K, &K) -> bool,
{
  /// Creates an empty map ordered by a `less_than` / `equal` predicate pair.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::from_predicates(|a: &u8, b: &u8| a < b, |a: &u8, b: &u8| a == b);
  /// map.upsert(3, 'c').unwrap();
  /// assert_eq!(map.get(&3), Some(&'c'));
  /// ```
  #[inline]
  pub fn from_predicates(less_than: L, equal: E) -> Self {
    Self::with_comparator(Predicates::new(less_than, equal))
  }
}

impl<K, V, C> SkipMap<K, V, C> {
  /// Creates an empty map ordered by `cmp`, with the default [`Options`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::{Descend, SkipMap};
  ///
  /// let mut map = SkipMap::with_comparator(Descend);
  /// map.upsert("a", 1).unwrap();
  /// assert_eq!(map.get(&"a"), Some(&1));
  /// ```
  pub fn with_comparator(cmp: C) -> Self {
    let opts = Options::new();
    Self {
      arena: Arena::new(opts.max_height as usize),
      level: 0,
      rng: rng(opts.seed),
      opts,
      cmp,
    }
  }

  /// Creates an empty map ordered by `cmp` and configured by `opts`.
  ///
  /// Fails when `opts` has an invalid max height, or when a fixed capacity cannot
  /// be reserved.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::{Ascend, Options, SkipMap};
  ///
  /// let opts = Options::new().with_max_height(8).with_seed(Some(42));
  /// let map = SkipMap::<u64, u64>::with_options(opts, Ascend).unwrap();
  /// assert_eq!(map.max_height(), 8);
  /// ```
  pub fn with_options(opts: Options, cmp: C) -> Result<Self, Error> {
    opts.validate()?;
    let mut arena = Arena::new(opts.max_height as usize);
    if let Some(capacity) = opts.capacity {
      arena.reserve_fixed(capacity)?;
    }

    Ok(Self {
      arena,
      level: 0,
      rng: rng(opts.seed),
      opts,
      cmp,
    })
  }

  /// Returns the number of entries.
  #[inline]
  pub fn len(&self) -> usize {
    self.arena.len()
  }

  /// Returns `true` if the map holds no entries.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the highest level an entry is currently linked on.
  ///
  /// An empty map is at level `0`.
  #[inline]
  pub fn level(&self) -> usize {
    self.level
  }

  /// Returns the number of levels a tower may span.
  #[inline]
  pub fn max_height(&self) -> usize {
    self.opts.max_height as usize
  }

  /// Returns the options the map was built with.
  #[inline]
  pub const fn options(&self) -> &Options {
    &self.opts
  }

  /// Returns the comparator.
  #[inline]
  pub const fn comparator(&self) -> &C {
    &self.cmp
  }

  /// Removes every entry. The random source keeps its position.
  pub fn clear(&mut self) {
    self.arena.clear();
    self.level = 0;
  }

  /// Draws the top level for a new tower: a geometric draw with `p = 0.5`,
  /// capped at `max_height - 1`.
  fn random_level(&mut self) -> usize {
    let cap = self.max_height() - 1;
    let mut level = 0;
    while level < cap && self.rng.random::<f64>() < PROBABILITY {
      level += 1;
    }
    level
  }

  /// Lowers `level` past the levels the head no longer has a successor on.
  fn shrink_level(&mut self) {
    while self.level > 0 && self.arena.next(HEAD, self.level).is_none() {
      self.level -= 1;
    }
  }
}

impl<K, V, C> SkipMap<K, V, C>
where
  C: Comparator<K>,
{
  /// Returns a reference to the value stored for `key`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::SkipMap;
  ///
  /// let mut map = SkipMap::new();
  /// map.upsert("k", 1).unwrap();
  /// assert_eq!(map.get(&"k"), Some(&1));
  /// assert_eq!(map.get(&"x"), None);
  /// ```
  #[inline]
  pub fn get(&self, key: &K) -> Option<&V> {
    self.find(key).map(|offset| &self.arena.node(offset).value)
  }

  /// Returns a mutable reference to the value stored for `key`.
  #[inline]
  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    let offset = self.find(key)?;
    Some(&mut self.arena.node_mut(offset).value)
  }

  /// Returns `true` if the map holds an entry for `key`.
  #[inline]
  pub fn contains_key(&self, key: &K) -> bool {
    self.find(key).is_some()
  }

  /// Inserts `value` for `key`, or replaces the value of an existing entry.
  ///
  /// Returns the replaced value. Replacing never allocates and leaves the entry's
  /// position and tower as they were.
  ///
  /// On error nothing has changed: the map holds the same entries and links as
  /// before the call.
  pub fn upsert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
    let mut ins = Inserter::default();
    if let Some(offset) = self.find_splice(&key, &mut ins, true) {
      let old = mem::replace(&mut self.arena.node_mut(offset).value, value);
      return Ok(Some(old));
    }

    let height = self.random_level();
    let offset = match Node::new(key, value, height).and_then(|node| self.arena.alloc(node)) {
      Ok(offset) => offset,
      Err(e) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(err = %e, height, "failed to allocate skipmap node");
        return Err(e);
      }
    };

    if height > self.level {
      // Nothing reaches these levels yet, so the head precedes the new node.
      for spl in &mut ins.spl[self.level + 1..=height] {
        *spl = Splice::default();
      }

      #[cfg(feature = "tracing")]
      tracing::trace!(from = self.level, to = height, "raise skipmap level");
      self.level = height;
    }

    for (level, spl) in ins.spl[..=height].iter().enumerate() {
      self.arena.set_next(offset, level, spl.next);
      self.arena.set_next(spl.prev, level, Some(offset));
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(offset, height, len = self.len(), "insert skipmap node");

    Ok(None)
  }

  /// Removes the entry for `key` and returns its value.
  ///
  /// Removing a key that is not present does nothing and returns `None`.
  pub fn delete(&mut self, key: &K) -> Option<V> {
    let mut ins = Inserter::default();
    let offset = self.find_splice(key, &mut ins, false)?;

    // Only the levels the node is linked on have a splice pointing at it.
    for level in 0..=self.arena.node(offset).level() {
      let spl = ins.spl[level];
      debug_assert_eq!(spl.next, Some(offset));
      let next = self.arena.next(offset, level);
      self.arena.set_next(spl.prev, level, next);
    }

    let node = self.arena.dealloc(offset);
    self.shrink_level();

    #[cfg(feature = "tracing")]
    tracing::trace!(offset, level = self.level, len = self.len(), "remove skipmap node");

    Some(node.into_value())
  }

  /// Finds the node for `key` without recording splices.
  ///
  /// Walks exactly like [`find_splice`](Self::find_splice) in its
  /// return-when-found mode.
  fn find(&self, key: &K) -> Option<Offset> {
    let mut prev = HEAD;
    for level in (0..=self.level).rev() {
      let fr = self.find_splice_for_level(key, level, prev);
      if fr.found {
        return fr.splice.next;
      }
      prev = fr.splice.prev;
    }
    None
  }

  /// Records in `ins` where `key` sits on every level from `level` down to 0.
  ///
  /// With `returned_when_found` the walk stops on the first level the key is
  /// met at, which is enough to update in place. Without it the walk continues
  /// down to level 0 so the splices of every level the found node is linked on
  /// are filled, as removal needs.
  fn find_splice(&self, key: &K, ins: &mut Inserter, returned_when_found: bool) -> Option<Offset> {
    let mut prev = HEAD;
    let mut found = None;
    for level in (0..=self.level).rev() {
      let fr = self.find_splice_for_level(key, level, prev);
      ins.spl[level] = fr.splice;
      if fr.found {
        found = fr.splice.next;
        if returned_when_found {
          return found;
        }
      }
      prev = fr.splice.prev;
    }
    found
  }

  /// Walks `level` from `start`, whose key must be less than `key`.
  fn find_splice_for_level(&self, key: &K, level: usize, start: Offset) -> FindResult {
    let mut prev = start;

    loop {
      let Some(next) = self.arena.next(prev, level) else {
        // Tail of the level, so done.
        return FindResult {
          splice: Splice { prev, next: None },
          found: false,
        };
      };

      match self.cmp.compare(&self.arena.node(next).key, key) {
        // Keep moving right on this level.
        cmp::Ordering::Less => prev = next,
        cmp::Ordering::Equal => {
          return FindResult {
            splice: Splice {
              prev,
              next: Some(next),
            },
            found: true,
          };
        }
        // prev.key < key < next.key
        cmp::Ordering::Greater => {
          return FindResult {
            splice: Splice {
              prev,
              next: Some(next),
            },
            found: false,
          };
        }
      }
    }
  }
}

#[cfg(feature = "std")]
fn rng(seed: Option<u64>) -> SmallRng {
  match seed {
    Some(seed) => SmallRng::seed_from_u64(seed),
    None => SmallRng::from_rng(&mut rand::rng()),
  }
}

#[cfg(not(feature = "std"))]
fn rng(seed: Option<u64>) -> SmallRng {
  match seed {
    Some(seed) => SmallRng::seed_from_u64(seed),
    None => SmallRng::from_os_rng(),
  }
}

/// The per-level splices gathered by one search.
struct Inserter {
  spl: [Splice; MAX_HEIGHT],
}

impl Default for Inserter {
  #[inline]
  fn default() -> Self {
    Self {
      spl: [Splice::default(); MAX_HEIGHT],
    }
  }
}

/// The neighbours of a key on one level: `prev.key < key <= next.key`.
#[derive(Debug, Clone, Copy)]
struct Splice {
  prev: Offset,
  next: Link,
}

impl Default for Splice {
  /// Head to tail, the splice of every level nothing is linked on.
  #[inline]
  fn default() -> Self {
    Self {
      prev: HEAD,
      next: None,
    }
  }
}

struct FindResult {
  splice: Splice,
  found: bool,
}
