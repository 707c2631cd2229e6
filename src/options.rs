use crate::{error::Error, DEFAULT_MAX_HEIGHT, MAX_HEIGHT};

/// Options for [`SkipMap`](crate::SkipMap).
#[viewit::viewit(vis_all = "pub(super)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
  max_height: u8,
  seed: Option<u64>,
  capacity: Option<u32>,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_height: DEFAULT_MAX_HEIGHT,
      seed: Some(0),
      capacity: None,
    }
  }

  /// Set the number of levels a tower may span.
  ///
  /// A new node occupies levels `0..=h` where `h < max_height`. Taller maps
  /// keep searches shallow on large sets at the cost of a larger head tower.
  /// The value must be in `1..=`[`MAX_HEIGHT`](crate::MAX_HEIGHT).
  ///
  /// The default max height is `25`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Options;
  ///
  /// let opts = Options::new().with_max_height(12);
  /// assert_eq!(opts.max_height(), 12);
  /// ```
  #[inline]
  pub const fn with_max_height(mut self, max_height: u8) -> Self {
    self.max_height = max_height;
    self
  }

  /// Set the seed of the random source that picks tower heights.
  ///
  /// `Some(seed)` makes the shape of the map reproducible for the same sequence
  /// of operations, `None` seeds from system entropy.
  ///
  /// The default seed is `Some(0)`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Options;
  ///
  /// let opts = Options::new().with_seed(None);
  /// assert_eq!(opts.seed(), None);
  /// ```
  #[inline]
  pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
    self.seed = seed;
    self
  }

  /// Set the maximum number of entries the map can hold.
  ///
  /// When set, storage for every entry is reserved when the map is built and
  /// inserting past the limit fails with [`Error::Full`]. `None` grows the map on
  /// demand.
  ///
  /// The default capacity is `None`.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use skipmap::Options;
  ///
  /// let opts = Options::new().with_capacity(Some(1024));
  /// assert_eq!(opts.capacity(), Some(1024));
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: Option<u32>) -> Self {
    self.capacity = capacity;
    self
  }

  /// Returns the number of levels a tower may span.
  #[inline]
  pub const fn max_height(&self) -> u8 {
    self.max_height
  }

  /// Returns the seed of the tower height generator.
  #[inline]
  pub const fn seed(&self) -> Option<u64> {
    self.seed
  }

  /// Returns the maximum number of entries.
  #[inline]
  pub const fn capacity(&self) -> Option<u32> {
    self.capacity
  }

  #[inline]
  pub(super) fn validate(&self) -> Result<(), Error> {
    if self.max_height == 0 || self.max_height as usize > MAX_HEIGHT {
      return Err(Error::InvalidMaxHeight(self.max_height));
    }
    Ok(())
  }
}
