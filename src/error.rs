use std::collections::TryReserveError;

/// Error type for the [`SkipMap`](crate::SkipMap).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Indicates that the map already holds as many entries as its
  /// configured capacity allows.
  Full(u32),

  /// Indicates that the allocator could not provide memory for a new node.
  Alloc(TryReserveError),

  /// Indicates that the configured maximum height is outside
  /// `1..=`[`MAX_HEIGHT`](crate::MAX_HEIGHT).
  InvalidMaxHeight(u8),
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Full(cap) => write!(f, "skipmap is full (capacity {cap})"),
      Self::Alloc(e) => write!(f, "failed to allocate node: {e}"),
      Self::InvalidMaxHeight(height) => write!(
        f,
        "max height {height} is out of range (1..={})",
        crate::MAX_HEIGHT
      ),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Alloc(e) => Some(e),
      _ => None,
    }
  }
}

impl From<TryReserveError> for Error {
  fn from(e: TryReserveError) -> Self {
    Self::Alloc(e)
  }
}
