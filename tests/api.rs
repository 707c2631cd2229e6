use skipmap::{Ascend, Descend, Error, Options, SkipMap, DEFAULT_MAX_HEIGHT, MAX_HEIGHT};

#[test]
fn scenario() {
  let mut l = SkipMap::new();
  l.upsert(5, "five").unwrap();
  l.upsert(1, "one").unwrap();
  l.upsert(3, "three").unwrap();

  assert_eq!(l.get(&1), Some(&"one"));
  assert_eq!(l.get(&4), None);

  assert_eq!(l.delete(&1), Some("one"));
  assert_eq!(l.get(&1), None);
  assert_eq!(l.get(&3), Some(&"three"));
  assert_eq!(l.get(&5), Some(&"five"));
  assert_eq!(l.len(), 2);
}

#[test]
fn update_keeps_len() {
  let mut l = SkipMap::new();
  assert_eq!(l.upsert("k", 1).unwrap(), None);
  let len = l.len();
  assert_eq!(l.upsert("k", 2).unwrap(), Some(1));
  assert_eq!(l.len(), len);
  assert_eq!(l.get(&"k"), Some(&2));
}

#[test]
fn default_options() {
  let opts = Options::default();
  assert_eq!(opts, Options::new());
  assert_eq!(opts.max_height(), DEFAULT_MAX_HEIGHT);
  assert_eq!(opts.seed(), Some(0));
  assert_eq!(opts.capacity(), None);

  let l = SkipMap::<u32, u32>::default();
  assert_eq!(l.options(), &opts);
  assert_eq!(l.max_height(), 25);
  assert_eq!(l.level(), 0);
}

#[test]
fn error_display() {
  let e = SkipMap::<u8, u8>::with_options(Options::new().with_max_height(0), Ascend).unwrap_err();
  assert_eq!(
    e.to_string(),
    format!("max height 0 is out of range (1..={MAX_HEIGHT})")
  );
  assert_eq!(Error::Full(8).to_string(), "skipmap is full (capacity 8)");

  let e: Box<dyn std::error::Error> = Box::new(Error::Full(8));
  assert!(std::error::Error::source(e.as_ref()).is_none());
}

#[test]
fn capacity_bounds_entries() {
  let opts = Options::new().with_capacity(Some(2));
  let mut l = SkipMap::with_options(opts, Descend).unwrap();

  l.upsert('a', 1).unwrap();
  l.upsert('b', 2).unwrap();
  assert_eq!(l.upsert('c', 3), Err(Error::Full(2)));
  assert_eq!(l.len(), 2);

  assert_eq!(l.delete(&'a'), Some(1));
  l.upsert('c', 3).unwrap();
  assert_eq!(l.get(&'c'), Some(&3));
  assert_eq!(l.get(&'b'), Some(&2));
}

#[test]
fn debug_does_not_need_debug_keys() {
  struct Opaque;

  let mut l = SkipMap::with_comparator(|a: &u32, b: &u32| a.cmp(b));
  l.upsert(1, Opaque).unwrap();
  let debug = format!("{l:?}");
  assert!(debug.starts_with("SkipMap { len: 1, level: "), "{debug}");
  assert!(debug.ends_with(", max_height: 25 }"), "{debug}");
}
