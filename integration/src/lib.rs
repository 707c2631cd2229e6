use parking_lot::Mutex;
use skipmap::SkipMap;
use std::sync::Arc;

/// A map shared between threads behind one exclusive lock.
pub type SharedMap = Arc<Mutex<SkipMap<Vec<u8>, Vec<u8>>>>;

/// Only used for testing
pub fn key(i: usize) -> Vec<u8> {
  format!("{:05}", i).into_bytes()
}

/// Only used for testing
pub fn big_value(i: usize) -> Vec<u8> {
  format!("{:01048576}", i).into_bytes()
}

/// Only used for testing
pub fn new_value(i: usize) -> Vec<u8> {
  format!("{:05}", i).into_bytes()
}

/// Spawns one thread per index running `f`, then waits for all of them.
pub fn run_each(l: &SharedMap, n: usize, f: fn(&SharedMap, usize)) {
  let handles: Vec<_> = (0..n)
    .map(|i| {
      let l = l.clone();
      std::thread::spawn(move || f(&l, i))
    })
    .collect();

  for handle in handles {
    handle.join().unwrap();
  }
}
