use parking_lot::Mutex;
use skipmap::SkipMap;
use std::{sync::Arc, thread};

/// Only used for testing
fn key(i: usize) -> Vec<u8> {
  format!("{:05}", i).into_bytes()
}

/// Only used for testing
fn new_value(i: usize) -> Vec<u8> {
  format!("{:05}", i).into_bytes()
}

#[test]
fn concurrent_write_behind_lock() {
  const N: usize = 100;
  let l = Arc::new(Mutex::new(SkipMap::new()));

  let handles: Vec<_> = (0..N)
    .map(|i| {
      let l = l.clone();
      thread::spawn(move || {
        l.lock().upsert(key(i), new_value(i)).unwrap();
      })
    })
    .collect();
  for handle in handles {
    handle.join().unwrap();
  }

  let l = l.lock();
  assert_eq!(l.len(), N);
  for i in 0..N {
    assert_eq!(l.get(&key(i)).unwrap(), &new_value(i), "broken: {i}");
  }
}

#[test]
fn concurrent_read_write_behind_lock() {
  const N: usize = 1000;
  let l = Arc::new(Mutex::new(SkipMap::new()));
  for i in 0..N {
    l.lock().upsert(key(i), new_value(i)).unwrap();
  }

  thread::scope(|s| {
    s.spawn(|| {
      for i in (0..N).step_by(2) {
        assert_eq!(l.lock().delete(&key(i)), Some(new_value(i)));
      }
    });

    s.spawn(|| {
      for i in (1..N).step_by(2) {
        assert_eq!(l.lock().get(&key(i)), Some(&new_value(i)));
      }
    });
  });

  let l = l.lock();
  assert_eq!(l.len(), N / 2);
  for i in 0..N {
    assert_eq!(l.contains_key(&key(i)), i % 2 == 1, "broken: {i}");
  }
}
