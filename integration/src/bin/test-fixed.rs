use integration::{key, new_value, run_each, SharedMap};
use parking_lot::Mutex;
use skipmap::{Ascend, Error, Options, SkipMap};
use std::sync::Arc;

fn main() {
  const N: usize = 1000;
  let opts = Options::new().with_capacity(Some(N as u32));
  let l: SharedMap = Arc::new(Mutex::new(SkipMap::with_options(opts, Ascend).unwrap()));

  run_each(&l, N, |l, i| {
    l.lock().upsert(key(i), new_value(i)).unwrap();
  });
  assert_eq!(N, l.lock().len());

  // Every slot is taken: new keys are refused, existing ones still update.
  run_each(&l, N, |l, i| {
    let mut l = l.lock();
    assert_eq!(l.upsert(key(N + i), new_value(i)), Err(Error::Full(N as u32)));
    assert_eq!(l.upsert(key(i), new_value(N + i)).unwrap(), Some(new_value(i)));
  });

  for i in 0..N {
    assert_eq!(l.lock().get(&key(i)).unwrap(), &new_value(N + i), "broken: {i}");
  }
}
