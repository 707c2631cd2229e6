use integration::{big_value, key, new_value, run_each, SharedMap};
use parking_lot::Mutex;
use skipmap::SkipMap;
use std::sync::Arc;

fn main() {
  {
    const N: usize = 1000;
    let l: SharedMap = Arc::new(Mutex::new(SkipMap::new()));
    run_each(&l, N, |l, i| {
      l.lock().upsert(key(i), new_value(i)).unwrap();
    });
    assert_eq!(N, l.lock().len());
    run_each(&l, N, |l, i| {
      let k = key(i);
      assert_eq!(l.lock().get(&k).unwrap(), &new_value(i), "broken: {i}");
    });
    run_each(&l, N, |l, i| {
      if i % 2 == 0 {
        assert_eq!(l.lock().delete(&key(i)).unwrap(), new_value(i), "broken: {i}");
      }
    });
    assert_eq!(N / 2, l.lock().len());
  }

  {
    const N2: usize = 100;
    let l: SharedMap = Arc::new(Mutex::new(SkipMap::new()));
    run_each(&l, N2, |l, i| {
      l.lock().upsert(key(i), big_value(i)).unwrap();
    });
    assert_eq!(N2, l.lock().len());
    run_each(&l, N2, |l, i| {
      let k = key(i);
      assert_eq!(l.lock().get(&k).unwrap(), &big_value(i), "broken: {i}");
    });
  }
}
