use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Barrier};
use std::thread;
use type_info_cache::{CacheConfig, Token, TypeInfo, TypeInfoCache};

fn requests() -> Vec<(Token, Vec<Token>)> {
  let bases = ["", "Mesh", "Xform", "Camera"];
  let traits = ["A", "B", "C"];
  let mut out = Vec::new();
  for base in bases {
    out.push((Token::new(base), Vec::new()));
    for first in traits {
      out.push((Token::new(base), vec![Token::new(first)]));
      for second in traits {
        if first != second {
          out.push((Token::new(base), vec![Token::new(first), Token::new(second)]));
        }
      }
    }
  }
  out
}

#[test]
fn concurrent_creation_of_one_key_converges() {
  const THREADS: usize = 16;

  let cache: Arc<TypeInfoCache> = Arc::new(TypeInfoCache::new());
  let barrier = Arc::new(Barrier::new(THREADS));
  let handles: Vec<_> = (0..THREADS)
    .map(|_| {
      let cache = cache.clone();
      let barrier = barrier.clone();
      thread::spawn(move || {
        barrier.wait();
        cache.find_or_create(
          &Token::new("Mesh"),
          vec![Token::new("Physics"), Token::new("Collision")],
        )
      })
    })
    .collect();

  let results: Vec<Arc<TypeInfo>> = handles
    .into_iter()
    .map(|handle| handle.join().expect("thread panicked"))
    .collect();

  for result in &results[1..] {
    assert!(Arc::ptr_eq(result, &results[0]));
  }
  assert_eq!(cache.len(), 1);

  let published = cache.entries();
  assert!(Arc::ptr_eq(&published[0].1, &results[0]));

  let stats = cache.stats();
  assert_eq!(stats.insertions, 1);
  assert_eq!(stats.misses, stats.insertions + stats.discarded);
  assert_eq!(stats.hits + stats.misses, THREADS as u64);
}

#[test]
fn shuffled_workloads_agree_on_every_descriptor() {
  const THREADS: usize = 8;
  const ROUNDS: usize = 4;

  let requests = Arc::new(requests());
  let cache: Arc<TypeInfoCache> = Arc::new(
    TypeInfoCache::with_config(CacheConfig::default().with_shard_amount(4)).unwrap(),
  );
  let barrier = Arc::new(Barrier::new(THREADS));

  let handles: Vec<_> = (0..THREADS)
    .map(|thread_idx| {
      let cache = cache.clone();
      let barrier = barrier.clone();
      let requests = requests.clone();
      thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(thread_idx as u64);
        let mut out: Vec<Option<Arc<TypeInfo>>> = vec![None; requests.len()];
        barrier.wait();
        for _ in 0..ROUNDS {
          let mut order: Vec<usize> = (0..requests.len()).collect();
          order.shuffle(&mut rng);
          for idx in order {
            let (base, traits) = &requests[idx];
            let info = cache.find_or_create(base, traits.clone());
            if let Some(previous) = &out[idx] {
              assert!(Arc::ptr_eq(previous, &info), "descriptor changed between rounds");
            }
            out[idx] = Some(info);
          }
        }
        out
          .into_iter()
          .map(|info| info.expect("every request was made"))
          .collect::<Vec<_>>()
      })
    })
    .collect();

  let results: Vec<_> = handles
    .into_iter()
    .map(|handle| handle.join().expect("thread panicked"))
    .collect();

  for (thread_idx, result) in results.iter().enumerate() {
    for (idx, info) in result.iter().enumerate() {
      assert!(
        Arc::ptr_eq(info, &results[0][idx]),
        "thread {thread_idx} got a different descriptor for request {idx}"
      );
    }
  }

  // Everything except the single empty request lives in the table.
  assert_eq!(cache.len(), requests.len() - 1);
  for (idx, (base, traits)) in requests.iter().enumerate() {
    let info = &results[0][idx];
    assert_eq!(info.base_type(), base);
    assert_eq!(info.traits(), traits.as_slice());
  }
  assert!(Arc::ptr_eq(&results[0][0], &cache.empty_type_info()));

  let stats = cache.stats();
  assert_eq!(stats.insertions, cache.len() as u64);
  assert_eq!(stats.misses, stats.insertions + stats.discarded);
  assert_eq!(stats.empty_hits, (THREADS * ROUNDS) as u64);
}
