use std::sync::Arc;
use std::thread;

use type_info_cache::{CacheConfig, Token, TypeInfoCache};

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  // One cache for the whole process, shared by reference from here.
  let cache: Arc<TypeInfoCache> = Arc::new(
    TypeInfoCache::with_config(CacheConfig::default().with_initial_capacity(64))
      .expect("valid cache config"),
  );

  let handles: Vec<_> = ["Collision", "Physics"]
    .into_iter()
    .map(|name| {
      let cache = cache.clone();
      thread::spawn(move || cache.find_or_create(&Token::new("Mesh"), vec![Token::new(name)]))
    })
    .collect();
  for handle in handles {
    let info = handle.join().expect("thread panicked");
    println!("{info} -> {:p}", Arc::as_ptr(&info));
  }

  let again = cache.find_or_create(&Token::new("Mesh"), vec![Token::new("Physics")]);
  println!("{again} -> {:p} (reused)", Arc::as_ptr(&again));
  println!("{:?}", cache.stats());
}
