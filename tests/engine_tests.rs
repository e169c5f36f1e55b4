//! Integration Tests for the Cache Engine
//!
//! Exercises the engine together with its background sweeper: expiry
//! timelines, sweep convergence and concurrent access from many threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sweepcache::cache::CriticalSection;
use sweepcache::{CacheEngine, Config, KeyHasher, OpaqueKey, XxKeyHasher};
use tokio::runtime::Handle;

fn config(sweep_interval_ms: u64) -> Config {
    Config {
        sweep_interval_ms,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_expiry_timeline_with_one_second_sweeps() {
    let cache: CacheEngine<OpaqueKey, String> = CacheEngine::from_config(&config(1000)).unwrap();
    let key = XxKeyHasher.hash_key(b"a");

    assert!(!cache.set(key, "1".to_string(), 1));
    assert_eq!(cache.get(&key, String::new()), "1");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(cache.get(&key, "default".to_string()), "default");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(cache.len(), 0, "entry should be swept by t=3");

    cache.shutdown().await;
}

#[tokio::test]
async fn test_remove_converges_within_one_interval() {
    let cache: CacheEngine<String, u64> = CacheEngine::from_config(&config(200)).unwrap();

    for i in 0..100 {
        cache.set(format!("key{}", i), i, 0);
    }
    for i in (0..100).step_by(2) {
        cache.remove(format!("key{}", i).as_str());
    }
    assert_eq!(cache.len(), 100);
    assert_eq!(cache.live_len(), 50);

    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(cache.len(), 50);
    assert_eq!(cache.get("key1", 0), 1);
    assert_eq!(cache.get("key2", 0), 0);
    cache.shutdown().await;
}

#[tokio::test]
async fn test_sweeper_runs_erasures_in_critical_section() {
    let entered = Arc::new(AtomicUsize::new(0));
    let counter = entered.clone();
    let section: Arc<dyn CriticalSection> = Arc::new(move |release: &mut dyn FnMut()| {
        counter.fetch_add(1, Ordering::SeqCst);
        release();
    });

    let cache: CacheEngine<String, String> =
        CacheEngine::with_critical_section(&config(100), &Handle::current(), section);

    cache.set("a".to_string(), "1".to_string(), 0);
    cache.remove("a");

    tokio::time::sleep(Duration::from_millis(350)).await;

    assert!(cache.is_empty());
    assert_eq!(entered.load(Ordering::SeqCst), 1, "one pass erased the entry");
    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_access_never_tears_values() {
    let cache: Arc<CacheEngine<u32, Vec<u32>>> =
        Arc::new(CacheEngine::from_config(&config(5)).unwrap());

    let workers: Vec<_> = (0..8u32)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for round in 0..2_000u32 {
                    let key = round % 32;
                    match (worker + round) % 4 {
                        0 | 1 => {
                            // Every element equals the length: a torn value breaks that
                            let len = (worker * 7 + round) % 16 + 1;
                            cache.set(key, vec![len; len as usize], (round % 3) as u64);
                        }
                        2 => {
                            let value = cache.get(&key, Vec::new());
                            assert!(value.iter().all(|&x| x as usize == value.len()));
                        }
                        _ => cache.remove(&key),
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(cache.len() <= 32);
    assert!(cache.stats().sweeps > 0, "sweeper ran during the workload");
    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_values_outlive_concurrent_sweep() {
    let cache: Arc<CacheEngine<&'static str, Arc<String>>> =
        Arc::new(CacheEngine::from_config(&config(10)).unwrap());

    cache.set("shared", Arc::new("payload".to_string()), 0);
    let held = cache.get(&"shared", Arc::new(String::new()));

    cache.remove(&"shared");
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(cache.is_empty());
    assert_eq!(held.as_str(), "payload");
    cache.shutdown().await;
}

#[tokio::test]
async fn test_set_after_sweep_decision_survives() {
    let cache: CacheEngine<String, String> = CacheEngine::from_config(&config(60_000)).unwrap();

    cache.set("k".to_string(), "old".to_string(), 0);
    cache.remove("k");
    cache.set("k".to_string(), "new".to_string(), 0);

    assert_eq!(cache.sweep_now(), 0);
    assert_eq!(cache.get("k", String::new()), "new");
    cache.shutdown().await;
}
