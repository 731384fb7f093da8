//! Concurrent access tests
//!
//! Amount validation runs on every keystroke from any number of callers,
//! and the event log is shared between them.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use tempfile::TempDir;

use swapguard_core::{
    check_amount, format_max_amount, EntryPoint, LogEvent, LoggingService, DEFAULT_DECIMALS,
};

/// Number of concurrent threads for stress tests
const THREAD_COUNT: usize = 6;

/// Number of iterations per thread
const ITERATIONS_PER_THREAD: usize = 50;

/// Pure validation gives the same verdict no matter how many threads call it
#[test]
fn test_concurrent_validation_is_deterministic() {
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let mismatches = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let barrier = Arc::clone(&barrier);
            let mismatches = Arc::clone(&mismatches);

            thread::spawn(move || {
                barrier.wait();

                for i in 0..ITERATIONS_PER_THREAD {
                    let balance = (thread_id * 1000 + i) as f64 + 0.125;
                    let max = format_max_amount(balance, DEFAULT_DECIMALS);

                    let at_max = check_amount(max.as_str(), balance, DEFAULT_DECIMALS);
                    let over = check_amount(format!("{}1", max).as_str(), balance, DEFAULT_DECIMALS);

                    if !at_max.valid || over.valid || at_max.used_fallback() {
                        mismatches.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(mismatches.load(Ordering::SeqCst), 0);
}

/// One logging service shared across threads records every event
#[test]
fn test_shared_logging_service() {
    let temp_dir = TempDir::new().unwrap();
    let service = Arc::new(
        LoggingService::new(temp_dir.path(), EntryPoint::Library, "test").unwrap(),
    );
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for i in 0..5 {
                    service
                        .log(LogEvent::new(format!("event_{}_{}", thread_id, i)).with_token("ETH"))
                        .expect("log failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(service.count().unwrap(), (THREAD_COUNT * 5) as u64);

    let recent = service.get_recent(1000).unwrap();
    let mut ids: Vec<_> = recent.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), THREAD_COUNT * 5, "log ids must be unique");
}
