// tests/worker_pool.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parbuild::engine::{detect_parallelism, pool_size, WorkerPool};
use parbuild::errors::ParbuildError;
use parbuild_test_utils::with_timeout;

#[test]
fn pool_size_leaves_one_core_free() {
    assert_eq!(pool_size(1), 1);
    assert_eq!(pool_size(2), 1);
    assert_eq!(pool_size(4), 3);
    assert_eq!(pool_size(16), 15);
}

#[test]
fn pool_size_never_zero() {
    assert_eq!(pool_size(0), 1);
    assert_eq!(WorkerPool::new(0).size(), 1);
}

#[test]
fn host_pool_matches_detected_parallelism() {
    assert!(detect_parallelism() >= 1);
    assert_eq!(WorkerPool::for_host().size(), pool_size(detect_parallelism()));
}

#[tokio::test]
async fn scope_returns_results_in_input_order() {
    let pool = WorkerPool::new(3);

    let results = with_timeout(pool.scope(vec![30u64, 10, 20], |ms| async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        ms * 2
    }))
    .await
    .unwrap();

    assert_eq!(results, vec![Some(60), Some(20), Some(40)]);
}

#[tokio::test]
async fn scope_bounds_in_flight_jobs() {
    let pool = WorkerPool::new(2);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let results = with_timeout(pool.scope((0..6).collect::<Vec<_>>(), |n| {
        let in_flight = Arc::clone(&in_flight);
        let peak = Arc::clone(&peak);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            n
        }
    }))
    .await
    .unwrap();

    assert_eq!(results.iter().flatten().count(), 6);
    assert_eq!(peak.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stop_signal_prevents_further_dispatch() {
    let pool = WorkerPool::new(1);
    let stop = pool.stop_signal();

    let results = with_timeout(pool.scope(vec![1, 2, 3], |n| {
        let stop = stop.clone();
        async move {
            if n == 1 {
                stop.stop();
            }
            n
        }
    }))
    .await
    .unwrap();

    assert_eq!(results, vec![Some(1), None, None]);
    assert!(stop.is_stopped());
}

#[tokio::test]
async fn panicking_job_is_a_pool_failure() {
    let pool = WorkerPool::new(2);

    let result = with_timeout(pool.scope(vec![1, 2], |n| async move {
        if n == 2 {
            panic!("worker blew up");
        }
        n
    }))
    .await;

    assert!(matches!(result, Err(ParbuildError::Join(_))), "got {result:?}");
}
