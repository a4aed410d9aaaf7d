use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use stress_core::{CoreError, Coordinator, Invoker, Outcome, RunConfig, run_load};
use stress_model::{Catalog, StopCondition, WorkItem};
use tokio_util::sync::CancellationToken;

/// Records every invocation by name; fails every second call.
struct AlternatingInvoker {
    calls: AtomicU64,
    seen: Mutex<HashMap<String, u64>>,
    delay: Duration,
}

impl AlternatingInvoker {
    fn new(delay: Duration) -> Self {
        Self {
            calls: AtomicU64::new(0),
            seen: Mutex::new(HashMap::new()),
            delay,
        }
    }

    fn count(&self, name: &str) -> u64 {
        self.seen.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Invoker for AlternatingInvoker {
    fn name(&self) -> &'static str {
        "alternating"
    }

    async fn invoke(&self, item: &WorkItem) -> Outcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .seen
            .lock()
            .unwrap()
            .entry(item.name.clone())
            .or_default() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if n % 2 == 1 {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}

struct AlwaysOk;

#[async_trait]
impl Invoker for AlwaysOk {
    fn name(&self) -> &'static str {
        "ok"
    }

    async fn invoke(&self, _item: &WorkItem) -> Outcome {
        Outcome::Success
    }
}

fn catalog(names: &[&str]) -> Catalog {
    Catalog::new(names.iter().map(|n| WorkItem::new(*n)).collect()).unwrap()
}

#[tokio::test]
async fn single_item_five_attempts_single_worker() {
    let invoker = Arc::new(AlternatingInvoker::new(Duration::ZERO));
    let summary = run_load(
        catalog(&["alpine"]),
        1,
        StopCondition::MaxAttempts(5),
        invoker.clone(),
    )
    .await
    .unwrap();

    assert_eq!(summary.attempted, 5);
    assert_eq!(invoker.count("alpine"), 5);
}

#[tokio::test]
async fn always_succeeding_runtime_has_no_failures() {
    let summary = run_load(
        catalog(&["alpine"]),
        1,
        StopCondition::MaxAttempts(5),
        Arc::new(AlwaysOk),
    )
    .await
    .unwrap();

    assert_eq!(summary.attempted, 5);
    assert_eq!(summary.failed, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_counters_are_exact() {
    let invoker = Arc::new(AlternatingInvoker::new(Duration::from_millis(1)));
    let summary = run_load(
        catalog(&["a", "b", "c"]),
        8,
        StopCondition::MaxAttempts(200),
        invoker.clone(),
    )
    .await
    .unwrap();

    assert_eq!(summary.attempted, 200);
    assert_eq!(summary.failed, 100);
    assert!(summary.failed <= summary.attempted);
    assert_eq!(invoker.calls.load(Ordering::SeqCst), 200);

    // 200 pushes over a 3-item catalog: a gets the extra two.
    assert_eq!(invoker.count("a"), 67);
    assert_eq!(invoker.count("b"), 67);
    assert_eq!(invoker.count("c"), 66);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn duration_run_terminates_and_drains() {
    let invoker = Arc::new(AlternatingInvoker::new(Duration::from_millis(10)));
    let workers = 4;
    let summary = run_load(
        catalog(&["a", "b"]),
        workers,
        StopCondition::Duration(Duration::from_millis(100)),
        invoker.clone(),
    )
    .await
    .unwrap();

    assert!(summary.attempted > 0);
    assert!(summary.failed <= summary.attempted);
    assert_eq!(summary.attempted, invoker.calls.load(Ordering::SeqCst));
    assert!(summary.elapsed >= Duration::from_millis(100));
    // At the deadline at most `workers` items are in flight and `workers` buffered.
    assert!(summary.elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn zero_workers_fail_fast() {
    let err = run_load(
        catalog(&["a"]),
        0,
        StopCondition::MaxAttempts(1),
        Arc::new(AlwaysOk),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::NoWorkers));
}

#[tokio::test]
async fn shutdown_token_ends_unbounded_run() {
    let token = CancellationToken::new();
    let coordinator = Coordinator::new(
        RunConfig {
            workers: 2,
            stop: StopCondition::MaxAttempts(u64::MAX),
        },
        Arc::new(AlternatingInvoker::new(Duration::from_millis(1))),
    )
    .with_shutdown(token.clone());

    let run = tokio::spawn(async move { coordinator.run(catalog(&["a"])).await });
    tokio::time::sleep(Duration::from_millis(30)).await;
    token.cancel();

    let summary = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("run must finish after shutdown")
        .unwrap()
        .unwrap();
    assert!(summary.attempted > 0);
}
