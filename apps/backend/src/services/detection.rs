//! Background duplicate detection.
//!
//! Passes run on tokio's blocking pool so request handlers never compute
//! them inline. Submitted jobs are debounced and tagged with a generation:
//! a job whose generation is no longer current when it would start is
//! dropped, and a finished pass whose generation was superseded is
//! discarded instead of published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use vocab_core::{
    detect_duplicates, find_smart_duplicates, DetectionError, DetectionRequest, DetectionResult,
    DuplicateGroup, SmartOptions, VocabularyItem,
};

/// Function that performs one grouping pass.
pub type Detector =
    Arc<dyn Fn(&DetectionRequest) -> vocab_core::Result<DetectionResult> + Send + Sync>;

/// Detection status for clients polling a submitted job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetectionStatus {
    Idle,
    Processing {
        generation: u64,
        started_at: DateTime<Utc>,
    },
    Completed {
        generation: u64,
        finished_at: DateTime<Utc>,
        result: DetectionResult,
    },
    Failed {
        generation: u64,
        error: String,
    },
}

impl DetectionStatus {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Idle => None,
            Self::Processing { generation, .. }
            | Self::Completed { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }

    /// Whether the job this status belongs to has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

/// Inner state shared across clones.
struct RunnerInner {
    debounce: Duration,
    detector: Detector,
    generation: AtomicU64,
    /// Held for the duration of a pass so only one runs at a time.
    pass_lock: Mutex<()>,
    status: watch::Sender<DetectionStatus>,
}

/// Runs duplicate detection off the request path.
///
/// Clone-able; all state lives behind an Arc.
#[derive(Clone)]
pub struct DetectionRunner {
    inner: Arc<RunnerInner>,
}

impl DetectionRunner {
    /// Create a runner using the standard exact + similar passes.
    pub fn new(debounce: Duration) -> Self {
        Self::with_detector(debounce, Arc::new(detect_duplicates))
    }

    /// Create a runner with a custom pass.
    pub fn with_detector(debounce: Duration, detector: Detector) -> Self {
        let (status, _) = watch::channel(DetectionStatus::Idle);
        Self {
            inner: Arc::new(RunnerInner {
                debounce,
                detector,
                generation: AtomicU64::new(0),
                pass_lock: Mutex::new(()),
                status,
            }),
        }
    }

    /// Get current detection status.
    pub fn status(&self) -> DetectionStatus {
        self.inner.status.borrow().clone()
    }

    /// Receive every status change.
    pub fn subscribe(&self) -> watch::Receiver<DetectionStatus> {
        self.inner.status.subscribe()
    }

    /// Generation of the most recently submitted job.
    pub fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    /// Queue a detection job and return its generation.
    ///
    /// The job waits out the debounce delay first; if another job is
    /// submitted meanwhile, only the newest one runs.
    pub fn submit(&self, request: DetectionRequest) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            generation,
            items = request.vocabularies.len(),
            "detection job submitted"
        );

        let runner = self.clone();
        tokio::spawn(async move {
            runner.run_job(generation, request).await;
        });

        generation
    }

    /// Run the exact and similar passes now and return the result.
    pub async fn run_now(&self, request: DetectionRequest) -> Result<DetectionResult, DetectionError> {
        if request.vocabularies.is_empty() {
            return Ok(DetectionResult::default());
        }
        let detector = self.inner.detector.clone();
        run_blocking(move || detector(&request)).await
    }

    /// Run the pairwise smart pass on the blocking pool.
    pub async fn run_smart(
        &self,
        items: Vec<VocabularyItem>,
        options: SmartOptions,
    ) -> Result<Vec<DuplicateGroup>, DetectionError> {
        run_blocking(move || find_smart_duplicates(&items, &options)).await
    }

    /// Wait until `generation`, or a newer job, has finished.
    pub async fn wait_for(&self, generation: u64) -> DetectionStatus {
        let mut rx = self.subscribe();
        loop {
            {
                let status = rx.borrow_and_update();
                if status.is_terminal() && status.generation().is_some_and(|g| g >= generation) {
                    return status.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.status();
            }
        }
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.current_generation() != generation
    }

    fn publish(&self, status: DetectionStatus) {
        self.inner.status.send_replace(status);
    }

    async fn run_job(&self, generation: u64, request: DetectionRequest) {
        if !self.inner.debounce.is_zero() {
            tokio::time::sleep(self.inner.debounce).await;
        }
        if self.is_stale(generation) {
            debug!(generation, "detection job coalesced into a newer request");
            return;
        }

        let _pass = self.inner.pass_lock.lock().await;
        if self.is_stale(generation) {
            debug!(generation, "detection job superseded while waiting");
            return;
        }

        self.publish(DetectionStatus::Processing {
            generation,
            started_at: Utc::now(),
        });

        let outcome = self.run_now(request).await;

        if self.is_stale(generation) {
            info!(generation, "discarding result of superseded detection job");
            return;
        }

        match outcome {
            Ok(result) => {
                info!(
                    generation,
                    groups = result.stats.total_groups,
                    potential_savings = result.stats.potential_savings,
                    "detection job completed"
                );
                self.publish(DetectionStatus::Completed {
                    generation,
                    finished_at: Utc::now(),
                    result,
                });
            }
            Err(e) => {
                warn!(generation, error = %e, "detection job failed");
                self.publish(DetectionStatus::Failed {
                    generation,
                    error: e.to_string(),
                });
            }
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, DetectionError>
where
    F: FnOnce() -> vocab_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DetectionError::Worker(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::AtomicUsize;
    use tokio_test::{assert_err, assert_ok};

    fn item(id: &str, english: &str) -> VocabularyItem {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        VocabularyItem::new(id, english, created_at)
    }

    fn request(words: &[&str]) -> DetectionRequest {
        DetectionRequest::new(
            words
                .iter()
                .enumerate()
                .map(|(i, w)| item(&i.to_string(), w))
                .collect(),
        )
    }

    fn counting_detector(calls: Arc<AtomicUsize>, delay: Duration) -> Detector {
        Arc::new(move |request: &DetectionRequest| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(delay);
            detect_duplicates(request)
        })
    }

    #[tokio::test]
    async fn test_submit_completes() {
        let runner = DetectionRunner::new(Duration::ZERO);
        assert!(matches!(runner.status(), DetectionStatus::Idle));

        let generation = runner.submit(request(&["apple", "Apple", "pear"]));
        let status = runner.wait_for(generation).await;

        match status {
            DetectionStatus::Completed { generation: g, result, .. } => {
                assert_eq!(g, generation);
                assert_eq!(result.exact.len(), 1);
                assert_eq!(result.stats.total_items, 3);
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rapid_submits_are_coalesced() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = DetectionRunner::with_detector(
            Duration::from_millis(100),
            counting_detector(calls.clone(), Duration::ZERO),
        );

        runner.submit(request(&["one"]));
        runner.submit(request(&["one", "two"]));
        let last = runner.submit(request(&["one", "two", "three"]));

        let status = runner.wait_for(last).await;

        assert_eq!(status.generation(), Some(last));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match status {
            DetectionStatus::Completed { result, .. } => assert_eq!(result.stats.total_items, 3),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = DetectionRunner::with_detector(
            Duration::ZERO,
            counting_detector(calls.clone(), Duration::from_millis(150)),
        );
        let mut rx = runner.subscribe();

        let first = runner.submit(request(&["color", "color"]));
        loop {
            rx.changed().await.unwrap();
            if matches!(*rx.borrow(), DetectionStatus::Processing { generation, .. } if generation == first) {
                break;
            }
        }

        let second = runner.submit(request(&["tree", "house", "river"]));
        let status = runner.wait_for(first).await;

        assert_eq!(status.generation(), Some(second));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match status {
            DetectionStatus::Completed { result, .. } => {
                assert!(result.exact.is_empty());
                assert_eq!(result.stats.total_items, 3);
            }
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_worker_failure_is_distinct_from_empty_result() {
        let detector: Detector = Arc::new(
            |_: &DetectionRequest| -> vocab_core::Result<DetectionResult> {
                panic!("detector crashed")
            },
        );
        let runner = DetectionRunner::with_detector(Duration::ZERO, detector);

        let generation = runner.submit(request(&["apple"]));
        let status = runner.wait_for(generation).await;

        match status {
            DetectionStatus::Failed { generation: g, error } => {
                assert_eq!(g, generation);
                assert!(!error.is_empty());
            }
            other => panic!("unexpected status: {other:?}"),
        }

        let err = assert_err!(runner.run_now(request(&["apple"])).await);
        assert!(matches!(err, DetectionError::Worker(_)));
    }

    #[tokio::test]
    async fn test_run_now_empty_collection() {
        let runner = DetectionRunner::new(Duration::ZERO);
        let result = assert_ok!(runner.run_now(DetectionRequest::new(vec![])).await);
        assert_eq!(result, DetectionResult::default());
    }

    #[tokio::test]
    async fn test_run_smart() {
        let runner = DetectionRunner::new(Duration::ZERO);
        let items = vec![item("1", "theatre"), item("2", "theater"), item("3", "lamp")];

        // theatre/theater blends to about 74.
        let options = SmartOptions {
            min_confidence: 70.0,
            ..SmartOptions::default()
        };

        let groups = assert_ok!(runner.run_smart(items, options).await);

        assert_eq!(groups.len(), 1);
        assert!(groups[0]
            .reasons
            .contains(&"Common spelling variation".to_string()));
    }
}
