use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};

use super::config::HarnessConfig;
use super::log::{LogAggregator, LogSink};
use super::selection::{TestCategory, TestPlan};
use super::suites::{SuiteContext, run_suite};
use crate::engine::SidhEngine;
use crate::protocols::sidh_parameters::ParameterSetId;

/// Result of a `start` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// The plan selects no category, so there is nothing to run.
    EmptyCategories,
    AlreadyRunning,
    /// The worker thread could not be created.
    SpawnFailed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteOutcome {
    pub set: ParameterSetId,
    pub category: TestCategory,
    pub passed: bool,
}

/// Completion message of a run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub plan: TestPlan,
    pub outcomes: Vec<SuiteOutcome>,
    pub elapsed: Duration,
    /// `elapsed` divided by the configured iteration count.
    pub normalized: Duration,
    /// Whether the deadline stopped the run before the plan was done.
    pub deadline_hit: bool,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }
}

/// Runs a plan on a background thread: `Idle -> Running -> Idle`.
///
/// The runner only goes back to idle once its owner has collected the
/// report with `try_complete` or `wait_complete`.
pub struct TestRunner {
    log: LogAggregator,
    engine: SidhEngine,
    config: HarnessConfig,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
    completion_tx: Sender<RunReport>,
    completion_rx: Receiver<RunReport>,
}

impl TestRunner {
    /// A runner writing to `log`, with engine diagnostics routed to it too.
    pub fn new(log: LogAggregator, config: HarnessConfig) -> Self {
        let mut engine = SidhEngine::new();
        engine.enable_logging(log.sink_with_level(config.max_log_level));
        let (completion_tx, completion_rx) = unbounded();
        Self {
            log,
            engine,
            config,
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
            completion_tx,
            completion_rx,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Start running `plan` without blocking.
    pub fn start(&self, plan: TestPlan) -> StartOutcome {
        if plan.categories.is_empty() {
            tracing::debug!("run rejected: no category selected");
            return StartOutcome::EmptyCategories;
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("run rejected: a run is in flight");
            return StartOutcome::AlreadyRunning;
        }

        // Cleared before the worker exists, so before its first append
        self.log.clear();

        let engine = self.engine.clone();
        let sink = self.log.sink_with_level(self.config.max_log_level);
        let config = self.config.clone();
        let completion_tx = self.completion_tx.clone();
        let sets = plan.sets.len();
        let categories = plan.categories.bits();

        let spawned = thread::Builder::new()
            .name("sidh-runner".to_string())
            .spawn(move || {
                let report = execute(plan, &engine, &sink, &config);
                let _ = completion_tx.send(report);
            });

        match spawned {
            Ok(handle) => {
                tracing::info!(sets, categories, "run started");
                *self.lock_worker() = Some(handle);
                StartOutcome::Started
            }
            Err(e) => {
                tracing::error!(error = %e, "could not spawn the runner thread");
                self.running.store(false, Ordering::Release);
                StartOutcome::SpawnFailed
            }
        }
    }

    fn lock_worker(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Join the worker and go back to idle.
    fn finish(&self) {
        if let Some(handle) = self.lock_worker().take() {
            if handle.join().is_err() {
                tracing::error!("runner thread panicked");
            }
        }
        self.running.store(false, Ordering::Release);
    }

    /// Collect the report of a finished run, if there is one.
    pub fn try_complete(&self) -> Option<RunReport> {
        match self.completion_rx.try_recv() {
            Ok(report) => {
                self.finish();
                Some(report)
            }
            Err(_) => {
                // A worker that died without reporting still ends the run
                let dead = self
                    .lock_worker()
                    .as_ref()
                    .is_some_and(|handle| handle.is_finished())
                    && self.completion_rx.is_empty();
                if dead {
                    self.log.sink().error("Test run aborted");
                    self.finish();
                }
                None
            }
        }
    }

    /// Block until the report of the current run arrives or `timeout`
    /// passes.
    pub fn wait_complete(&self, timeout: Duration) -> Option<RunReport> {
        if !self.is_running() {
            return None;
        }
        match self.completion_rx.recv_timeout(timeout) {
            Ok(report) => {
                self.finish();
                Some(report)
            }
            Err(_) => self.try_complete(),
        }
    }
}

/// Body of the worker thread.
fn execute(plan: TestPlan, engine: &SidhEngine, sink: &LogSink, config: &HarnessConfig) -> RunReport {
    let start = Instant::now();
    let ctx = SuiteContext {
        engine,
        sink,
        config,
    };

    let mut outcomes = Vec::new();
    let mut deadline_hit = false;
    'sets: for &set in &plan.sets {
        sink.info(format!("Testing SIDH on {set}"));
        for category in plan.categories.iter() {
            if config.deadline.is_some_and(|d| start.elapsed() >= d) {
                sink.info("Run deadline reached, skipping the remaining tests");
                deadline_hit = true;
                break 'sets;
            }
            sink.info(format!(" {set} {category}:"));
            let passed = run_suite(&ctx, set, category);
            if !passed {
                tracing::warn!(%set, %category, "suite failed");
            }
            outcomes.push(SuiteOutcome {
                set,
                category,
                passed,
            });
        }
    }

    let elapsed = start.elapsed();
    let iterations = config.elapsed_iterations.max(1);
    let normalized = elapsed / iterations;
    sink.info(format!(
        "Elapsed time: {:.3} s ({normalized:?} per iteration over {iterations})",
        elapsed.as_secs_f64()
    ));

    RunReport {
        plan,
        outcomes,
        elapsed,
        normalized,
        deadline_hit,
    }
}
