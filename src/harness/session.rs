use std::time::Duration;

use crossbeam_channel::Receiver;

use super::config::HarnessConfig;
use super::log::LogAggregator;
use super::runner::{RunReport, StartOutcome, TestRunner};
use super::selection::{TestCategory, TestSelector};
use crate::protocols::sidh_parameters::ParameterSetId;

/// The owning context of a test session: the selection, the log and the
/// runner. Completed runs are collected here, which is also where the
/// selection gets reset.
pub struct TestSession {
    selector: TestSelector,
    log: LogAggregator,
    runner: TestRunner,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl TestSession {
    pub fn new(config: HarnessConfig) -> Self {
        let log = LogAggregator::new(config.max_log_level);
        let runner = TestRunner::new(log.clone(), config);
        Self {
            selector: TestSelector::new(),
            log,
            runner,
        }
    }

    pub fn selector(&self) -> &TestSelector {
        &self.selector
    }

    pub fn toggle_parameter_set(&mut self, id: ParameterSetId, on: bool) -> bool {
        self.selector.toggle_parameter_set(id, on)
    }

    pub fn toggle_category(&mut self, category: TestCategory, on: bool) -> bool {
        self.selector.toggle_category(category, on)
    }

    pub fn set_run_everything(&mut self, on: bool) {
        self.selector.set_run_everything(on)
    }

    pub fn reset(&mut self) {
        self.selector.reset()
    }

    /// Start a run of the current selection in the background.
    pub fn start(&mut self) -> StartOutcome {
        self.runner.start(self.selector.build_plan())
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Run the end-of-run transition if the worker is done.
    fn complete(&mut self, was_running: bool, report: Option<RunReport>) -> Option<RunReport> {
        if report.is_some() || (was_running && !self.runner.is_running()) {
            self.selector.reset();
        }
        report
    }

    /// Collect a finished run without blocking. On completion the runner
    /// is idle and the selection is empty.
    pub fn poll_completion(&mut self) -> Option<RunReport> {
        let was_running = self.runner.is_running();
        let report = self.runner.try_complete();
        self.complete(was_running, report)
    }

    /// As `poll_completion`, waiting up to `timeout` for the run to end.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> Option<RunReport> {
        let was_running = self.runner.is_running();
        let report = self.runner.wait_complete(timeout);
        self.complete(was_running, report)
    }

    /// The single change notification receiver; `None` once taken.
    pub fn observer(&self) -> Option<Receiver<()>> {
        self.log.observer()
    }

    pub fn snapshot(&self) -> String {
        self.log.snapshot()
    }

    pub fn log(&self) -> &LogAggregator {
        &self.log
    }
}
