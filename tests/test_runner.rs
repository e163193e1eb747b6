#[cfg(test)]
mod test_runner {
    use std::time::Duration;

    use sidh_harness::harness::config::HarnessConfig;
    use sidh_harness::harness::log::LogAggregator;
    use sidh_harness::harness::runner::{StartOutcome, TestRunner};
    use sidh_harness::harness::selection::{CategoryMask, TestCategory, TestPlan};
    use sidh_harness::harness::session::TestSession;
    use sidh_harness::protocols::sidh_parameters::ParameterSetId;

    const WAIT: Duration = Duration::from_secs(600);

    fn quick_config() -> HarnessConfig {
        HarnessConfig::default()
            .with_test_loops(1)
            .with_bench_loops(1)
            .with_elapsed_iterations(1)
    }

    #[test]
    fn test_empty_categories() {
        let mut session = TestSession::new(quick_config());
        session.toggle_parameter_set(ParameterSetId::P434, true);
        assert_eq!(session.start(), StartOutcome::EmptyCategories);
        assert!(!session.is_running());
        assert!(session.poll_completion().is_none());

        // Nothing was run, so the selection is left alone
        assert!(session.selector().is_parameter_set_selected(ParameterSetId::P434));
    }

    #[test]
    fn test_key_exchange_run() {
        let mut session = TestSession::new(quick_config());
        let observer = session.observer().unwrap();
        assert!(session.observer().is_none());

        session.toggle_parameter_set(ParameterSetId::P434, true);
        session.toggle_category(TestCategory::DiffieHellman, true);
        assert_eq!(session.start(), StartOutcome::Started);
        assert!(session.is_running());
        assert_eq!(session.start(), StartOutcome::AlreadyRunning);

        let report = session.wait_for_completion(WAIT).unwrap();
        assert!(!session.is_running());
        assert!(session.selector().is_empty());
        assert!(report.passed());
        assert!(!report.deadline_hit);
        assert_eq!(report.plan.sets, vec![ParameterSetId::P434]);
        assert_eq!(report.outcomes.len(), 1);
        assert!(observer.try_recv().is_ok());

        let log = session.snapshot();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines[0], "Testing SIDH on P434");
        assert_eq!(lines[1], " P434 Diffie-Hellman:");
        for step in [
            "Alice's private key",
            "Bob's private key",
            "Alice's key generation",
            "Bob's key generation",
            "Alice's shared key computation",
            "Bob's shared key computation",
        ] {
            let line = format!("  P434 exchange 1: {step} ... done");
            assert!(lines.contains(&line.as_str()), "missing {line}");
        }
        assert!(log.contains("Key exchange tests ................. PASSED"));
        assert!(lines.last().unwrap().starts_with("Elapsed time:"));

        // A later run starts from an empty log
        session.toggle_parameter_set(ParameterSetId::P434, true);
        session.toggle_category(TestCategory::DiffieHellman, true);
        assert_eq!(session.start(), StartOutcome::Started);
        session.wait_for_completion(WAIT).unwrap();
        assert_eq!(session.snapshot().matches("Testing SIDH on").count(), 1);
    }

    #[test]
    fn test_all_categories_on_one_set() {
        let mut session = TestSession::new(quick_config());
        session.toggle_parameter_set(ParameterSetId::P434, true);
        for category in TestCategory::ALL {
            session.toggle_category(category, true);
        }
        assert_eq!(session.start(), StartOutcome::Started);

        let report = session.wait_for_completion(WAIT).unwrap();
        assert!(report.passed());
        assert_eq!(report.plan.categories, CategoryMask::ALL);
        let ran: Vec<TestCategory> = report.outcomes.iter().map(|o| o.category).collect();
        assert_eq!(ran, TestCategory::ALL.to_vec());
        for outcome in &report.outcomes {
            assert_eq!(outcome.set, ParameterSetId::P434);
            assert!(outcome.passed, "{} failed", outcome.category);
        }

        let log = session.snapshot();
        for header in [
            " P434 tests:",
            " P434 benchmarks:",
            " P434 EC/isogeny functions:",
            " P434 Diffie-Hellman:",
        ] {
            assert!(log.lines().any(|l| l == header), "missing {header}");
        }
        for line in [
            "GF(p^2) arithmetic tests ........... PASSED",
            "Torsion basis tests ................ PASSED",
            "GF(p^2) multiplication runs in",
            "GF(p^2) inversion runs in",
            "Three-point ladder runs in",
            "2^ea isogeny walk runs in",
            "3^eb isogeny walk runs in",
            "Key exchange tests ................. PASSED",
        ] {
            assert!(log.contains(line), "missing {line}");
        }
        assert!(!log.contains("FAILED"));
    }

    #[test]
    fn test_run_everything_is_reset() {
        let mut session = TestSession::new(quick_config().with_deadline(Duration::ZERO));
        session.set_run_everything(true);
        assert_eq!(session.start(), StartOutcome::Started);

        let report = session.wait_for_completion(WAIT).unwrap();
        assert!(report.deadline_hit);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.plan.categories, CategoryMask::ALL);
        assert!(!session.selector().run_everything());
        assert!(session.selector().is_empty());
        assert!(session.snapshot().contains("Run deadline reached"));
    }

    #[test]
    fn test_runner_without_session() {
        let log = LogAggregator::default();
        let runner = TestRunner::new(log.clone(), quick_config());
        assert!(runner.wait_complete(Duration::from_millis(1)).is_none());

        let plan = TestPlan::new(&[], CategoryMask::from(TestCategory::TestsOnly));
        assert_eq!(runner.start(plan), StartOutcome::Started);
        let report = runner.wait_complete(WAIT).unwrap();
        assert!(report.outcomes.is_empty());
        assert!(!runner.is_running());
        assert!(log.snapshot().starts_with("Elapsed time:"));
    }
}
