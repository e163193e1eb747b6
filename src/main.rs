use std::process::ExitCode;
use std::time::Duration;

use sidh_harness::harness::config::HarnessConfig;
use sidh_harness::harness::runner::StartOutcome;
use sidh_harness::harness::selection::TestCategory;
use sidh_harness::harness::session::TestSession;
use sidh_harness::protocols::sidh_parameters::ParameterSetId;

fn category_from_arg(arg: &str) -> Option<TestCategory> {
    match arg {
        "tests" => Some(TestCategory::TestsOnly),
        "bench" => Some(TestCategory::Benchmarks),
        "ec" => Some(TestCategory::EcIsogenyFunctions),
        "dh" => Some(TestCategory::DiffieHellman),
        _ => None,
    }
}

/// Usage: sidh_harness [all] [P434|P503|P610|P751]... [tests|bench|ec|dh]...
/// With no arguments, runs the Diffie-Hellman tests on P434.
fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let config = match HarnessConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut session = TestSession::new(config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        session.toggle_parameter_set(ParameterSetId::P434, true);
        session.toggle_category(TestCategory::DiffieHellman, true);
    }
    for arg in &args {
        let lower = arg.to_ascii_lowercase();
        if lower == "all" {
            session.set_run_everything(true);
        } else if let Some(id) = ParameterSetId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(arg))
        {
            session.toggle_parameter_set(id, true);
        } else if let Some(category) = category_from_arg(&lower) {
            session.toggle_category(category, true);
        } else {
            eprintln!("unknown argument {arg:?}");
            return ExitCode::FAILURE;
        }
    }

    let Some(observer) = session.observer() else {
        return ExitCode::FAILURE;
    };
    match session.start() {
        StartOutcome::Started => {}
        outcome => {
            eprintln!("nothing to run: {outcome:?}");
            return ExitCode::FAILURE;
        }
    }

    // Pull the snapshot on every change and print what is new
    let mut printed = 0;
    loop {
        if let Some(report) = session.wait_for_completion(Duration::from_millis(50)) {
            print!("{}", &session.snapshot()[printed..]);
            return if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        if !session.is_running() {
            return ExitCode::FAILURE;
        }
        if observer.try_recv().is_ok() {
            let snapshot = session.snapshot();
            print!("{}", &snapshot[printed..]);
            printed = snapshot.len();
        }
    }
}
