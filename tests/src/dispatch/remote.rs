use std::time::Duration;

use rdpctl_common::capability::{CredentialCheck, Platform};
use rdpctl_common::command::{Command, RemoteProbe};
use rdpctl_common::config::DispatchConfig;
use rdpctl_common::error::DispatchError;
use rdpctl_common::network::target::TargetSpec;
use rdpctl_common::session::{Report, Stream};
use rdpctl_core::dispatcher::{Outcome, SweepReport};

use crate::support::{self, Bridge, Call, Run};

fn probe(target: &str) -> RemoteProbe {
    let target: TargetSpec = target.parse().unwrap();
    RemoteProbe::new(target, "john").with_password("secret")
}

fn report(run: &Run) -> &SweepReport {
    match &run.outcome {
        Ok(Outcome::Swept(report)) => report,
        other => panic!("expected a sweep, got {other:?}"),
    }
}

#[tokio::test]
async fn single_host_gets_exactly_one_check_with_defaults() {
    let run = support::run(
        Bridge::admin(),
        Platform::Linux,
        Command::RemoteProbe(probe("192.168.1.5")),
        DispatchConfig::default(),
    )
    .await;

    assert_eq!(
        run.bridge.calls(),
        vec![Call::Credentials(CredentialCheck {
            host: "192.168.1.5".into(),
            username: "john".into(),
            password: "secret".into(),
            domain: "workgroup".into(),
            hashes: None,
        })]
    );
    assert_eq!(report(&run).succeeded(), 1);
}

#[tokio::test]
async fn remote_sweep_ignores_the_endpoint_platform_and_privilege() {
    let bridge = Bridge {
        admin: false,
        ..Bridge::admin()
    };
    let run = support::run(
        bridge,
        Platform::Darwin,
        Command::RemoteProbe(probe("db01.corp.local")),
        DispatchConfig::default(),
    )
    .await;

    assert_eq!(support::credential_hosts(&run.bridge.calls()), vec!["db01.corp.local"]);
    assert!(!run.bridge.calls().contains(&Call::Privilege));
}

#[tokio::test]
async fn rejected_host_does_not_stop_the_sweep() {
    let run = support::run(
        Bridge::admin().rejecting("10.0.0.1"),
        Platform::Windows,
        Command::RemoteProbe(probe("10.0.0.0/30")),
        DispatchConfig::default(),
    )
    .await;

    assert_eq!(
        support::credential_hosts(&run.bridge.calls()),
        vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
    );

    let report = report(&run);
    assert_eq!(report.succeeded(), 3);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcomes[1].result,
        Err(DispatchError::RemoteCapabilityError { .. })
    ));

    let errors = run.console.reports(Report::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("10.0.0.1:"));
    assert!(run
        .console
        .lines()
        .iter()
        .any(|(source, stream, line)| source == "10.0.0.1"
            && *stream == Stream::Stderr
            && line == "STATUS_LOGON_FAILURE"));
}

#[tokio::test]
async fn every_host_is_captured_and_restored_once() {
    let run = support::run(
        Bridge::admin().rejecting("172.16.0.3"),
        Platform::Windows,
        Command::RemoteProbe(probe("172.16.0.0/29")),
        DispatchConfig::default(),
    )
    .await;

    let stats = run.session.capture_stats();
    assert_eq!(stats.acquired, 8);
    assert_eq!(stats.restored, 8);
    assert_eq!(stats.active, 0);
    assert_eq!(run.session.owner(), None);
}

#[tokio::test(start_paused = true)]
async fn parallel_sweep_keeps_resolution_order() {
    let config = DispatchConfig {
        concurrency: 4,
        call_timeout: Duration::from_secs(5),
        ..DispatchConfig::default()
    };
    let run = support::run(
        Bridge::admin(),
        Platform::Windows,
        Command::RemoteProbe(probe("192.168.56.0/28")),
        config,
    )
    .await;

    let report = report(&run);
    let expected: Vec<String> = (0..16).map(|i| format!("192.168.56.{i}")).collect();
    assert_eq!(report.hosts().collect::<Vec<_>>(), expected);
    assert_eq!(report.succeeded(), 16);
    assert_eq!(run.session.capture_stats().active, 0);
}

#[tokio::test]
async fn invalid_targets_never_reach_the_bridge() {
    for spec in ["10.0.0.0/33", "10.0.0.0/abc", "", "bad host", "300.1.1.1"] {
        let parsed = spec.parse::<TargetSpec>();
        assert!(
            matches!(parsed, Err(DispatchError::InvalidSpecification { .. })),
            "{spec:?} should be rejected"
        );
    }
}
