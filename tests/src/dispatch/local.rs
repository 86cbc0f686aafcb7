use rdpctl_common::capability::Platform;
use rdpctl_common::command::{Command, ToggleAction};
use rdpctl_common::config::DispatchConfig;
use rdpctl_common::error::DispatchError;
use rdpctl_common::session::{Report, Stream};
use rdpctl_core::dispatcher::Outcome;

use crate::support::{self, Bridge, Call};

fn enable() -> Command {
    Command::LocalToggle {
        enable: true,
        disable: false,
    }
}

#[tokio::test]
async fn local_enable_on_linux_is_refused_without_mutation() {
    let run = support::run(Bridge::admin(), Platform::Linux, enable(), DispatchConfig::default()).await;

    assert_eq!(run.outcome, Err(DispatchError::UnsupportedPlatform(Platform::Linux)));
    assert!(run.bridge.calls().iter().all(|c| !c.is_mutating()));
    assert_eq!(run.console.reports(Report::Error).len(), 1);
    assert!(run.console.reports(Report::Error)[0].contains("only on windows"));
}

#[tokio::test]
async fn local_enable_without_admin_is_refused_without_mutation() {
    let bridge = Bridge {
        admin: false,
        ..Bridge::admin()
    };
    let run = support::run(bridge, Platform::Windows, enable(), DispatchConfig::default()).await;

    assert_eq!(run.outcome, Err(DispatchError::InsufficientPrivilege));
    assert_eq!(run.bridge.calls(), vec![Call::Privilege]);
}

#[tokio::test]
async fn local_enable_relays_provider_output_and_restores_capture() {
    let run = support::run(Bridge::admin(), Platform::Windows, enable(), DispatchConfig::default()).await;

    assert_eq!(run.outcome, Ok(Outcome::Toggled(ToggleAction::Enable)));
    assert_eq!(run.bridge.calls(), vec![Call::Privilege, Call::Enable]);

    let lines = run.console.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].1, Stream::Stdout);
    assert_eq!(lines[0].2, "fDenyTSConnections = 0");
    assert!(lines[0].0.contains("ws-042"));

    let stats = run.session.capture_stats();
    assert_eq!(stats.acquired, 2);
    assert_eq!(stats.restored, 2);
    assert_eq!(run.session.owner(), None);
}

#[tokio::test]
async fn local_disable_performs_exactly_one_mutation() {
    let command = Command::LocalToggle {
        enable: false,
        disable: true,
    };
    let run = support::run(Bridge::admin(), Platform::Windows, command, DispatchConfig::default()).await;

    assert_eq!(run.outcome, Ok(Outcome::Toggled(ToggleAction::Disable)));
    let mutations: Vec<_> = run
        .bridge
        .calls()
        .into_iter()
        .filter(Call::is_mutating)
        .map(|c| support::capability_of(&c))
        .collect();
    assert_eq!(mutations.len(), 1);
}
