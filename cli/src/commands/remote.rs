use std::time::{Duration, Instant};

use colored::*;
use rdpctl_common::capability::ManagedEndpoint;
use rdpctl_common::command::{Command, RemoteProbe};
use rdpctl_common::config::Config;
use rdpctl_common::success;
use rdpctl_core::dispatcher::{Dispatcher, Outcome, SweepReport};
use rdpctl_core::session::OperatorSession;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::commands::RemoteArgs;
use crate::rprint;
use crate::terminal::sink::TerminalSink;
use crate::terminal::{format, print, progress};

pub async fn remote(
    args: RemoteArgs,
    dispatcher: &Dispatcher,
    session: &OperatorSession,
    sink: &TerminalSink,
    endpoint: &ManagedEndpoint,
    cancel: &CancellationToken,
    cfg: &Config,
) {
    let probe = RemoteProbe::new(args.target, args.username)
        .with_password(args.password)
        .with_domain(args.domain)
        .with_hashes(args.hashes);

    let span = progress::sweep_span(&probe.target.to_string(), probe.target.hosts().len());
    sink.track(span.clone());

    let start_time: Instant = Instant::now();
    let outcome = dispatcher
        .run(session, endpoint, Command::RemoteProbe(probe), cancel)
        .instrument(span.clone())
        .await;
    sink.untrack();
    drop(span);

    if let Ok(Outcome::Swept(report)) = outcome {
        sweep_ends(&report, start_time.elapsed(), cfg);
    }
}

fn sweep_ends(report: &SweepReport, total_time: Duration, cfg: &Config) {
    if cfg.quiet > 0 {
        rprint!();
    }

    if report.outcomes.is_empty() {
        print::header("no host checked", cfg.quiet);
    } else if cfg.quiet == 0 {
        print::header("credential sweep", cfg.quiet);
        print_outcomes(report);
    }
    print_summary(report, total_time, cfg);
}

fn print_outcomes(report: &SweepReport) {
    let rows: Vec<(&str, ColoredString)> = report
        .outcomes
        .iter()
        .map(|outcome| (outcome.host.as_str(), format::outcome_to_status(outcome)))
        .collect();
    print::aligned_lines(&rows);
}

fn print_summary(report: &SweepReport, total_time: Duration, cfg: &Config) {
    let output: ColoredString = format::sweep_summary(report, total_time);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        1 => {
            rprint!();
            success!("{}", output)
        }
        _ => {}
    }
}
