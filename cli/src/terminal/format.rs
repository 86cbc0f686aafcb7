use std::time::Duration;

use crate::terminal::colors;
use colored::*;
use rdpctl_common::capability::ManagedEndpoint;
use rdpctl_common::command::ToggleAction;
use rdpctl_common::error::DispatchError;
use rdpctl_core::dispatcher::{HostOutcome, SweepReport};

pub type Detail = (String, ColoredString);

pub fn endpoint_to_details(endpoint: &ManagedEndpoint) -> Vec<Detail> {
    vec![
        ("Host".to_string(), endpoint.id.color(colors::HOST)),
        ("OS".to_string(), endpoint.platform.to_string().normal()),
    ]
}

pub fn toggle_to_detail(result: &Result<ToggleAction, DispatchError>) -> Detail {
    let value = match result {
        Ok(action) => format!("{action}d").color(colors::PRIMARY).bold(),
        Err(e) if e.is_denial() => "denied".yellow().bold(),
        Err(_) => "failed".red().bold(),
    };
    ("RDP".to_string(), value)
}

pub fn outcome_to_status(outcome: &HostOutcome) -> ColoredString {
    match &outcome.result {
        Ok(()) => "checked".color(colors::PRIMARY),
        Err(DispatchError::Cancelled { .. }) => "abandoned".yellow(),
        Err(DispatchError::Timeout { after, .. }) => {
            format!("timed out ({}s)", after.as_secs()).red()
        }
        Err(DispatchError::ChannelError { message, .. }) => {
            format!("channel error: {message}").red()
        }
        Err(DispatchError::RemoteCapabilityError { message, .. }) => message.red(),
        Err(e) => e.to_string().red(),
    }
}

pub fn sweep_summary(report: &SweepReport, elapsed: Duration) -> ColoredString {
    let succeeded: ColoredString = format!("{} checked", report.succeeded()).bold().green();
    let failed: ColoredString = match report.failed() {
        0 => "0 failed".normal(),
        n => format!("{n} failed").bold().red(),
    };
    let elapsed: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();

    let mut line = format!("Sweep Complete: {succeeded}, {failed}");
    if report.skipped() > 0 {
        let skipped = format!("{} skipped", report.skipped()).bold().yellow();
        line.push_str(&format!(", {skipped}"));
    }
    line.push_str(&format!(" in {elapsed}"));
    line.color(colors::TEXT_DEFAULT)
}
