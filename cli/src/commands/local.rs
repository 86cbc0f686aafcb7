use rdpctl_common::capability::ManagedEndpoint;
use rdpctl_common::command::Command;
use rdpctl_common::config::Config;
use rdpctl_core::dispatcher::{Dispatcher, Outcome};
use rdpctl_core::session::OperatorSession;
use tokio_util::sync::CancellationToken;

use crate::commands::LocalArgs;
use crate::rprint;
use crate::terminal::{format, print};

pub async fn local(
    args: LocalArgs,
    dispatcher: &Dispatcher,
    session: &OperatorSession,
    endpoint: &ManagedEndpoint,
    cancel: &CancellationToken,
    cfg: &Config,
) {
    let command = Command::LocalToggle {
        enable: args.enable,
        disable: args.disable,
    };

    let result = match dispatcher.run(session, endpoint, command, cancel).await {
        Ok(Outcome::Toggled(action)) => Ok(action),
        Ok(Outcome::Swept(_)) => return,
        Err(e) => Err(e),
    };

    if cfg.quiet > 0 {
        return;
    }

    rprint!();
    print::header("local endpoint", cfg.quiet);
    let mut details = format::endpoint_to_details(endpoint);
    details.push(format::toggle_to_detail(&result));
    print::tree(0, &endpoint.id, &details);
    print::fat_separator();
}
