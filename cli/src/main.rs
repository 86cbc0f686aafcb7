mod commands;
mod provider;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use commands::{CommandLine, Commands, local, remote};
use rdpctl_common::log::REPORT_TARGET;
use rdpctl_common::warn;
use rdpctl_core::dispatcher::Dispatcher;
use rdpctl_core::session::OperatorSession;
use terminal::{logging, print, sink::TerminalSink};
use tokio_util::sync::CancellationToken;

use crate::provider::ProcessProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging().context("failed to install the log subscriber")?;

    let cfg = commands.config();
    print::banner(cfg.no_banner, cfg.quiet);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!(target: REPORT_TARGET, "interrupted, finishing up");
            on_interrupt.cancel();
        }
    });

    let sink = Arc::new(TerminalSink::new(cfg.quiet));
    let session = OperatorSession::new(sink.clone());
    let bridge = Arc::new(ProcessProvider::new(commands.provider.clone()));
    let dispatcher = Dispatcher::new(bridge, cfg.dispatch.clone());
    let endpoint = provider::local_endpoint();

    // Failures are reported through the sink; the exit code stays 0.
    match commands.command {
        Commands::Local(args) => {
            print::header("toggling remote desktop", cfg.quiet);
            local::local(args, &dispatcher, &session, &endpoint, &cancel, &cfg).await;
        }
        Commands::Remote(args) => {
            print::header("starting credential sweep", cfg.quiet);
            remote::remote(args, &dispatcher, &session, &sink, &endpoint, &cancel, &cfg).await;
        }
    }

    Ok(())
}
