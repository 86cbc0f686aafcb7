pub mod local;
pub mod remote;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Args, Parser, Subcommand};
use rdpctl_common::command::DEFAULT_DOMAIN;
use rdpctl_common::config::{Config, DispatchConfig};
use rdpctl_common::network::target::TargetSpec;

#[derive(Parser)]
#[command(name = "rdpctl")]
#[command(about = "Toggle remote desktop locally or sweep credentials across hosts.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output; repeat for less (-qq prints only relayed lines and errors)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Maximum number of credential checks in flight
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..), global = true)]
    pub concurrency: u16,

    /// Deadline of every capability call, in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub timeout: u64,

    /// Pause before each host of a sweep, in milliseconds (plus random jitter)
    #[arg(long, default_value_t = 0, global = true)]
    pub delay_ms: u64,

    /// Program that executes the remote desktop and credential capabilities
    #[arg(long, env = "RDPCTL_PROVIDER", default_value = "rdpctl-provider", global = true)]
    pub provider: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enable or disable remote desktop on this machine
    #[command(alias = "l")]
    Local(LocalArgs),
    /// Check credentials against a host or a CIDR range
    #[command(alias = "r")]
    Remote(RemoteArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("toggle").required(true).args(["enable", "disable"])))]
pub struct LocalArgs {
    /// Enable remote desktop
    #[arg(short, long)]
    pub enable: bool,

    /// Disable remote desktop
    #[arg(short, long)]
    pub disable: bool,
}

#[derive(Args)]
pub struct RemoteArgs {
    /// Host name, IP address or CIDR range (e.g. 10.0.0.0/24)
    #[arg(short, long)]
    pub target: TargetSpec,

    #[arg(short)]
    pub username: String,

    #[arg(short, default_value = "")]
    pub password: String,

    #[arg(short, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// NTLM hashes, LM:NT
    #[arg(short = 'H')]
    pub hashes: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            dispatch: DispatchConfig {
                concurrency: usize::from(self.concurrency),
                call_timeout: Duration::from_secs(self.timeout),
                pacing: Duration::from_millis(self.delay_ms),
            },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
