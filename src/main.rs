//! hook-relay: forwards agent hook events to a monitoring endpoint
//!
//! Reads the hook payload from stdin and POSTs it, wrapped with a timestamp,
//! to the URL named by the active profile's environment variables. stdout is
//! left untouched for the agent runtime; diagnostics go to stderr.

use clap::Parser;
use hook_relay::config::{self, Profile, RelayConfig};
use hook_relay::{Delivery, ExitPolicy, RelayError, read_input, report, run};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "hook-relay",
    version,
    about = "Relay agent hook events to a monitoring endpoint"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Environment variable family holding the endpoint URL and token
    #[arg(long, value_enum, default_value_t = Profile::Monitor)]
    profile: Profile,

    /// Settings file with fallback url/token/timeout_secs
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Exit with status 1 when the event could not be delivered
    #[arg(long)]
    strict: bool,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("HOOK_RELAY_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let policy = if cli.strict {
        ExitPolicy::Strict
    } else {
        ExitPolicy::Permissive
    };

    let hook_stdin = match read_input(std::io::stdin().lock()) {
        Ok(text) => text,
        Err(e) => {
            error!("failed to read stdin: {e}");
            return ExitCode::from(policy.status(false));
        }
    };
    debug!(bytes = hook_stdin.len(), "read hook input");

    let settings = config::load_settings(cli.config.as_deref());
    let result = match RelayConfig::from_env(cli.profile, &settings) {
        Ok(config) => {
            debug!(?config, "resolved relay config");
            block_on_send(config, hook_stdin)
        }
        Err(e) => Err(e.into()),
    };

    report(&result);
    ExitCode::from(policy.status(result.is_ok()))
}

/// Drive the single send on a current-thread runtime.
fn block_on_send(config: RelayConfig, hook_stdin: String) -> Result<Delivery, RelayError> {
    let url = config.url.to_string();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RelayError::Network {
            url,
            stage: "runtime",
            message: e.to_string(),
        })?;
    runtime.block_on(run(config, hook_stdin))
}
