//! # Barkis Ledger Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (`<home>/config/app.toml`, then `BK_*` env)
//! 2. Initialize telemetry
//! 3. Wire the application; a bad upgrade height stops here
//! 4. Read and validate the genesis document
//! 5. InitChain and report the genesis app hash

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bk_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{App, AppGenesis, NodeConfig};
use tracing::{error, info};

/// Home directory: first CLI argument, else `BK_HOME`, else the default.
fn home_dir() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BK_HOME").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(node_runtime::container::config::DEFAULT_HOME))
}

fn run() -> Result<()> {
    let mut config = NodeConfig::load(home_dir()).context("loading node config")?;
    config
        .apply_env_overrides()
        .context("applying environment overrides")?;

    let _telemetry = init_telemetry(TelemetryConfig::from_env()).context("initializing telemetry")?;
    info!(
        chain_id = %config.chain_id,
        home = %config.home.display(),
        token_issue = config.upgrade.token_issue,
        update_token_symbol_rules = config.upgrade.update_token_symbol_rules,
        token_des_len_limit = config.upgrade.token_des_len_limit,
        "Starting Barkis ledger node"
    );

    let mut app = App::new(&config)?;
    let genesis = AppGenesis::load(&config.genesis_file)
        .with_context(|| format!("reading genesis {}", config.genesis_file.display()))?;
    let result = app.init_chain(&genesis)?;

    info!(height = result.height, app_hash = %result.app_hash, "Genesis state loaded");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "Node startup failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
