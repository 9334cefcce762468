//! Underwater account liquidation planner.
//!
//! Queries a lending subgraph for accounts with `0 < health < 1`, then picks
//! the borrow to repay and the collateral to seize for the first account.
//! The report goes to stdout, logs go to stderr.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use liquidator_api::SubgraphClient;
use liquidator_core::{run, BotConfig, ScanOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,liquidator_core=debug,liquidator_api=debug")),
        )
        .init();

    // LIQUIDATOR_CONFIG, BOT_PROFILE and SUBGRAPH_URL select the settings
    let config = BotConfig::from_env()?;
    config.log_config();

    let client = SubgraphClient::with_timeout(
        config.subgraph.url.clone(),
        config.subgraph.request_timeout(),
    )?;

    info!(url = %client.url(), "Querying underwater accounts");

    let mut stdout = std::io::stdout();
    match run(&client, &config, &mut stdout).await? {
        ScanOutcome::Planned(plans) => {
            let actionable = plans.iter().filter(|p| p.is_actionable()).count();
            info!(planned = plans.len(), actionable, "Scan complete");
        }
        ScanOutcome::NoUnderwaterAccounts => info!("Scan complete, nothing to liquidate"),
        // Already reported on stdout; the run still exits cleanly
        ScanOutcome::QueryFailed(_) => {}
    }

    Ok(())
}
