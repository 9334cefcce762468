//! Top-level scan: fetch underwater accounts once and plan their liquidation.

use std::io::Write;

use anyhow::{Context, Result};
use liquidator_api::{AccountSource, SubgraphError};
use tracing::{error, info, warn};

use crate::config::BotConfig;
use crate::liquidator::{plan_liquidation, LiquidationPlan};

/// How a scan ended.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Plans for the first `account_limit` accounts, in response order
    Planned(Vec<LiquidationPlan>),
    /// The query succeeded but matched no accounts
    NoUnderwaterAccounts,
    /// The query failed; the error was reported to `out`
    QueryFailed(SubgraphError),
}

/// Run one scan and write the report to `out`.
///
/// Query failures are reported and returned as [`ScanOutcome::QueryFailed`].
/// Malformed decimals in the returned data are errors.
pub async fn run<W: Write>(
    source: &dyn AccountSource,
    config: &BotConfig,
    out: &mut W,
) -> Result<ScanOutcome> {
    let filter = config.query.filter();

    let accounts = match source.fetch_underwater_accounts(&filter).await {
        Ok(accounts) => accounts,
        Err(e) => {
            error!(error = %e, "Subgraph query failed");
            writeln!(out, "Error fetching subgraph data: {}", e)?;
            return Ok(ScanOutcome::QueryFailed(e));
        }
    };

    if accounts.is_empty() {
        info!("No underwater accounts");
        writeln!(out, "No underwater accounts found")?;
        return Ok(ScanOutcome::NoUnderwaterAccounts);
    }

    if accounts.len() > config.run.account_limit {
        warn!(
            returned = accounts.len(),
            account_limit = config.run.account_limit,
            "Planning only the first accounts returned"
        );
    }

    let mut plans = Vec::with_capacity(accounts.len().min(config.run.account_limit));
    for account in accounts.iter().take(config.run.account_limit) {
        let plan = plan_liquidation(account)
            .with_context(|| format!("Failed to value positions of account {}", account.id))?;

        if !plans.is_empty() {
            writeln!(out)?;
        }
        writeln!(out, "{}", plan)?;
        plans.push(plan);
    }

    Ok(ScanOutcome::Planned(plans))
}
