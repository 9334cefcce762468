//! Liquidation planning for a single underwater account.

use liquidator_api::{Account, TokenPosition};
use tracing::{info, instrument, warn};

use crate::selection::{select_borrow_to_repay, select_collateral_covering, Selected, SEIZE_RATIO};
use crate::value::ValueError;

/// A position chosen for repay or seize.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPosition {
    /// Index in the account's token list
    pub index: usize,
    pub position: TokenPosition,
    pub value_usd: f64,
}

impl From<Selected<'_>> for PlannedPosition {
    fn from(selected: Selected<'_>) -> Self {
        Self {
            index: selected.index,
            position: selected.position.clone(),
            value_usd: selected.value_usd,
        }
    }
}

/// Repay and seize choice for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidationPlan {
    pub account_id: String,
    pub health: Option<String>,
    pub total_borrow_value_in_usd: String,
    pub total_collateral_value_in_usd: String,
    pub tokens: Vec<TokenPosition>,
    /// Borrow position to repay
    pub repay: Option<PlannedPosition>,
    /// Collateral position to seize
    pub seize: Option<PlannedPosition>,
    /// Minimum supply value a seized position had to cover
    pub required_seize_value_usd: f64,
}

impl LiquidationPlan {
    /// Both a repay and a seize position were found.
    pub fn is_actionable(&self) -> bool {
        self.repay.is_some() && self.seize.is_some()
    }
}

/// Choose the borrow to repay and the collateral to seize.
///
/// When the account has no positive borrow the collateral scan still runs
/// with a zero requirement, so the first entered position is reported.
#[instrument(skip(account), fields(account = %account.id))]
pub fn plan_liquidation(account: &Account) -> Result<LiquidationPlan, ValueError> {
    let repay = select_borrow_to_repay(&account.tokens)?;

    let required_seize_value_usd = match &repay {
        Some(borrow) => borrow.value_usd * SEIZE_RATIO,
        None => {
            warn!(account = %account.id, "No borrow position to repay");
            0.0
        }
    };

    let seize = select_collateral_covering(&account.tokens, required_seize_value_usd)?;

    let plan = LiquidationPlan {
        account_id: account.id.clone(),
        health: account.health.clone(),
        total_borrow_value_in_usd: account.total_borrow_value_in_usd.clone(),
        total_collateral_value_in_usd: account.total_collateral_value_in_usd.clone(),
        tokens: account.tokens.clone(),
        repay: repay.map(PlannedPosition::from),
        seize: seize.map(PlannedPosition::from),
        required_seize_value_usd,
    };

    info!(
        account = %plan.account_id,
        repay = plan.repay.as_ref().map(|p| p.position.symbol.as_str()).unwrap_or("none"),
        seize = plan.seize.as_ref().map(|p| p.position.symbol.as_str()).unwrap_or("none"),
        required_seize_usd = format!("${:.2}", required_seize_value_usd),
        "Liquidation plan ready"
    );

    Ok(plan)
}
