//! Plain-text rendering of liquidation plans.

use std::fmt;

use liquidator_api::TokenPosition;

use crate::liquidator::{LiquidationPlan, PlannedPosition};

/// One line per token position.
pub struct TokenRow<'a>(pub usize, pub &'a TokenPosition);

impl fmt::Display for TokenRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TokenRow(index, token) = self;
        write!(
            f,
            "[{}] {} ({}) borrow={} supply={} price=${} collateralFactor={} entered={}",
            index,
            token.symbol,
            token.id,
            token.borrow_balance_underlying,
            token.supply_balance_underlying,
            token.market.underlying_price_usd,
            token.market.collateral_factor,
            token.entered_market,
        )
    }
}

fn write_selection(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    selection: Option<&PlannedPosition>,
) -> fmt::Result {
    match selection {
        Some(planned) => writeln!(
            f,
            "{}: {} value=${:.2}",
            label,
            TokenRow(planned.index, &planned.position),
            planned.value_usd
        ),
        None => writeln!(f, "{}: none", label),
    }
}

impl fmt::Display for LiquidationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "account: {}", self.account_id)?;
        writeln!(f, "health: {}", self.health.as_deref().unwrap_or("n/a"))?;
        writeln!(f, "totalBorrowValueInUSD: {}", self.total_borrow_value_in_usd)?;
        writeln!(f, "totalCollateralValueInUSD: {}", self.total_collateral_value_in_usd)?;

        writeln!(f, "TOKENS ({}):", self.tokens.len())?;
        for (index, token) in self.tokens.iter().enumerate() {
            writeln!(f, "  {}", TokenRow(index, token))?;
        }

        write_selection(f, "BORROW POSITION TO REPAY", self.repay.as_ref())?;
        write_selection(f, "SUPPLY POSITION TO SEIZE", self.seize.as_ref())?;
        write!(f, "required seize value: ${:.2}", self.required_seize_value_usd)
    }
}
