//! USD valuation of token positions.

use liquidator_api::TokenPosition;
use thiserror::Error;

/// A decimal field that could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid decimal in {field} of {position}: {value:?}")]
    InvalidDecimal {
        position: String,
        field: &'static str,
        value: String,
    },
}

/// Parse a decimal string field of a position.
fn parse_field(token: &TokenPosition, field: &'static str, raw: &str) -> Result<f64, ValueError> {
    raw.trim().parse::<f64>().map_err(|_| ValueError::InvalidDecimal {
        position: token.id.clone(),
        field,
        value: raw.to_string(),
    })
}

fn underlying_price(token: &TokenPosition) -> Result<f64, ValueError> {
    parse_field(token, "underlyingPriceUSD", &token.market.underlying_price_usd)
}

/// Borrow value in USD: `borrowBalanceUnderlying × underlyingPriceUSD`.
pub fn borrow_value_usd(token: &TokenPosition) -> Result<f64, ValueError> {
    let balance = parse_field(token, "borrowBalanceUnderlying", &token.borrow_balance_underlying)?;
    Ok(balance * underlying_price(token)?)
}

/// Supply value in USD: `supplyBalanceUnderlying × underlyingPriceUSD`.
pub fn supply_value_usd(token: &TokenPosition) -> Result<f64, ValueError> {
    let balance = parse_field(token, "supplyBalanceUnderlying", &token.supply_balance_underlying)?;
    Ok(balance * underlying_price(token)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use liquidator_api::Market;

    /// Build a position with the given balances and price.
    pub(crate) fn position(id: &str, borrow: &str, supply: &str, price: &str, entered: bool) -> TokenPosition {
        TokenPosition {
            id: id.to_string(),
            symbol: format!("j{}", id.to_uppercase()),
            market: Market {
                name: format!("Banker Joe {}", id),
                symbol: format!("j{}", id.to_uppercase()),
                collateral_factor: "0.75".to_string(),
                underlying_price_usd: price.to_string(),
                exchange_rate: "0.02".to_string(),
                reserve_factor: "0.2".to_string(),
                underlying_decimals: 18,
            },
            borrow_balance_underlying: borrow.to_string(),
            supply_balance_underlying: supply.to_string(),
            entered_market: entered,
        }
    }

    #[test]
    fn test_zero_borrow_is_zero() {
        let token = position("avax", "0", "100", "17.5", true);
        assert_eq!(borrow_value_usd(&token).unwrap(), 0.0);
    }

    #[test]
    fn test_value_is_balance_times_price() {
        let token = position("avax", "2.5", "4", "17.5", true);
        assert!((borrow_value_usd(&token).unwrap() - 43.75).abs() < 1e-9);
        assert!((supply_value_usd(&token).unwrap() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_high_precision_strings() {
        let token = position("usdc", "1523.883412000000000001", "0", "1.000200000000000000", true);
        let value = borrow_value_usd(&token).unwrap();
        assert!((value - 1524.188).abs() < 0.001);
    }

    #[test]
    fn test_malformed_balance() {
        let token = position("avax", "12abc", "0", "1", true);
        let err = borrow_value_usd(&token).unwrap_err();
        assert_eq!(
            err,
            ValueError::InvalidDecimal {
                position: "avax".to_string(),
                field: "borrowBalanceUnderlying",
                value: "12abc".to_string(),
            }
        );
        // supply is still well-formed
        assert_eq!(supply_value_usd(&token).unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_price() {
        let token = position("avax", "1", "1", "", true);
        assert!(borrow_value_usd(&token).is_err());
        assert!(supply_value_usd(&token).is_err());
    }

    #[test]
    fn test_nan_price_is_not_an_error() {
        let token = position("avax", "1", "1", "NaN", true);
        assert!(borrow_value_usd(&token).unwrap().is_nan());
    }
}
