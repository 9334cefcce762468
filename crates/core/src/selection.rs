//! Repay and seize selection over an account's token positions.
//!
//! Both selectors take the first qualifying position in the order the
//! positions were supplied. Neither looks for the largest borrow or the
//! largest collateral.

use liquidator_api::TokenPosition;
use tracing::debug;

use crate::value::{borrow_value_usd, supply_value_usd, ValueError};

/// Fraction of the repaid borrow value that a seized position must cover.
pub const SEIZE_RATIO: f64 = 0.5;

/// A selected position with its index in the account's token list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<'a> {
    pub index: usize,
    pub position: &'a TokenPosition,
    /// Borrow value for a repay selection, supply value for a seize selection
    pub value_usd: f64,
}

/// First position with a strictly positive borrow value.
pub fn select_borrow_to_repay(
    positions: &[TokenPosition],
) -> Result<Option<Selected<'_>>, ValueError> {
    for (index, position) in positions.iter().enumerate() {
        let value_usd = borrow_value_usd(position)?;
        if value_usd > 0.0 {
            debug!(
                position = %position.id,
                symbol = %position.symbol,
                value_usd,
                "Selected borrow to repay"
            );
            return Ok(Some(Selected { index, position, value_usd }));
        }
    }
    Ok(None)
}

/// First entered-market position whose supply value is at least `required_value_usd`.
///
/// Positions not posted as collateral are skipped without being valued.
pub fn select_collateral_covering(
    positions: &[TokenPosition],
    required_value_usd: f64,
) -> Result<Option<Selected<'_>>, ValueError> {
    for (index, position) in positions.iter().enumerate() {
        if !position.is_collateral() {
            continue;
        }

        let value_usd = supply_value_usd(position)?;
        if value_usd >= required_value_usd {
            debug!(
                position = %position.id,
                symbol = %position.symbol,
                value_usd,
                required_value_usd,
                "Selected collateral to seize"
            );
            return Ok(Some(Selected { index, position, value_usd }));
        }
    }
    Ok(None)
}

/// First entered-market position covering [`SEIZE_RATIO`] of the borrow's value.
pub fn select_collateral_to_seize<'a>(
    positions: &'a [TokenPosition],
    borrow_position: &TokenPosition,
) -> Result<Option<Selected<'a>>, ValueError> {
    let required = borrow_value_usd(borrow_position)? * SEIZE_RATIO;
    select_collateral_covering(positions, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::tests::position;

    /// Three positions, price 1: supply 100, borrow 50, supply 40.
    fn scenario(first_entered: bool) -> Vec<TokenPosition> {
        vec![
            position("a", "0", "100", "1", first_entered),
            position("b", "50", "0", "1", true),
            position("c", "0", "40", "1", true),
        ]
    }

    #[test]
    fn test_borrow_picks_first_positive() {
        let positions = scenario(true);
        let selected = select_borrow_to_repay(&positions).unwrap().unwrap();
        assert_eq!(selected.index, 1);
        assert_eq!(selected.position.id, "b");
        assert_eq!(selected.value_usd, 50.0);
    }

    #[test]
    fn test_borrow_first_not_largest() {
        let positions = vec![
            position("a", "1", "0", "1", true),
            position("b", "500", "0", "1", true),
        ];
        let selected = select_borrow_to_repay(&positions).unwrap().unwrap();
        assert_eq!(selected.position.id, "a");
    }

    #[test]
    fn test_borrow_none_when_all_zero() {
        let positions = vec![
            position("a", "0", "10", "1", true),
            position("b", "0.0", "0", "3", true),
            position("c", "5", "0", "0", true),
        ];
        assert!(select_borrow_to_repay(&positions).unwrap().is_none());
    }

    #[test]
    fn test_borrow_skips_nan() {
        let positions = vec![
            position("a", "1", "0", "NaN", true),
            position("b", "2", "0", "1", true),
        ];
        let selected = select_borrow_to_repay(&positions).unwrap().unwrap();
        assert_eq!(selected.position.id, "b");
    }

    #[test]
    fn test_borrow_parse_failure_propagates() {
        let positions = vec![position("a", "oops", "0", "1", true)];
        assert!(select_borrow_to_repay(&positions).is_err());
    }

    #[test]
    fn test_seize_scans_from_start() {
        let positions = scenario(true);
        let borrow = &positions[1];
        let selected = select_collateral_to_seize(&positions, borrow).unwrap().unwrap();
        assert_eq!(selected.index, 0);
        assert_eq!(selected.value_usd, 100.0);
    }

    #[test]
    fn test_seize_skips_not_entered() {
        let positions = scenario(false);
        let borrow = &positions[1];
        let selected = select_collateral_to_seize(&positions, borrow).unwrap().unwrap();
        assert_eq!(selected.index, 2);
        assert_eq!(selected.position.id, "c");
        assert!(selected.position.entered_market);
    }

    #[test]
    fn test_seize_none_when_nothing_entered() {
        let positions = vec![
            position("a", "0", "1000", "1", false),
            position("b", "50", "0", "1", false),
        ];
        let borrow = &positions[1];
        assert!(select_collateral_to_seize(&positions, borrow).unwrap().is_none());
    }

    #[test]
    fn test_seize_requires_half_of_borrow() {
        let positions = vec![
            position("a", "0", "24.99", "1", true),
            position("b", "50", "0", "1", true),
            position("c", "0", "25", "1", true),
        ];
        let borrow = &positions[1];
        let selected = select_collateral_to_seize(&positions, borrow).unwrap().unwrap();
        assert_eq!(selected.position.id, "c");
        assert!(selected.value_usd >= SEIZE_RATIO * 50.0);
    }

    #[test]
    fn test_seize_none_when_insufficient() {
        let positions = vec![
            position("a", "0", "10", "1", true),
            position("b", "50", "0", "1", true),
        ];
        let borrow = &positions[1];
        assert!(select_collateral_to_seize(&positions, borrow).unwrap().is_none());
    }

    #[test]
    fn test_seize_ignores_malformed_not_entered() {
        let positions = vec![
            position("a", "0", "garbage", "1", false),
            position("b", "50", "30", "1", true),
        ];
        let borrow = &positions[1];
        let selected = select_collateral_to_seize(&positions, borrow).unwrap().unwrap();
        assert_eq!(selected.position.id, "b");
    }

    #[test]
    fn test_zero_requirement_takes_first_entered() {
        let positions = vec![
            position("a", "0", "0", "1", false),
            position("b", "0", "0", "1", true),
        ];
        let selected = select_collateral_covering(&positions, 0.0).unwrap().unwrap();
        assert_eq!(selected.position.id, "b");
    }

    #[test]
    fn test_nan_requirement_selects_nothing() {
        let positions = vec![position("a", "0", "100", "1", true)];
        assert!(select_collateral_covering(&positions, f64::NAN).unwrap().is_none());
    }

    #[test]
    fn test_empty_positions() {
        let positions: Vec<TokenPosition> = Vec::new();
        let borrow = position("x", "50", "0", "1", true);
        assert!(select_borrow_to_repay(&positions).unwrap().is_none());
        assert!(select_collateral_to_seize(&positions, &borrow).unwrap().is_none());
    }

    #[test]
    fn test_seize_never_returns_not_entered() {
        let positions = vec![
            position("a", "0", "1000", "1", false),
            position("b", "0", "1000", "1", false),
            position("c", "10", "1", "1", true),
        ];
        for required in [0.0, 0.5, 1.0, 2.0, 500.0] {
            if let Some(selected) = select_collateral_covering(&positions, required).unwrap() {
                assert!(selected.position.entered_market);
                assert!(selected.value_usd >= required);
            }
        }
    }
}
