//! Underwater-accounts query document.

use serde::{Deserialize, Serialize};

/// Fields requested for each account.
const ACCOUNT_SELECTION: &str = r#"
      id
      health
      totalBorrowValueInUSD
      totalCollateralValueInUSD
      tokens {
        id
        symbol
        market {
          name
          symbol
          collateralFactor
          underlyingPriceUSD
          exchangeRate
          reserveFactor
          underlyingDecimals
        }
        borrowBalanceUnderlying
        supplyBalanceUnderlying
        enteredMarket
      }"#;

/// The fixed query for accounts with `0 < health < 1` and outstanding borrows.
pub const UNDERWATER_ACCOUNTS_QUERY: &str = r#"
  query {
    accounts(where: {health_gt: 0, health_lt: 1, totalBorrowValueInUSD_gt: 0}) {
      id
      health
      totalBorrowValueInUSD
      totalCollateralValueInUSD
      tokens {
        id
        symbol
        market {
          name
          symbol
          collateralFactor
          underlyingPriceUSD
          exchangeRate
          reserveFactor
          underlyingDecimals
        }
        borrowBalanceUnderlying
        supplyBalanceUnderlying
        enteredMarket
      }
    }
  }
"#;

/// Account filter rendered into the `where:` argument of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Exclusive lower bound on health
    pub health_gt: f64,
    /// Exclusive upper bound on health
    pub health_lt: f64,
    /// Exclusive lower bound on total borrow value (USD)
    pub total_borrow_value_in_usd_gt: f64,
    /// Maximum number of accounts to return (subgraph default when unset)
    pub first: Option<u32>,
}

impl Default for AccountFilter {
    fn default() -> Self {
        Self {
            health_gt: 0.0,
            health_lt: 1.0,
            total_borrow_value_in_usd_gt: 0.0,
            first: None,
        }
    }
}

impl AccountFilter {
    /// Render the `where:` object.
    pub fn where_clause(&self) -> String {
        format!(
            "{{health_gt: {}, health_lt: {}, totalBorrowValueInUSD_gt: {}}}",
            self.health_gt, self.health_lt, self.total_borrow_value_in_usd_gt
        )
    }

    /// Build the full query document for this filter.
    ///
    /// The default filter produces a document equivalent to
    /// [`UNDERWATER_ACCOUNTS_QUERY`].
    pub fn to_query(&self) -> String {
        let arguments = match self.first {
            Some(first) => format!("first: {}, where: {}", first, self.where_clause()),
            None => format!("where: {}", self.where_clause()),
        };

        format!(
            "\n  query {{\n    accounts({}) {{{}\n    }}\n  }}\n",
            arguments, ACCOUNT_SELECTION
        )
    }
}
