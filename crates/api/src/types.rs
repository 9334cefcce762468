//! Account, token position and market entities as served by the lending subgraph.
//!
//! Numeric fields are kept as the decimal strings the subgraph returns.
//! Callers parse them at the point of arithmetic.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// A borrower's aggregate lending position.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account id (the borrower address on the lending subgraph)
    pub id: String,

    /// Health factor, `null` for accounts that never borrowed
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub health: Option<String>,

    /// Total borrow value in USD
    #[serde(
        rename = "totalBorrowValueInUSD",
        deserialize_with = "deserialize_decimal"
    )]
    pub total_borrow_value_in_usd: String,

    /// Total collateral value in USD (weighted by collateral factor)
    #[serde(
        rename = "totalCollateralValueInUSD",
        deserialize_with = "deserialize_decimal"
    )]
    pub total_collateral_value_in_usd: String,

    /// Token positions in the order the subgraph returned them
    #[serde(default)]
    pub tokens: Vec<TokenPosition>,
}

impl Account {
    /// Parse the account id as an EVM address.
    pub fn address(&self) -> Option<Address> {
        self.id.parse().ok()
    }

    /// Parse the health factor. `None` when absent or not a number.
    pub fn health_factor(&self) -> Option<f64> {
        self.health.as_deref().and_then(|h| h.trim().parse().ok())
    }

    /// Liquidatable when `0 < health < 1`.
    pub fn is_liquidatable(&self) -> bool {
        self.health_factor()
            .map(|hf| hf > 0.0 && hf < 1.0)
            .unwrap_or(false)
    }
}

/// One asset-market exposure within an account.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPosition {
    /// Position id (`<market>-<account>` on the lending subgraph)
    pub id: String,

    /// Token symbol (e.g. `jAVAX`)
    pub symbol: String,

    /// Market snapshot at query time
    pub market: Market,

    /// Outstanding borrow, underlying units
    #[serde(deserialize_with = "deserialize_decimal")]
    pub borrow_balance_underlying: String,

    /// Supplied balance, underlying units
    #[serde(deserialize_with = "deserialize_decimal")]
    pub supply_balance_underlying: String,

    /// Whether the supply is posted as usable collateral
    #[serde(default)]
    pub entered_market: bool,
}

impl TokenPosition {
    /// Whether this position can be seized as collateral.
    pub fn is_collateral(&self) -> bool {
        self.entered_market
    }
}

/// Point-in-time market parameters for one asset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub name: String,
    pub symbol: String,

    /// Fraction of supplied value usable as collateral
    #[serde(deserialize_with = "deserialize_decimal")]
    pub collateral_factor: String,

    /// Underlying asset price in USD
    #[serde(
        rename = "underlyingPriceUSD",
        deserialize_with = "deserialize_decimal"
    )]
    pub underlying_price_usd: String,

    #[serde(deserialize_with = "deserialize_decimal")]
    pub exchange_rate: String,

    #[serde(deserialize_with = "deserialize_decimal")]
    pub reserve_factor: String,

    /// Decimals of the underlying token (number or string in responses)
    #[serde(deserialize_with = "deserialize_u8_from_any")]
    pub underlying_decimals: u8,
}

// Custom deserializers

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

fn deserialize_u8_from_any<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = StringOrNumber::deserialize(deserializer)?.into_string();
    raw.trim().parse().map_err(serde::de::Error::custom)
}
