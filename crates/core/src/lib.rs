//! Liquidator core logic.
//!
//! This crate provides:
//! - USD valuation of token positions from subgraph decimal strings
//! - Repay and seize selection (first qualifying position)
//! - Per-account liquidation plans and their text report
//! - Configuration profiles
//! - The single-pass scan over an account source

pub mod config;
mod liquidator;
mod report;
mod scanner;
mod selection;
mod value;

pub use config::{BotConfig, QueryConfig, RunConfig, SubgraphConfig};
pub use liquidator::{plan_liquidation, LiquidationPlan, PlannedPosition};
pub use report::TokenRow;
pub use scanner::{run, ScanOutcome};
pub use selection::{
    select_borrow_to_repay, select_collateral_covering, select_collateral_to_seize, Selected,
    SEIZE_RATIO,
};
pub use value::{borrow_value_usd, supply_value_usd, ValueError};
