//! Configuration for the liquidation planner.
//!
//! This module provides:
//! - Subgraph endpoint settings
//! - Underwater-account filter thresholds
//! - Run limits and named profiles

mod bot;

pub use bot::{
    BotConfig, QueryConfig, RunConfig, SubgraphConfig, CONFIG_PATH_ENV, PROFILE_ENV,
    SUBGRAPH_URL_ENV,
};
