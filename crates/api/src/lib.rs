//! Lending subgraph API client.
//!
//! This crate provides:
//! - Entity shapes for accounts, token positions and market snapshots
//! - The underwater-accounts GraphQL query and its filter
//! - An HTTP client for the hosted lending subgraph

mod query;
mod subgraph;
mod types;

pub use query::{AccountFilter, UNDERWATER_ACCOUNTS_QUERY};
pub use subgraph::{AccountSource, SubgraphClient, SubgraphError, TRADER_JOE_LENDING_GRAPH_URL};
pub use types::{Account, Market, TokenPosition};
