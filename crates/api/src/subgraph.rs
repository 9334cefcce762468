//! Lending subgraph client for underwater-account discovery.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::query::AccountFilter;
use crate::types::Account;

/// Hosted Trader Joe lending subgraph.
pub const TRADER_JOE_LENDING_GRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/traderjoe-xyz/lending";

/// Longest response body excerpt kept in a status error.
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Errors from querying the subgraph.
#[derive(Debug, Error)]
pub enum SubgraphError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("response contained no data")]
    MissingData,

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of underwater lending accounts.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Fetch accounts matching the filter, in the order the source returns them.
    async fn fetch_underwater_accounts(
        &self,
        filter: &AccountFilter,
    ) -> Result<Vec<Account>, SubgraphError>;
}

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

/// Unwrap a GraphQL envelope. Any error entry fails the whole response.
fn into_data<T>(response: GraphQlResponse<T>) -> Result<T, SubgraphError> {
    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(SubgraphError::GraphQl(messages.join("; ")));
    }
    response.data.ok_or(SubgraphError::MissingData)
}

/// HTTP client for a lending subgraph endpoint.
#[derive(Debug, Clone)]
pub struct SubgraphClient {
    client: reqwest::Client,
    url: String,
}

impl SubgraphClient {
    /// Create a client for the given endpoint with no request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Create a client with an optional per-request timeout.
    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SubgraphError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST a query document and decode the `data` member.
    #[instrument(skip(self, document), fields(url = %self.url))]
    pub async fn query<T: DeserializeOwned>(&self, document: &str) -> Result<T, SubgraphError> {
        let response = self
            .client
            .post(&self.url)
            .json(&GraphQlRequest { query: document })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubgraphError::Status {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Subgraph response received");

        let envelope: GraphQlResponse<T> = serde_json::from_slice(&bytes)?;
        into_data(envelope)
    }
}

#[async_trait]
impl AccountSource for SubgraphClient {
    async fn fetch_underwater_accounts(
        &self,
        filter: &AccountFilter,
    ) -> Result<Vec<Account>, SubgraphError> {
        let data: AccountsData = self.query(&filter.to_query()).await?;

        info!(
            count = data.accounts.len(),
            health_lt = filter.health_lt,
            "Fetched underwater accounts"
        );

        Ok(data.accounts)
    }
}
