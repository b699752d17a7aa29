//! HTTP client for the external query service.

use crate::config::QueryServiceConfig;
use crate::error::QueryError;
use crate::row::Row;
use crate::statement::Statement;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;
use serde::Deserialize;

/// Body returned by the query service.
#[derive(Deserialize, Debug)]
struct QueryResponse {
    results: Option<Vec<Row>>,
    #[serde(default)]
    errors: Vec<ServiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ServiceMessage {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    msg: String,
}

/// Issues statements against the query service with basic auth.
#[derive(Clone, Debug)]
pub struct QueryClient {
    config: QueryServiceConfig,
    client: reqwest::Client,
}

impl QueryClient {
    pub fn new(config: QueryServiceConfig) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QueryError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Runs `statement` and returns its result rows.
    ///
    /// Retryable failures are attempted again up to `config.retries` times.
    pub async fn rows(&self, statement: &Statement) -> Result<Vec<Row>, QueryError> {
        let mut attempt = 0;
        loop {
            match self.execute(statement).await {
                Ok(rows) => return Ok(rows),
                Err(e) if e.is_retryable() && attempt < self.config.retries => {
                    attempt += 1;
                    warn!(
                        "query failed, retrying ({attempt}/{}): {e}",
                        self.config.retries
                    );
                }
                Err(e) => {
                    warn!("query failed: {e} [{}]", statement.text());
                    return Err(e);
                }
            }
        }
    }

    /// Runs a `count(*) AS response` statement.
    pub async fn count(&self, statement: &Statement) -> Result<u64, QueryError> {
        let rows = self.rows(statement).await?;
        rows.first()
            .and_then(|row| row.get("response"))
            .and_then(|v| v.as_u64())
            .ok_or_else(|| {
                QueryError::MalformedResponse("count result has no `response` field".to_string())
            })
    }

    /// Runs `statement` and returns the first row, if any.
    pub async fn first(&self, statement: &Statement) -> Result<Option<Row>, QueryError> {
        Ok(self.rows(statement).await?.into_iter().next())
    }

    async fn execute(&self, statement: &Statement) -> Result<Vec<Row>, QueryError> {
        debug!("query: {} args={:?}", statement.text(), statement.args());

        let response = self
            .client
            .post(&self.config.endpoint)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(statement)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;

        match body.results {
            Some(rows) => Ok(rows),
            None => {
                let reason = body
                    .errors
                    .first()
                    .map(|m| match m.code {
                        Some(code) => format!("{code}: {}", m.msg),
                        None => m.msg.clone(),
                    })
                    .unwrap_or_else(|| "response has no `results`".to_string());
                Err(QueryError::MalformedResponse(reason))
            }
        }
    }
}
