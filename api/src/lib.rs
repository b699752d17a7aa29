//! This crate contains all shared fullstack server functions and the types
//! they exchange with the UI.

pub mod config;
pub mod encoding;
pub mod error;
pub mod identifier;
#[cfg(not(target_arch = "wasm32"))]
pub mod query_client;
pub mod row;
pub mod search;
pub mod statement;

use config::DashboardInfo;
use dioxus::prelude::*;
use identifier::Identifier;
use row::Row;
use search::SearchPlan;
use search::SearchResult;
#[cfg(not(target_arch = "wasm32"))]
use statement::Statement;
#[cfg(not(target_arch = "wasm32"))]
use statement::Table;

pub type ApiError = anyhow::Error;

/// Deployment labels for the header and hero section.
#[post("/api/dashboard_info")]
pub async fn dashboard_info() -> Result<DashboardInfo, ApiError> {
    Ok(DashboardInfo::default())
}

#[post("/api/transaction_count")]
pub async fn transaction_count() -> Result<u64, ApiError> {
    let client = query_service::client().await?;
    Ok(client.count(&Statement::count(Table::Transactions)).await?)
}

#[post("/api/block_count")]
pub async fn block_count() -> Result<u64, ApiError> {
    let client = query_service::client().await?;
    Ok(client.count(&Statement::count(Table::Blocks)).await?)
}

#[post("/api/recent_blocks")]
pub async fn recent_blocks() -> Result<Vec<Row>, ApiError> {
    let client = query_service::client().await?;
    Ok(client.rows(&Statement::recent_blocks()).await?)
}

#[post("/api/recent_transactions")]
pub async fn recent_transactions() -> Result<Vec<Row>, ApiError> {
    let client = query_service::client().await?;
    Ok(client.rows(&Statement::recent_transactions()).await?)
}

/// Resolves `input` and runs the matching lookup.
///
/// The UI resolves the input itself before calling this, so an invalid input
/// only reaches the server if a caller skips that step.
#[post("/api/search")]
pub async fn search(input: String) -> Result<SearchResult, ApiError> {
    let (category, statement) = match search::resolve(&input) {
        SearchPlan::Lookup {
            category,
            statement,
        } => (category, statement),
        SearchPlan::Invalid(e) => {
            dioxus_logger::tracing::warn!("rejected search input {input:?}: {e}");
            return Err(e.into());
        }
    };

    let client = query_service::client().await?;
    let rows = client.rows(&statement).await?;
    dioxus_logger::tracing::info!("search [{category}] {input:?}: {} rows", rows.len());

    SearchResult::new(category, rows)
        .ok_or_else(|| anyhow::anyhow!("search resolved to an invalid category"))
}

/// Fetches the raw document for one block or transaction.
#[post("/api/record_detail")]
pub async fn record_detail(id: Identifier) -> Result<Option<Row>, ApiError> {
    let client = query_service::client().await?;
    Ok(client.first(&Statement::detail(&id)).await?)
}

#[cfg(not(target_arch = "wasm32"))]
mod query_service {
    use super::ApiError;
    use crate::config::QueryServiceConfig;
    use crate::query_client::QueryClient;
    use tokio::sync::OnceCell;

    /// The shared client. Built on first use from the environment; the
    /// underlying connection pool is reused by every server function.
    pub async fn client() -> Result<&'static QueryClient, ApiError> {
        static CLIENT: OnceCell<QueryClient> = OnceCell::const_new();

        let client = CLIENT
            .get_or_try_init(|| async {
                let config = QueryServiceConfig::from_env();
                dioxus_logger::tracing::info!("query service config: {config:?}");
                QueryClient::new(config)
            })
            .await?;
        Ok(client)
    }
}
