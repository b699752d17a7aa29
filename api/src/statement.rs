//! Query statements sent to the query service.
//!
//! User-supplied values are always passed as positional arguments (`$1`) and
//! never spliced into the statement text.

use crate::identifier::Identifier;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Number of rows shown in the "latest" lists.
pub const RECENT_LIMIT: usize = 10;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Table {
    Blocks,
    Transactions,
}

/// Request body for the query service: `{ "statement": ..., "args": [...] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "statement")]
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    args: Vec<Value>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            args: Vec::new(),
        }
    }

    /// Binds the next positional argument.
    pub fn bind(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// `SELECT count(*) AS response FROM <table>;`
    pub fn count(table: Table) -> Self {
        Self::new(format!("SELECT count(*) AS response FROM `{table}`;"))
    }

    /// The newest blocks, keyed by their zero-padded height.
    pub fn recent_blocks() -> Self {
        Self::new(format!(
            "SELECT META().id AS id, header.timestamp AS timestamp FROM `{}` \
             ORDER BY META().id DESC LIMIT {RECENT_LIMIT};",
            Table::Blocks
        ))
    }

    /// The newest transactions with their first output's address and payload.
    pub fn recent_transactions() -> Self {
        Self::new(format!(
            "SELECT META().id AS id, timestamp, outputs[0].address AS toAddress, \
             outputs[0].payload AS payload FROM `{}` \
             ORDER BY timestamp DESC LIMIT {RECENT_LIMIT};",
            Table::Transactions
        ))
    }

    /// Search lookup: the document id plus the whole document nested under
    /// the table name.
    pub fn lookup_by_id(id: &Identifier) -> Self {
        Self::new(format!(
            "SELECT META().id AS id, * FROM `{}` WHERE META().id = $1;",
            id.table()
        ))
        .bind(id.to_string())
    }

    /// Search lookup of transactions by their first output's payload.
    pub fn lookup_by_payload(payload: &str) -> Self {
        Self::new(format!(
            "SELECT META().id AS id, * FROM `{}` WHERE outputs[0].payload = $1;",
            Table::Transactions
        ))
        .bind(payload)
    }

    /// Detail lookup: the raw document only.
    pub fn detail(id: &Identifier) -> Self {
        Self::new(format!(
            "SELECT * FROM `{}` WHERE META().id = $1;",
            id.table()
        ))
        .bind(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn count_statement_targets_the_table() {
        assert_eq!(
            Statement::count(Table::Transactions).text(),
            "SELECT count(*) AS response FROM `transactions`;"
        );
    }

    #[test]
    fn recent_lists_are_limited_and_ordered() {
        let blocks = Statement::recent_blocks();
        assert!(blocks.text().contains("FROM `blocks`"));
        assert!(blocks.text().ends_with("ORDER BY META().id DESC LIMIT 10;"));

        let txs = Statement::recent_transactions();
        assert!(txs.text().contains("outputs[0].payload AS payload"));
        assert!(txs.text().ends_with("LIMIT 10;"));
    }

    #[test]
    fn lookups_bind_the_user_value_instead_of_interpolating() {
        let id: Identifier = "tx::\"; DELETE FROM blocks; --".parse().unwrap();
        let statement = Statement::lookup_by_id(&id);
        assert!(!statement.text().contains("DELETE"));
        assert_eq!(statement.args(), &[json!("tx::\"; DELETE FROM blocks; --")]);
    }

    #[test]
    fn serializes_to_the_query_service_body() {
        let id: Identifier = "block::0000000000000001_ff".parse().unwrap();
        let body = serde_json::to_value(Statement::detail(&id)).unwrap();
        assert_eq!(
            body,
            json!({
                "statement": "SELECT * FROM `blocks` WHERE META().id = $1;",
                "args": ["block::0000000000000001_ff"],
            })
        );
    }

    #[test]
    fn empty_args_are_omitted() {
        let body = serde_json::to_value(Statement::count(Table::Blocks)).unwrap();
        assert_eq!(
            body,
            json!({ "statement": "SELECT count(*) AS response FROM `blocks`;" })
        );
    }
}
