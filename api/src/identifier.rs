//! Document keys used by the query service for blocks and transactions.

use crate::statement::Table;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const BLOCK_PREFIX: &str = "block::";
pub const TX_PREFIX: &str = "tx::";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier must start with `block::` or `tx::`: {0}")]
    UnknownNamespace(String),
    #[error("identifier has an empty token: {0}")]
    EmptyToken(String),
}

/// A namespaced document key such as `block::0000000000000042_ab12...` or
/// `tx::9f0c...`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Identifier {
    Block(String),
    Transaction(String),
}

impl Identifier {
    /// The part after the namespace prefix.
    pub fn token(&self) -> &str {
        match self {
            Identifier::Block(token) | Identifier::Transaction(token) => token,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Identifier::Block(_) => BLOCK_PREFIX,
            Identifier::Transaction(_) => TX_PREFIX,
        }
    }

    /// The table holding documents of this family.
    pub fn table(&self) -> Table {
        match self {
            Identifier::Block(_) => Table::Blocks,
            Identifier::Transaction(_) => Table::Transactions,
        }
    }

    /// Block height encoded in a `<zero-padded height>_<hash>` block token.
    pub fn height(&self) -> Option<u64> {
        match self {
            Identifier::Block(token) => token.split_once('_')?.0.parse().ok(),
            Identifier::Transaction(_) => None,
        }
    }

    /// Hash part of the token: everything after the height for blocks, the
    /// whole token for transactions.
    pub fn hash(&self) -> &str {
        match self {
            Identifier::Block(token) => token.split_once('_').map_or(token.as_str(), |(_, h)| h),
            Identifier::Transaction(token) => token,
        }
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (ctor, token): (fn(String) -> Identifier, &str) =
            if let Some(token) = s.strip_prefix(BLOCK_PREFIX) {
                (Identifier::Block, token)
            } else if let Some(token) = s.strip_prefix(TX_PREFIX) {
                (Identifier::Transaction, token)
            } else {
                return Err(IdentifierError::UnknownNamespace(s.to_string()));
            };
        if token.is_empty() {
            return Err(IdentifierError::EmptyToken(s.to_string()));
        }
        Ok(ctor(token.to_string()))
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_identifiers() {
        let id: Identifier = "block::0000000000000042_ab12cd".parse().unwrap();
        assert_eq!(id, Identifier::Block("0000000000000042_ab12cd".into()));
        assert_eq!(id.table(), Table::Blocks);
        assert_eq!(id.height(), Some(42));
        assert_eq!(id.hash(), "ab12cd");
        assert_eq!(id.to_string(), "block::0000000000000042_ab12cd");
    }

    #[test]
    fn parses_transaction_identifiers() {
        let id: Identifier = "tx::9f0c".parse().unwrap();
        assert_eq!(id.table(), Table::Transactions);
        assert_eq!(id.height(), None);
        assert_eq!(id.hash(), "9f0c");
    }

    #[test]
    fn block_token_without_height_has_no_height() {
        let id: Identifier = "block::deadbeef".parse().unwrap();
        assert_eq!(id.height(), None);
        assert_eq!(id.hash(), "deadbeef");
    }

    #[test]
    fn rejects_unknown_namespaces_and_empty_tokens() {
        assert_eq!(
            "eyJhIjoxfQ==".parse::<Identifier>(),
            Err(IdentifierError::UnknownNamespace("eyJhIjoxfQ==".into()))
        );
        assert_eq!(
            "tx::".parse::<Identifier>(),
            Err(IdentifierError::EmptyToken("tx::".into()))
        );
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let id = Identifier::Transaction("abc".into());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tx::abc\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
