//! Maps raw search-box input to a lookup statement and a result category.

use crate::encoding;
use crate::identifier::Identifier;
use crate::identifier::BLOCK_PREFIX;
use crate::identifier::TX_PREFIX;
use crate::row::Row;
use crate::statement::Statement;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Leading characters of base64-encoded JSON (`{"` encodes to `ey`), which is
/// what transaction payloads hold.
pub const PAYLOAD_PREFIX: &str = "ey";

/// Longest input the search box accepts.
pub const MAX_INPUT_LEN: usize = 160;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIs,
)]
#[strum(serialize_all = "lowercase")]
pub enum SearchCategory {
    Transaction,
    Block,
    Payload,
    Invalid,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search input is empty")]
    Empty,
    #[error("search input is longer than 160 characters")]
    TooLong,
    #[error("unrecognized search input; expected `tx::…`, `block::…` or a base64 payload")]
    Unrecognized,
}

/// What a search should do, decided before any request is made.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchPlan {
    Lookup {
        category: SearchCategory,
        statement: Statement,
    },
    Invalid(SearchError),
}

impl SearchPlan {
    pub fn category(&self) -> SearchCategory {
        match self {
            SearchPlan::Lookup { category, .. } => *category,
            SearchPlan::Invalid(_) => SearchCategory::Invalid,
        }
    }

    /// The statement to run, `None` when no request should be issued.
    pub fn statement(&self) -> Option<&Statement> {
        match self {
            SearchPlan::Lookup { statement, .. } => Some(statement),
            SearchPlan::Invalid(_) => None,
        }
    }
}

/// Classifies `input` by its prefix and builds the matching lookup.
pub fn resolve(input: &str) -> SearchPlan {
    let input = input.trim();
    if input.is_empty() {
        return SearchPlan::Invalid(SearchError::Empty);
    }
    if input.chars().count() > MAX_INPUT_LEN {
        return SearchPlan::Invalid(SearchError::TooLong);
    }

    if input.starts_with(TX_PREFIX) || input.starts_with(BLOCK_PREFIX) {
        return match input.parse::<Identifier>() {
            Ok(id) => {
                let category = match id {
                    Identifier::Block(_) => SearchCategory::Block,
                    Identifier::Transaction(_) => SearchCategory::Transaction,
                };
                SearchPlan::Lookup {
                    category,
                    statement: Statement::lookup_by_id(&id),
                }
            }
            Err(_) => SearchPlan::Invalid(SearchError::Unrecognized),
        };
    }

    if input.starts_with(PAYLOAD_PREFIX) && encoding::is_base64(input) {
        return SearchPlan::Lookup {
            category: SearchCategory::Payload,
            statement: Statement::lookup_by_payload(input),
        };
    }

    SearchPlan::Invalid(SearchError::Unrecognized)
}

/// Rows found by a search, tagged with how they were looked up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchResult {
    Transaction(Vec<Row>),
    Block(Vec<Row>),
    Payload(Vec<Row>),
}

impl SearchResult {
    /// Wraps `rows` under `category`. `None` for [`SearchCategory::Invalid`].
    pub fn new(category: SearchCategory, rows: Vec<Row>) -> Option<Self> {
        match category {
            SearchCategory::Transaction => Some(SearchResult::Transaction(rows)),
            SearchCategory::Block => Some(SearchResult::Block(rows)),
            SearchCategory::Payload => Some(SearchResult::Payload(rows)),
            SearchCategory::Invalid => None,
        }
    }

    pub fn category(&self) -> SearchCategory {
        match self {
            SearchResult::Transaction(_) => SearchCategory::Transaction,
            SearchResult::Block(_) => SearchCategory::Block,
            SearchResult::Payload(_) => SearchCategory::Payload,
        }
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            SearchResult::Transaction(rows)
            | SearchResult::Block(rows)
            | SearchResult::Payload(rows) => rows,
        }
    }
}
