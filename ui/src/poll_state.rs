//! State behind the landing view's live counters and lists.
//!
//! Each polled field is written only through [`PollState::apply`], one event
//! at a time, so a field's value and its last error travel together.

use api::row::Row;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// The independently polled values on the landing view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PollField {
    TransactionCount,
    BlockCount,
    RecentBlocks,
    RecentTransactions,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PollValue {
    Count(u64),
    Rows(Vec<Row>),
}

/// The outcome of one fetch of one field.
#[derive(Clone, Debug, PartialEq)]
pub struct PollEvent {
    pub field: PollField,
    pub outcome: Result<PollValue, String>,
}

impl PollEvent {
    pub fn ready(field: PollField, value: PollValue) -> Self {
        Self {
            field,
            outcome: Ok(value),
        }
    }

    pub fn failed(field: PollField, message: impl Into<String>) -> Self {
        Self {
            field,
            outcome: Err(message.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum FieldState {
    /// Nothing has arrived yet.
    #[default]
    Pending,
    Ready(PollValue),
    /// The latest fetch failed. `last` is the most recent good value, if any.
    Failed {
        message: String,
        last: Option<PollValue>,
    },
}

impl FieldState {
    /// The value to display, stale or not.
    pub fn value(&self) -> Option<&PollValue> {
        match self {
            FieldState::Pending => None,
            FieldState::Ready(value) => Some(value),
            FieldState::Failed { last, .. } => last.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FieldState::Pending)
    }

    fn transition(&mut self, outcome: Result<PollValue, String>) {
        let next = match outcome {
            Ok(value) => FieldState::Ready(value),
            Err(message) => {
                let last = match std::mem::take(self) {
                    FieldState::Ready(value) => Some(value),
                    FieldState::Failed { last, .. } => last,
                    FieldState::Pending => None,
                };
                FieldState::Failed { message, last }
            }
        };
        *self = next;
    }
}

/// All polled fields, keyed by [`PollField`].
#[derive(Clone, Debug, PartialEq)]
pub struct PollState {
    fields: BTreeMap<PollField, FieldState>,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            fields: PollField::iter()
                .map(|field| (field, FieldState::Pending))
                .collect(),
        }
    }
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the state of `event.field` only.
    pub fn apply(&mut self, event: PollEvent) {
        self.fields
            .entry(event.field)
            .or_default()
            .transition(event.outcome);
    }

    pub fn get(&self, field: PollField) -> &FieldState {
        static PENDING: FieldState = FieldState::Pending;
        self.fields.get(&field).unwrap_or(&PENDING)
    }

    pub fn count(&self, field: PollField) -> Option<u64> {
        match self.get(field).value()? {
            PollValue::Count(n) => Some(*n),
            PollValue::Rows(_) => None,
        }
    }

    /// Rows of a list field; empty while pending.
    pub fn rows(&self, field: PollField) -> &[Row] {
        match self.get(field).value() {
            Some(PollValue::Rows(rows)) => rows,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(id: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), json!(id));
        row
    }

    #[test]
    fn starts_with_every_field_pending() {
        let state = PollState::new();
        for field in PollField::iter() {
            assert!(state.get(field).is_pending(), "{field}");
        }
        assert_eq!(state.count(PollField::BlockCount), None);
        assert!(state.rows(PollField::RecentBlocks).is_empty());
    }

    #[test]
    fn events_only_touch_their_own_field() {
        let mut state = PollState::new();
        state.apply(PollEvent::ready(PollField::BlockCount, PollValue::Count(7)));

        assert_eq!(state.count(PollField::BlockCount), Some(7));
        assert!(state.get(PollField::TransactionCount).is_pending());
        assert!(state.get(PollField::RecentBlocks).is_pending());
    }

    #[test]
    fn newer_results_replace_older_ones() {
        let mut state = PollState::new();
        state.apply(PollEvent::ready(
            PollField::RecentBlocks,
            PollValue::Rows(vec![row("block::1")]),
        ));
        state.apply(PollEvent::ready(
            PollField::RecentBlocks,
            PollValue::Rows(vec![row("block::2"), row("block::3")]),
        ));
        assert_eq!(
            state.rows(PollField::RecentBlocks),
            &[row("block::2"), row("block::3")]
        );
    }

    #[test]
    fn failure_keeps_the_last_good_value_visible() {
        let mut state = PollState::new();
        state.apply(PollEvent::ready(PollField::TransactionCount, PollValue::Count(10)));
        state.apply(PollEvent::failed(PollField::TransactionCount, "connection refused"));

        let field = state.get(PollField::TransactionCount);
        assert_eq!(field.error(), Some("connection refused"));
        assert_eq!(state.count(PollField::TransactionCount), Some(10));

        state.apply(PollEvent::failed(PollField::TransactionCount, "timed out"));
        assert_eq!(
            state.get(PollField::TransactionCount),
            &FieldState::Failed {
                message: "timed out".to_string(),
                last: Some(PollValue::Count(10)),
            }
        );
    }

    #[test]
    fn failure_before_any_value_has_nothing_to_show() {
        let mut state = PollState::new();
        state.apply(PollEvent::failed(PollField::RecentTransactions, "boom"));
        let field = state.get(PollField::RecentTransactions);
        assert_eq!(field.value(), None);
        assert_eq!(field.error(), Some("boom"));
    }

    #[test]
    fn success_clears_the_error() {
        let mut state = PollState::new();
        state.apply(PollEvent::failed(PollField::BlockCount, "boom"));
        state.apply(PollEvent::ready(PollField::BlockCount, PollValue::Count(1)));
        assert_eq!(state.get(PollField::BlockCount).error(), None);
        assert_eq!(state.count(PollField::BlockCount), Some(1));
    }
}
