//! Turns query rows into the strings shown in block and transaction tables.
//!
//! Rendering is lazy and keeps the row order it is given; ordering is the
//! statement's job.

use api::encoding;
use api::row::i64_at;
use api::row::str_at;
use api::row::value_at;
use api::row::Row;
use chrono::DateTime;
use chrono::Utc;
use serde_json::Value;
use std::iter::FusedIterator;
use std::slice;

/// Stored timestamps are nanoseconds since the epoch.
pub fn nanos_to_millis(nanos: i64) -> i64 {
    nanos / 1_000_000
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_absolute(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Clock skew tolerated between the query service and the viewer.
const SKEW_TOLERANCE_MS: i64 = 45_000;

/// Coarse "time ago" wording relative to `now`.
///
/// Timestamps slightly ahead of `now` read as just happened; only those
/// more than [`SKEW_TOLERANCE_MS`] ahead read as future.
pub fn format_relative(millis: i64, now: DateTime<Utc>) -> String {
    let elapsed_ms = now.timestamp_millis() - millis;
    if elapsed_ms < -SKEW_TOLERANCE_MS {
        return "in the future".to_string();
    }
    let elapsed_ms = elapsed_ms.max(0);

    let secs = elapsed_ms / 1000;
    let mins = (secs + 30) / 60;
    let hours = (secs + 1800) / 3600;
    let days = (secs + 43_200) / 86_400;

    match secs {
        s if s < 45 => "a few seconds ago".to_string(),
        s if s < 90 => "a minute ago".to_string(),
        s if s < 45 * 60 => format!("{mins} minutes ago"),
        s if s < 90 * 60 => "an hour ago".to_string(),
        s if s < 22 * 3600 => format!("{hours} hours ago"),
        s if s < 36 * 3600 => "a day ago".to_string(),
        _ if days < 26 => format!("{days} days ago"),
        _ if days < 45 => "a month ago".to_string(),
        _ if days < 320 => format!("{} months ago", (days + 15) / 30),
        _ if days < 548 => "a year ago".to_string(),
        _ => format!("{} years ago", (days + 182) / 365),
    }
}

/// Keeps the first `head` and last `tail` characters, joined by "...".
///
/// Strings that would not get shorter are returned unchanged.
pub fn truncate_middle(s: &str, head: usize, tail: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= head + tail {
        return s.to_string();
    }

    let first_part: String = s.chars().take(head).collect();
    let last_part: String = s.chars().skip(char_count - tail).collect();
    format!("{first_part}...{last_part}")
}

/// How many characters to keep on each side of an ellipsis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    pub head: usize,
    pub tail: usize,
}

impl Clip {
    pub const fn new(head: usize, tail: usize) -> Self {
        Self { head, tail }
    }

    pub fn apply(&self, s: &str) -> String {
        truncate_middle(s, self.head, self.tail)
    }
}

type Path = &'static [&'static str];

/// Where a row keeps the fields a table shows, and how to shorten them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLayout {
    pub id: Clip,
    pub timestamp: Path,
    pub payload: Option<(Path, Clip)>,
    pub address: Option<(Path, Clip)>,
    pub height: Option<Path>,
    pub transactions: Option<Path>,
}

impl RowLayout {
    /// Landing "Latest Blocks": `block::<height>_<3 hash chars>...`.
    pub const RECENT_BLOCKS: RowLayout = RowLayout {
        id: Clip::new(27, 0),
        timestamp: &["timestamp"],
        payload: None,
        address: None,
        height: None,
        transactions: None,
    };

    /// Landing "Latest Transactions".
    pub const RECENT_TRANSACTIONS: RowLayout = RowLayout {
        id: Clip::new(7, 6),
        timestamp: &["timestamp"],
        payload: Some((&["payload"], Clip::new(6, 6))),
        address: Some((&["toAddress"], Clip::new(6, 6))),
        height: None,
        transactions: None,
    };

    /// Search results for transaction and payload lookups.
    pub const SEARCH_TRANSACTIONS: RowLayout = RowLayout {
        id: Clip::new(16, 6),
        timestamp: &["transactions", "timestamp"],
        payload: Some((&["transactions", "outputs", "0", "payload"], Clip::new(16, 6))),
        address: Some((&["transactions", "outputs", "0", "address"], Clip::new(16, 6))),
        height: None,
        transactions: None,
    };

    /// Search results for block lookups.
    pub const SEARCH_BLOCKS: RowLayout = RowLayout {
        id: Clip::new(23, 6),
        timestamp: &["blocks", "header", "timestamp"],
        payload: None,
        address: None,
        height: Some(&["blocks", "header", "height"]),
        transactions: Some(&["blocks", "transactions"]),
    };
}

/// Display strings for one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayRow {
    /// Full identifier, used as the list key and link target.
    pub id: String,
    pub short_id: String,
    /// Empty when the row has no usable timestamp.
    pub absolute: String,
    pub relative: String,
    pub payload: Option<String>,
    /// Destination address decoded to hex, then shortened.
    pub to_address: Option<String>,
    pub height: Option<i64>,
    pub tx_count: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
pub struct ListRenderer {
    layout: RowLayout,
    now: DateTime<Utc>,
}

impl ListRenderer {
    pub fn new(layout: RowLayout, now: DateTime<Utc>) -> Self {
        Self { layout, now }
    }

    /// Lazily renders `rows` in their given order. The returned iterator can
    /// be cloned to walk the rows again.
    pub fn render<'a>(&self, rows: &'a [Row]) -> DisplayRows<'a> {
        DisplayRows {
            rows: rows.iter(),
            renderer: *self,
        }
    }

    pub fn render_row(&self, row: &Row) -> DisplayRow {
        let layout = &self.layout;
        let id = str_at(row, &["id"]).unwrap_or_default().to_string();

        let millis = i64_at(row, layout.timestamp)
            .filter(|nanos| *nanos != 0)
            .map(nanos_to_millis);
        let absolute = millis.and_then(format_absolute).unwrap_or_default();
        let relative = millis
            .map(|ms| format_relative(ms, self.now))
            .unwrap_or_default();

        let payload = layout
            .payload
            .and_then(|(path, clip)| str_at(row, path).map(|p| clip.apply(p)));

        let to_address = layout.address.and_then(|(path, clip)| {
            let encoded = str_at(row, path)?;
            match encoding::decode_address(encoded) {
                Ok(hex) => Some(clip.apply(&hex)),
                Err(e) => {
                    dioxus_logger::tracing::debug!("address of {id} not decodable: {e}");
                    None
                }
            }
        });

        let height = layout.height.and_then(|path| i64_at(row, path));
        let tx_count = layout.transactions.and_then(|path| match value_at(row, path) {
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        });

        DisplayRow {
            short_id: layout.id.apply(&id),
            id,
            absolute,
            relative,
            payload,
            to_address,
            height,
            tx_count,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DisplayRows<'a> {
    rows: slice::Iter<'a, Row>,
    renderer: ListRenderer,
}

impl Iterator for DisplayRows<'_> {
    type Item = DisplayRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|row| self.renderer.render_row(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for DisplayRows<'_> {}

impl FusedIterator for DisplayRows<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const NOW_MS: i64 = 1_700_000_000_000;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(NOW_MS).unwrap()
    }

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn nanoseconds_become_milliseconds() {
        assert_eq!(nanos_to_millis(1_700_000_000_000_000_000), 1_700_000_000_000);
    }

    #[test]
    fn absolute_time_is_formatted_in_utc() {
        assert_eq!(
            format_absolute(1_700_000_000_000).as_deref(),
            Some("2023-11-14 22:13:20")
        );
    }

    #[test]
    fn relative_time_wording() {
        let cases = [
            (10_000, "a few seconds ago"),
            (60_000, "a minute ago"),
            (10 * 60_000, "10 minutes ago"),
            (60 * 60_000, "an hour ago"),
            (5 * 3_600_000, "5 hours ago"),
            (24 * 3_600_000, "a day ago"),
            (3 * 86_400_000, "3 days ago"),
            (30 * 86_400_000, "a month ago"),
            (90 * 86_400_000, "3 months ago"),
            (400 * 86_400_000, "a year ago"),
            (3 * 365 * 86_400_000, "3 years ago"),
        ];
        for (ago_ms, expected) in cases {
            assert_eq!(format_relative(NOW_MS - ago_ms, now()), expected, "{ago_ms}");
        }
        assert_eq!(format_relative(NOW_MS + 60_000, now()), "in the future");
    }

    #[test]
    fn small_clock_skew_reads_as_just_now() {
        for ahead_ms in [1, 999, 5_000, 45_000] {
            assert_eq!(
                format_relative(NOW_MS + ahead_ms, now()),
                "a few seconds ago",
                "{ahead_ms}"
            );
        }
        assert_eq!(format_relative(NOW_MS + 45_001, now()), "in the future");
    }

    #[test]
    fn truncation_keeps_both_ends() {
        assert_eq!(truncate_middle("abcdefghijklmnop", 4, 4), "abcd...mnop");
        assert_eq!(truncate_middle("abcdefgh", 4, 4), "abcdefgh");
        assert_eq!(truncate_middle("abcdefgh", 3, 0), "abc...");
        assert_eq!(truncate_middle("ääääääääää", 2, 2), "ää...ää");
    }

    #[test]
    fn recent_block_row() {
        let renderer = ListRenderer::new(RowLayout::RECENT_BLOCKS, now());
        let r = row(json!({
            "id": "block::0000000000000042_abcdef0123456789",
            "timestamp": (NOW_MS - 120_000) * 1_000_000,
        }));
        let display = renderer.render_row(&r);
        assert_eq!(display.short_id, "block::0000000000000042_abc...");
        assert_eq!(display.absolute, "2023-11-14 22:11:20");
        assert_eq!(display.relative, "2 minutes ago");
        assert_eq!(display.payload, None);
    }

    #[test]
    fn recent_transaction_row_decodes_the_address() {
        let renderer = ListRenderer::new(RowLayout::RECENT_TRANSACTIONS, now());
        let r = row(json!({
            "id": "tx::0123456789abcdef0123",
            "timestamp": NOW_MS * 1_000_000,
            "toAddress": "3q2+7w==",
            "payload": "eyJhbW91bnQiOjEwMCwibWVtbyI6ImhpIn0=",
        }));
        let display = renderer.render_row(&r);
        assert_eq!(display.short_id, "tx::012...ef0123");
        assert_eq!(display.to_address.as_deref(), Some("deadbeef"));
        assert_eq!(display.payload.as_deref(), Some("eyJhbW...hpIn0="));
        assert_eq!(display.relative, "a few seconds ago");
    }

    #[test]
    fn search_block_row_reads_nested_fields() {
        let renderer = ListRenderer::new(RowLayout::SEARCH_BLOCKS, now());
        let r = row(json!({
            "id": "block::0000000000000042_abcdef",
            "blocks": {
                "header": { "height": 42, "timestamp": NOW_MS * 1_000_000 },
                "transactions": [{}, {}, {}],
            }
        }));
        let display = renderer.render_row(&r);
        assert_eq!(display.height, Some(42));
        assert_eq!(display.tx_count, Some(3));
        assert_eq!(display.absolute, "2023-11-14 22:13:20");
    }

    #[test]
    fn missing_timestamp_renders_empty() {
        let renderer = ListRenderer::new(RowLayout::RECENT_BLOCKS, now());
        let display = renderer.render_row(&row(json!({ "id": "block::x" })));
        assert_eq!(display.absolute, "");
        assert_eq!(display.relative, "");

        let zero = renderer.render_row(&row(json!({ "id": "block::x", "timestamp": 0 })));
        assert_eq!(zero.absolute, "");
    }

    #[test]
    fn undecodable_address_is_omitted() {
        let renderer = ListRenderer::new(RowLayout::RECENT_TRANSACTIONS, now());
        let display = renderer.render_row(&row(json!({ "id": "tx::a", "toAddress": "%%%" })));
        assert_eq!(display.to_address, None);
    }

    #[test]
    fn output_preserves_input_order() {
        // Deliberately unsorted timestamps.
        let offsets = [5, 1, 9, 3, 7, 2, 8, 4, 10, 6];
        let rows: Vec<Row> = offsets
            .iter()
            .map(|i| {
                row(json!({
                    "id": format!("block::{i:016}_ff"),
                    "timestamp": (NOW_MS - i * 60_000) * 1_000_000,
                }))
            })
            .collect();

        let renderer = ListRenderer::new(RowLayout::RECENT_BLOCKS, now());
        let ids: Vec<String> = renderer.render(&rows).map(|d| d.id).collect();
        let expected: Vec<String> = offsets.iter().map(|i| format!("block::{i:016}_ff")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn rendering_is_restartable() {
        let rows = vec![
            row(json!({ "id": "tx::1" })),
            row(json!({ "id": "tx::2" })),
        ];
        let renderer = ListRenderer::new(RowLayout::RECENT_TRANSACTIONS, now());
        let display = renderer.render(&rows);
        assert_eq!(display.len(), 2);

        let first: Vec<DisplayRow> = display.clone().collect();
        let second: Vec<DisplayRow> = display.collect();
        assert_eq!(first, second);
    }
}
