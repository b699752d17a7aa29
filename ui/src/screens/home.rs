//=============================================================================
// File: src/screens/home.rs
//=============================================================================
use chrono::Utc;
use dioxus::prelude::*;

use crate::app_state::AppState;
use crate::components::action_link::ActionLink;
use crate::components::empty_state::EmptyState;
use crate::components::identifier::IdentifierDisplay;
use crate::components::pico::Card;
use crate::components::polled_value::PolledCount;
use crate::components::polled_value::StaticCount;
use crate::hooks::use_landing_poll::use_landing_poll;
use crate::listing::DisplayRow;
use crate::listing::ListRenderer;
use crate::listing::RowLayout;
use crate::poll_state::FieldState;
use crate::poll_state::PollField;
use crate::poll_state::PollValue;
use crate::Screen;

/// Landing view: live counters and the latest blocks and transactions.
///
/// Polling starts on mount and stops when the screen is left.
#[component]
pub fn HomeScreen(clickable: bool) -> Element {
    let app_state = use_context::<AppState>();
    let poll = use_landing_poll();
    let state = poll.read().clone();

    rsx! {
        Card {
            div {
                class: "hero-grid",
                PolledCount {
                    label: "Transactions".to_string(),
                    state: state.get(PollField::TransactionCount).clone(),
                }
                PolledCount {
                    label: "Blocks".to_string(),
                    state: state.get(PollField::BlockCount).clone(),
                }
                StaticCount {
                    label: "Connected Nodes".to_string(),
                    value: app_state.info.connected_nodes,
                }
                StaticCount {
                    label: "Validators".to_string(),
                    value: app_state.info.validators,
                }
            }
        }
        LatestLists {
            clickable,
            blocks: state.get(PollField::RecentBlocks).clone(),
            transactions: state.get(PollField::RecentTransactions).clone(),
        }
    }
}

/// The "Latest Blocks" and "Latest Transactions" tables. With `clickable`
/// set, ids open the detail screen; otherwise they only reveal the full id.
#[component]
pub fn LatestLists(clickable: bool, blocks: FieldState, transactions: FieldState) -> Element {
    let now = Utc::now();
    let block_rows = rows_of(&blocks);
    let tx_rows = rows_of(&transactions);
    let block_renderer = ListRenderer::new(RowLayout::RECENT_BLOCKS, now);
    let tx_renderer = ListRenderer::new(RowLayout::RECENT_TRANSACTIONS, now);

    rsx! {
        div {
            class: "latest-grid",
            Card {
                h4 { "Latest Blocks" }
                ListStatus { state: blocks.clone() }
                if !block_rows.is_empty() {
                    table {
                        thead {
                            tr {
                                th { "Block" }
                                th { "Time" }
                                th { "Age" }
                            }
                        }
                        tbody {
                            for row in block_renderer.render(block_rows) {
                                tr {
                                    key: "{row.id}",
                                    td { IdCell { row: row.clone(), clickable } }
                                    td { "{row.absolute}" }
                                    td { "{row.relative}" }
                                }
                            }
                        }
                    }
                }
            }
            Card {
                h4 { "Latest Transactions" }
                ListStatus { state: transactions.clone() }
                if !tx_rows.is_empty() {
                    table {
                        thead {
                            tr {
                                th { "Transaction" }
                                th { "Age" }
                                th { "Payload" }
                                th { "To" }
                            }
                        }
                        tbody {
                            for row in tx_renderer.render(tx_rows) {
                                tr {
                                    key: "{row.id}",
                                    td { IdCell { row: row.clone(), clickable } }
                                    td { title: "{row.absolute}", "{row.relative}" }
                                    td { code { {row.payload.clone().unwrap_or_default()} } }
                                    td { code { {row.to_address.clone().unwrap_or_default()} } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn rows_of(state: &FieldState) -> &[api::row::Row] {
    match state.value() {
        Some(PollValue::Rows(rows)) => rows,
        _ => &[],
    }
}

/// Loading, empty and error hints above a polled list.
#[component]
fn ListStatus(state: FieldState) -> Element {
    let empty = matches!(state.value(), Some(PollValue::Rows(rows)) if rows.is_empty());

    rsx! {
        if state.is_pending() {
            progress {}
        }
        if let Some(message) = state.error() {
            p { class: "stale", "Update failed: {message}" }
        }
        if empty {
            EmptyState { title: "Nothing here yet".to_string() }
        }
    }
}

#[component]
fn IdCell(row: DisplayRow, clickable: bool) -> Element {
    if clickable {
        rsx! {
            ActionLink {
                to: Screen::Detail { id: row.id.clone() },
                title: Some(row.id.clone()),
                code { "{row.short_id}" }
            }
        }
    } else {
        rsx! {
            IdentifierDisplay { id: row.id, short_id: row.short_id }
        }
    }
}
