//=============================================================================
// File: src/screens/search.rs
//=============================================================================
use api::search;
use api::search::SearchPlan;
use api::search::SearchResult;
use chrono::Utc;
use dioxus::prelude::*;

use crate::components::action_link::ActionLink;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Card;
use crate::listing::ListRenderer;
use crate::listing::RowLayout;
use crate::Screen;

/// Runs the lookup for `query` once and shows the matching rows.
///
/// Text the resolver rejects is reported without issuing a request.
#[component]
pub fn SearchScreen(query: String) -> Element {
    let fetch_query = query.clone();
    let mut results = use_resource(move || {
        let query = fetch_query.clone();
        async move {
            if let SearchPlan::Invalid(e) = search::resolve(&query) {
                dioxus_logger::tracing::warn!("search rejected {query:?}: {e}");
                return Err(e.to_string());
            }
            api::search(query).await.map_err(|e| {
                dioxus_logger::tracing::warn!("search failed: {e}");
                e.to_string()
            })
        }
    });

    rsx! {
        match &*results.read() {
            None => rsx! {
                Card {
                    h3 { "Search" }
                    p { "Searching for " code { "{query}" } "..." }
                    progress {}
                }
            },
            Some(Err(message)) => rsx! {
                Card {
                    h3 { "Search" }
                    p { "No search for " code { "{query}" } ": {message}" }
                    button {
                        onclick: move |_| results.restart(),
                        "Retry"
                    }
                }
            },
            Some(Ok(result)) if result.rows().is_empty() => rsx! {
                Card {
                    h3 { "Search" }
                    EmptyState {
                        title: "No results".to_string(),
                        description: Some(format!("Nothing matches {query}.")),
                    }
                }
            },
            Some(Ok(result)) => rsx! {
                Card {
                    h3 { "Search results ({result.rows().len()})" }
                    div {
                        style: "overflow-x: auto;",
                        match result {
                            SearchResult::Block(_) => rsx! { BlockResults { result: result.clone() } },
                            SearchResult::Transaction(_) | SearchResult::Payload(_) => rsx! {
                                TransactionResults { result: result.clone() }
                            },
                        }
                    }
                }
            },
        }
    }
}

#[component]
fn TransactionResults(result: SearchResult) -> Element {
    let renderer = ListRenderer::new(RowLayout::SEARCH_TRANSACTIONS, Utc::now());

    rsx! {
        table {
            thead {
                tr {
                    th { "Transaction" }
                    th { "Timestamp" }
                    th { "Address To" }
                    th { "Payload" }
                }
            }
            tbody {
                for row in renderer.render(result.rows()) {
                    tr {
                        key: "{row.id}",
                        td {
                            ActionLink {
                                to: Screen::Detail { id: row.id.clone() },
                                code { "{row.short_id}" }
                            }
                        }
                        td { title: "{row.relative}", "{row.absolute}" }
                        td { code { {row.to_address.clone().unwrap_or_default()} } }
                        td {
                            ActionLink {
                                to: Screen::Detail { id: row.id.clone() },
                                code { {row.payload.clone().unwrap_or_default()} }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BlockResults(result: SearchResult) -> Element {
    let renderer = ListRenderer::new(RowLayout::SEARCH_BLOCKS, Utc::now());

    rsx! {
        table {
            thead {
                tr {
                    th { "Block" }
                    th { "Timestamp" }
                    th { "Height" }
                    th { "Transactions" }
                }
            }
            tbody {
                for row in renderer.render(result.rows()) {
                    tr {
                        key: "{row.id}",
                        td {
                            ActionLink {
                                to: Screen::Detail { id: row.id.clone() },
                                code { "{row.short_id}" }
                            }
                        }
                        td { title: "{row.relative}", "{row.absolute}" }
                        td { {row.height.map(|h| h.to_string()).unwrap_or_default()} }
                        td { {row.tx_count.map(|n| n.to_string()).unwrap_or_default()} }
                    }
                }
            }
        }
    }
}
