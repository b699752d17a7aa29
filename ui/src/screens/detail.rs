//=============================================================================
// File: src/screens/detail.rs
//=============================================================================
use api::identifier::Identifier;
use api::identifier::IdentifierError;
use api::row::Row;
use api::ApiError;
use dioxus::prelude::*;
use std::future::Future;

use crate::app_state_mut::AppStateMut;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::CopyButton;
use crate::Screen;

/// What the detail screen shows for one id.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    /// The id is not a `block::`/`tx::` identifier. No lookup is made.
    Invalid(String),
    Loading,
    /// The record, pretty-printed.
    Found(String),
    NotFound,
    Failed(String),
}

impl DetailState {
    /// Combines the parsed id with the lookup outcome, `None` while the
    /// lookup is still running.
    pub fn new(
        target: &Result<Identifier, IdentifierError>,
        outcome: Option<&Result<Option<Row>, String>>,
    ) -> Self {
        if let Err(e) = target {
            return DetailState::Invalid(e.to_string());
        }
        match outcome {
            None => DetailState::Loading,
            Some(Err(message)) => DetailState::Failed(message.clone()),
            Some(Ok(None)) => DetailState::NotFound,
            Some(Ok(Some(row))) => DetailState::Found(
                serde_json::to_string_pretty(row).unwrap_or_else(|e| e.to_string()),
            ),
        }
    }
}

/// Runs `fetch` for a parsed id. Without one, nothing is fetched.
pub async fn load_record<F, Fut>(target: Option<Identifier>, fetch: F) -> Result<Option<Row>, String>
where
    F: FnOnce(Identifier) -> Fut,
    Fut: Future<Output = Result<Option<Row>, ApiError>>,
{
    let Some(target) = target else {
        return Ok(None);
    };
    fetch(target).await.map_err(|e| {
        dioxus_logger::tracing::warn!("detail lookup failed: {e}");
        e.to_string()
    })
}

/// Height and hash shown above a record.
pub fn identifier_facts(id: &Identifier) -> Vec<(&'static str, String)> {
    let mut facts = Vec::new();
    if let Some(height) = id.height() {
        facts.push(("Height", height.to_string()));
    }
    facts.push(("Hash", id.hash().to_string()));
    facts
}

#[component]
pub fn DetailScreen(id: String) -> Element {
    let title = Screen::Detail { id: id.clone() }.name();

    let target = id.parse::<Identifier>();
    let fetch_target = target.clone().ok();
    let mut record = use_resource(move || {
        let target = fetch_target.clone();
        async move { load_record(target, |id| api::record_detail(id)).await }
    });

    let facts = target.as_ref().map(identifier_facts).unwrap_or_default();
    let state = DetailState::new(&target, record.read().as_ref());

    let body = match state {
        DetailState::Invalid(e) => rsx! {
            p { "Cannot show " code { "{id}" } ": {e}" }
        },
        DetailState::Loading => rsx! {
            p { "Loading..." }
            progress {}
        },
        DetailState::Failed(message) => rsx! {
            h4 { "Error" }
            p { "Failed to load record: {message}" }
            button {
                onclick: move |_| record.restart(),
                "Retry"
            }
        },
        DetailState::NotFound => rsx! {
            EmptyState {
                title: "Not found".to_string(),
                description: Some(format!("No record has the id {id}.")),
            }
        },
        DetailState::Found(pretty) => rsx! {
            div {
                style: "display: flex; justify-content: flex-end;",
                CopyButton { text_to_copy: pretty.clone() }
            }
            pre { class: "raw-record", "{pretty}" }
        },
    };

    rsx! {
        Card {
            div {
                style: "display: flex; justify-content: space-between; align-items: center; gap: 1rem;",
                h3 { style: "margin: 0;", "{title}" }
                BackButton {}
            }
            p { code { style: "word-break: break-all;", "{id}" } }
            if !facts.is_empty() {
                dl {
                    for (label, value) in facts {
                        dt { "{label}" }
                        dd { code { style: "word-break: break-all;", "{value}" } }
                    }
                }
            }
            {body}
            BackButton {}
        }
    }
}

/// Returns to the previous screen; reads "Home" when there is none.
#[component]
fn BackButton() -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let label = if app_state_mut.can_go_back() { "Back" } else { "Home" };

    rsx! {
        Button {
            button_type: ButtonType::Secondary,
            on_click: move |_| app_state_mut.back(),
            "{label}"
        }
    }
}
