use crate::poll_state::FieldState;
use crate::poll_state::PollValue;
use dioxus::prelude::*;

/// Shows a polled counter: busy while pending, the last good value
/// otherwise, and the latest error underneath when a fetch failed.
#[component]
pub fn PolledCount(label: String, state: FieldState) -> Element {
    let value = match state.value() {
        Some(PollValue::Count(n)) => Some(n.to_string()),
        Some(PollValue::Rows(rows)) => Some(rows.len().to_string()),
        None => None,
    };

    rsx! {
        div {
            small { "{label}" }
            if let Some(value) = value {
                p { class: "hero-value", "{value}" }
            } else if state.is_pending() {
                p { class: "hero-value", aria_busy: "true" }
            } else {
                p { class: "hero-value", "-" }
            }
            if let Some(message) = state.error() {
                small { class: "stale", title: "{message}", "update failed" }
            }
        }
    }
}

/// A plain counter that never changes while the app runs.
#[component]
pub fn StaticCount(label: String, value: u32) -> Element {
    rsx! {
        div {
            small { "{label}" }
            p { class: "hero-value", "{value}" }
        }
    }
}
