//=============================================================================
// File: src/components/identifier.rs
//=============================================================================
use crate::components::pico::{Button, CopyButton, NoTitleModal};
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct IdentifierProps {
    /// The full `block::`/`tx::` id.
    pub id: String,
    /// What to show in place of the full id.
    pub short_id: String,
}

/// An abbreviated record id. Clicking it shows the full id with a copy button.
#[component]
pub fn IdentifierDisplay(props: IdentifierProps) -> Element {
    let mut is_modal_open = use_signal(|| false);
    let full_id = props.id.clone();

    rsx! {
        NoTitleModal {
            is_open: is_modal_open,
            div {
                style: "display: flex; flex-direction: column; align-items: center; text-align: center",
                div {
                    style: "display: flex; justify-content: center; gap: 0.5rem;",
                    CopyButton { text_to_copy: full_id.clone() }
                    Button {
                        on_click: move |_| is_modal_open.set(false),
                        "Close"
                    }
                }
                h4 {
                    style: "margin-top: 1rem; margin-bottom: 0rem;",
                    "Full Identifier"
                }
                code {
                    style: "text-align: left; word-break: break-all; padding: 1rem; width: 100%; margin-bottom: 1rem;",
                    "{full_id}"
                }
            }
        }

        span {
            style: "cursor: pointer;",
            title: "Click to view full identifier",
            onclick: move |_| is_modal_open.set(true),
            code { "{props.short_id}" }
        }
    }
}
