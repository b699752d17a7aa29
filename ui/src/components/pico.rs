//! A set of reusable, lifetime-free Dioxus components for the Pico.css framework.
//! To use, ensure you have pico.min.css linked in your main application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use crate::compat;
use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

//=============================================================================
// Layout Components
//=============================================================================

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element) -> Element {
    rsx! { article { {children} } }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
}

/// A versatile button component.
pub fn Button(props: ButtonProps) -> Element {
    let class_str = match (&props.button_type, props.outline) {
        (ButtonType::Primary, false) => "",
        (ButtonType::Primary, true) => "outline",
        (ButtonType::Secondary, false) => "secondary",
        (ButtonType::Secondary, true) => "secondary outline",
        (ButtonType::Contrast, false) => "contrast",
        (ButtonType::Contrast, true) => "contrast outline",
    };
    rsx! {
        button {
            class: "{class_str}",
            disabled: props.disabled,
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

/// Copies `text_to_copy` to the clipboard and briefly confirms it.
#[component]
pub fn CopyButton(text_to_copy: String) -> Element {
    let mut copied = use_signal(|| false);

    rsx! {
        Button {
            button_type: ButtonType::Secondary,
            outline: true,
            on_click: move |_| {
                let text = text_to_copy.clone();
                spawn(async move {
                    if compat::clipboard_set(text).await {
                        copied.set(true);
                        compat::sleep(std::time::Duration::from_secs(2)).await;
                        copied.set(false);
                    } else {
                        dioxus_logger::tracing::warn!("clipboard write failed");
                    }
                });
            },
            if copied() { "Copied" } else { "Copy" }
        }
    }
}

// A modal with no title bar that closes on backdrop click or Escape key.
#[derive(Props, PartialEq, Clone)]
pub struct NoTitleModalProps {
    is_open: Signal<bool>,
    children: Element,
}

pub fn NoTitleModal(mut props: NoTitleModalProps) -> Element {
    rsx! {
        if (props.is_open)() {
            dialog {
                open: true,
                autofocus: true,
                onclick: move |_| props.is_open.set(false),
                onkeydown: move |evt| {
                    if evt.key() == Key::Escape {
                        props.is_open.set(false);
                    }
                },
                // Clicks inside the article must not reach the backdrop.
                article {
                    onclick: |evt| evt.stop_propagation(),
                    {props.children}
                }
            }
        }
    }
}
