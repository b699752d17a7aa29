use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::action_link::ActionLink;
use crate::Screen;
use api::search;
use api::search::SearchPlan;
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let app_state = use_context::<AppState>();

    rsx! {
        header {
            nav {
                ul {
                    li {
                        span { class: "env-label", "{app_state.info.environment}" }
                    }
                    li {
                        ActionLink {
                            to: Screen::Home,
                            strong { "DARKBLOCK SCAN" }
                        }
                    }
                }
                ul {
                    li { SearchBar {} }
                }
            }
        }
    }
}

/// The search box's text and its last rejection message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchBox {
    pub text: String,
    pub rejection: Option<String>,
}

impl SearchBox {
    /// Clears the box and returns the screen to open. Rejected text opens
    /// nothing and leaves a message instead, so it never becomes a request.
    pub fn submit(&mut self) -> Option<Screen> {
        let text = std::mem::take(&mut self.text).trim().to_string();

        match search::resolve(&text) {
            SearchPlan::Invalid(e) => {
                dioxus_logger::tracing::warn!("invalid search input {text:?}: {e}");
                self.rejection = Some(e.to_string());
                None
            }
            SearchPlan::Lookup { category, .. } => {
                dioxus_logger::tracing::debug!("search [{category}] {text:?}");
                self.rejection = None;
                Some(Screen::Search { query: text })
            }
        }
    }
}

#[component]
fn SearchBar() -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();
    let mut search_box = use_signal(SearchBox::default);
    let text = search_box.read().text.clone();
    let rejection = search_box.read().rejection.clone();

    rsx! {
        form {
            onsubmit: move |evt| {
                evt.prevent_default();
                let target = search_box.write().submit();
                if let Some(screen) = target {
                    app_state_mut.navigate(screen);
                }
            },
            div {
                role: "group",
                style: "margin-bottom: 0;",
                input {
                    r#type: "search",
                    placeholder: "Search by block::, tx:: or payload",
                    maxlength: search::MAX_INPUT_LEN as i64,
                    value: "{text}",
                    aria_invalid: if rejection.is_some() { "true" },
                    oninput: move |event| search_box.write().text = event.value(),
                }
                button {
                    r#type: "submit",
                    "Search"
                }
            }
            if let Some(ref message) = rejection {
                small { class: "stale", "{message}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> SearchBox {
        SearchBox {
            text: text.to_string(),
            rejection: None,
        }
    }

    #[test]
    fn accepted_input_is_cleared_and_opens_search() {
        let mut search_box = typed("  tx::9f0c ");
        assert_eq!(
            search_box.submit(),
            Some(Screen::Search {
                query: "tx::9f0c".to_string()
            })
        );
        assert_eq!(search_box, SearchBox::default());
    }

    #[test]
    fn rejected_input_is_cleared_and_reported() {
        let mut search_box = typed("hello");
        assert_eq!(search_box.submit(), None);
        assert_eq!(search_box.text, "");
        assert!(search_box.rejection.is_some());
    }

    #[test]
    fn a_later_accepted_search_clears_the_rejection() {
        let mut search_box = typed("");
        assert_eq!(search_box.submit(), None);
        assert!(search_box.rejection.is_some());

        search_box.text = "block::0000000000000001_ab".to_string();
        assert!(search_box.submit().is_some());
        assert_eq!(search_box.rejection, None);
    }
}
