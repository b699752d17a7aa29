// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
pub mod listing;
pub mod poll_state;
pub mod poller;
mod screens;

use app_state::AppState;
use app_state_mut::AppStateMut;
use app_state_mut::Navigation;
use components::header::Header;
use components::pico::Container;
use screens::detail::DetailScreen;
use screens::home::HomeScreen;
use screens::search::SearchScreen;

/// The screens of the explorer. Each carries its navigation parameter.
#[derive(Clone, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Home,
    /// Results for the raw search text in `query`.
    Search { query: String },
    /// One block or transaction, by its `block::`/`tx::` id.
    Detail { id: String },
}

impl Screen {
    /// Helper to get the display name for each screen.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Search { .. } => "Search",
            Screen::Detail { id } if id.starts_with(api::identifier::BLOCK_PREFIX) => {
                "Block Details"
            }
            Screen::Detail { .. } => "Transaction Details",
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let responsive_css = r#"
    * { box-sizing: border-box; }

    .app-main-container header {
        --pico-nav-element-spacing-vertical: 0.5rem;
    }

    .env-label { color: var(--pico-primary); font-weight: bold; }

    .hero-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr)); gap: 1rem; }
    .hero-value { font-size: 1.5rem; margin: 0; }
    .stale { color: var(--pico-del-color); font-size: 0.8rem; }

    .latest-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(22rem, 1fr)); gap: 1rem; }

    pre.raw-record { white-space: pre-wrap; word-break: break-all; }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css",
        }
        style {
            "{responsive_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // this will be processed on server before initial page is delivered.
    let initial_data_future = use_server_future(move || async move { api::dashboard_info().await })?;

    let body = match &*initial_data_future.read() {
        Some(Ok(info)) => {
            dioxus_logger::tracing::info!("dashboard: {:?}", info);
            rsx! {
                LoadedApp {
                    app_state: AppState::new(info.clone()),
                }
            }
        }
        Some(Err(e)) => rsx! {
            p {
                "An error occurred: {e}"
            }
        },
        _ => rsx! {
            p {
                "Loading..."
            }
        },
    };
    body
}

/// This component holds the main app logic and only runs when data is ready.
#[component]
fn LoadedApp(app_state: AppState) -> Element {
    use_context_provider(|| app_state.clone());

    let navigation = use_signal(Navigation::default);
    use_context_provider(|| AppStateMut { navigation });
    let app_state_mut = use_context::<AppStateMut>();

    rsx! {
        div {
            class: "app-main-container",
            Container {
                Header {}
                div {
                    class: "content",
                    match app_state_mut.screen() {
                        Screen::Home => rsx! {
                            HomeScreen {
                                clickable: app_state.info.link_latest,
                            }
                        },
                        Screen::Search { query } => rsx! {
                            SearchScreen {
                                key: "{query}",
                                query,
                            }
                        },
                        Screen::Detail { id } => rsx! {
                            DetailScreen {
                                key: "{id}",
                                id,
                            }
                        },
                    }
                }
            }
        }
    }
}
