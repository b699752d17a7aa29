use dioxus::prelude::*;

fn main() {
    dioxus::logger::init(dioxus::logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

/// Same screens as the web build; the server address comes from the dx
/// bundle configuration.
#[component]
fn App() -> Element {
    ui::App()
}
