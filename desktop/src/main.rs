use dioxus::prelude::*;

// Desktop window around the shared UI. Server functions run in-process, so
// the QUERY_SERVICE_* variables must be set for this process.
fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus_logger::tracing::info!("starting darkblock-scan desktop");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::App()
}
