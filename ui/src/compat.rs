// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use std::time::Duration;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Window;

    pub mod interval {
        use std::time::Duration;
        use tokio::sync::mpsc;

        /// Fixed-rate ticker. The first tick completes immediately, like
        /// tokio's.
        pub struct Interval {
            inner: Option<gloo_timers::callback::Interval>,
            rx: mpsc::UnboundedReceiver<()>,
            fired_first: bool,
        }

        impl Interval {
            pub fn new(duration: Duration) -> Self {
                let (tx, rx) = mpsc::unbounded_channel();
                let gloo_interval =
                    gloo_timers::callback::Interval::new(duration.as_millis() as u32, move || {
                        let _ = tx.send(());
                    });

                Self {
                    inner: Some(gloo_interval),
                    rx,
                    fired_first: false,
                }
            }

            pub async fn tick(&mut self) {
                if !self.fired_first {
                    self.fired_first = true;
                    return;
                }
                let _ = self.rx.recv().await;
            }
        }

        impl Drop for Interval {
            fn drop(&mut self) {
                if let Some(inner) = self.inner.take() {
                    inner.cancel();
                }
            }
        }
    }

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    pub async fn clipboard_set(text: String) -> bool {
        match web_sys::window().map(|win: Window| win.navigator().clipboard()) {
            Some(clipboard) => {
                let promise = clipboard.write_text(&text);
                JsFuture::from(promise).await.is_ok()
            }
            _ => false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use dioxus_clipboard::prelude::*;
    use std::time::Duration;

    pub mod interval {
        use tokio::time::{self, Duration, MissedTickBehavior};

        /// Fixed-rate ticker; a late tick shifts the schedule instead of
        /// bursting.
        pub struct Interval {
            inner: tokio::time::Interval,
        }

        impl Interval {
            pub fn new(duration: Duration) -> Self {
                let mut interval = time::interval(duration);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                Self { inner: interval }
            }

            pub async fn tick(&mut self) {
                self.inner.tick().await;
            }
        }
    }

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    pub async fn clipboard_set(text: String) -> bool {
        let mut clipboard = use_clipboard();
        clipboard.set(text).is_ok()
    }
}
