use crate::poll_state::PollField;
use crate::poll_state::PollState;
use crate::poll_state::PollValue;
use crate::poller::Liveness;
use crate::poller::PollSource;
use crate::poller::Poller;
use crate::poller::POLL_INTERVAL;
use api::ApiError;
use dioxus::prelude::*;

/// Polls the landing view's fields through the server functions.
#[derive(Clone, Copy, Default)]
pub struct ServerPollSource;

impl PollSource for ServerPollSource {
    async fn fetch(&self, field: PollField) -> Result<PollValue, ApiError> {
        match field {
            PollField::TransactionCount => api::transaction_count().await.map(PollValue::Count),
            PollField::BlockCount => api::block_count().await.map(PollValue::Count),
            PollField::RecentBlocks => api::recent_blocks().await.map(PollValue::Rows),
            PollField::RecentTransactions => {
                api::recent_transactions().await.map(PollValue::Rows)
            }
        }
    }
}

/// Starts polling when the calling component mounts and stops when it
/// unmounts. Results that arrive after unmount never touch the state.
pub fn use_landing_poll() -> Signal<PollState> {
    let mut state = use_signal(PollState::new);
    let liveness = use_hook(Liveness::new);

    let poll_liveness = liveness.clone();
    use_future(move || {
        let liveness = poll_liveness.clone();
        async move {
            let poller = Poller::new(ServerPollSource, POLL_INTERVAL);
            poller
                .run(&liveness, move |event| state.write().apply(event))
                .await;
        }
    });

    use_drop(move || liveness.deactivate());

    state
}
