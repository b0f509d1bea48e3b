use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::management::Session;

/// Drives [`Session::poll_once`] on a fixed schedule.
///
/// Ticks are spaced from the start of the previous tick. A cycle that runs
/// longer than the interval pushes the next tick back instead of queueing a
/// burst, and only one cycle is ever in flight.
pub struct Poller;

impl Poller {
    /// Starts polling in a background task. The first cycle runs immediately.
    #[must_use]
    pub fn start(session: Arc<Session>, interval: Duration) -> PollerHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let status = session.status().clone();
        let poll_loop = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            session.status().write().await.polling = true;
            info!("Polling every {}s", interval.as_secs());

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        // failures are logged and recorded by the session
                        let _ = session.poll_once().await;
                    }
                }
            }

            session.status().write().await.polling = false;
            info!("Polling stopped");
        });

        let task = tokio::spawn(async move {
            if let Err(e) = poll_loop.await {
                if e.is_panic() {
                    error!("Poll loop crashed: {}", e);
                    let mut board = status.write().await;
                    board.polling = false;
                    board.last_error = Some(format!("poll loop crashed: {e}"));
                }
            }
        });

        PollerHandle { cancel, task }
    }
}

/// Handle to a running [`Poller`].
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Requests a stop and waits for the loop to exit. A cycle already in
    /// progress is allowed to finish. A crashed loop has already been
    /// recorded on the status board.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
