//! View-lifetime task scopes.
//!
//! A [`ViewScope`] stands for a screen that is on display. Work started
//! through it resolves to `None` once the scope is closed, so a response that
//! arrives after the view went away is discarded instead of applied.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ViewScope {
    cancel: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token for work spawned elsewhere; cancelled when the scope closes.
    pub fn token(&self) -> CancellationToken {
        self.cancel.child_token()
    }

    /// A handle that closes this scope when cancelled, for a signal
    /// listener or another task that outlives the borrow.
    pub fn closer(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Runs `fut` until it completes or the scope closes.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        run_until_cancelled(&self.cancel, fut).await
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub async fn run_until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Option<F::Output> {
    if cancel.is_cancelled() {
        return None;
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => None,
        output = fut => Some(output),
    }
}
