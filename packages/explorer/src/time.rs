//! Platform timers.
//!
//! The browser has no tokio reactor, so timers come from `gloo-timers` on
//! wasm32 and from tokio everywhere else.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Run `future` to completion unless `duration` elapses first (`None`).
pub async fn with_timeout<F: Future>(duration: Duration, future: F) -> Option<F::Output> {
    let future = pin!(future);
    let timer = pin!(sleep(duration));
    match select(future, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
