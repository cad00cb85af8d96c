use futures::{
    future::{select, Either, LocalBoxFuture},
    FutureExt,
};
use std::{future::Future, pin::pin, time::Duration};

pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// `setTimeout`-backed sleeps.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}

/// Runs `future` until it completes or `duration` elapses, whichever comes first.
/// On timeout the future is dropped and `None` is returned.
pub async fn with_timeout<F: Future>(
    timer: &impl Timer,
    duration: Duration,
    future: F,
) -> Option<F::Output> {
    let future = pin!(future);

    match select(future, timer.sleep(duration)).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(((), _)) => None,
    }
}
