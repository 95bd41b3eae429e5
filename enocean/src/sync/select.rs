use core::future::{poll_fn, Future};
use core::pin::pin;
use core::task::Poll;

use super::Either;

/// Poll both futures until one of them finishes, and drop the other one.
/// When both are ready in the same poll, the first one wins.
pub async fn select<F1: Future, F2: Future>(f1: F1, f2: F2) -> Either<F1::Output, F2::Output> {
    let mut f1 = pin!(f1);
    let mut f2 = pin!(f2);

    poll_fn(|cx| {
        if let Poll::Ready(res) = f1.as_mut().poll(cx) {
            return Poll::Ready(Either::First(res));
        }
        if let Poll::Ready(res) = f2.as_mut().poll(cx) {
            return Poll::Ready(Either::Second(res));
        }

        Poll::Pending
    })
    .await
}
