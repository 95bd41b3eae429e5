use core::future::{poll_fn, Future};
use core::pin::pin;
use core::task::Poll;

/// Poll both futures until both have finished.
pub async fn join<F1: Future, F2: Future>(f1: F1, f2: F2) -> (F1::Output, F2::Output) {
    let mut f1 = pin!(f1);
    let mut f2 = pin!(f2);
    let mut res1 = None;
    let mut res2 = None;

    poll_fn(|cx| {
        if res1.is_none() {
            if let Poll::Ready(res) = f1.as_mut().poll(cx) {
                res1 = Some(res);
            }
        }
        if res2.is_none() {
            if let Poll::Ready(res) = f2.as_mut().poll(cx) {
                res2 = Some(res);
            }
        }

        match (res1.take(), res2.take()) {
            (Some(res1), Some(res2)) => Poll::Ready((res1, res2)),
            (first, second) => {
                res1 = first;
                res2 = second;
                Poll::Pending
            }
        }
    })
    .await
}
