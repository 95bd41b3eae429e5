//! Bounded first in, first out queue between parts of one task. Pushing never
//! blocks, a full queue hands the message back.
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;
use core::task::Waker;

use heapless::Deque;

struct QueueState<T, const N: usize> {
    messages: Deque<T, N>,
    waker_recv: Option<Waker>,
}

pub struct Queue<T, const N: usize> {
    state: RefCell<QueueState<T, N>>,
}

impl<T, const N: usize> Queue<T, N> {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(QueueState {
                messages: Deque::new(),
                waker_recv: None,
            }),
        }
    }

    /// Append a message and wake the receiver.
    pub fn push(&self, message: T) -> Result<(), T> {
        let mut state = self.state.borrow_mut();
        state.messages.push_back(message)?;

        if let Some(waker) = state.waker_recv.take() {
            waker.wake()
        }

        Ok(())
    }

    /// Wait for the oldest message and take it out of the queue.
    pub async fn receive(&self) -> T {
        poll_fn(|cx| {
            let mut state = self.state.borrow_mut();
            match state.messages.pop_front() {
                Some(message) => Poll::Ready(message),
                None => {
                    match &mut state.waker_recv {
                        Some(waker) => waker.clone_from(cx.waker()),
                        waker @ None => *waker = Some(cx.waker().clone()),
                    }

                    Poll::Pending
                }
            }
        })
        .await
    }

    pub fn len(&self) -> usize {
        self.state.borrow().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().messages.is_empty()
    }
}

impl<T, const N: usize> Default for Queue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pollster::FutureExt as _;

    use crate::sync::{join::join, yield_now::yield_now};

    use super::Queue;

    #[test]
    pub fn test_queue_keeps_order() {
        async {
            let queue: Queue<u8, 4> = Queue::new();
            queue.push(1).unwrap();
            queue.push(2).unwrap();
            queue.push(3).unwrap();
            assert_eq!(queue.len(), 3);

            assert_eq!(queue.receive().await, 1);
            assert_eq!(queue.receive().await, 2);
            assert_eq!(queue.receive().await, 3);
            assert!(queue.is_empty());
        }
        .block_on();
    }

    #[test]
    pub fn test_full_queue_returns_message() {
        let queue: Queue<u8, 2> = Queue::new();
        assert_eq!(queue.push(1), Ok(()));
        assert_eq!(queue.push(2), Ok(()));
        assert_eq!(queue.push(3), Err(3));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    pub fn test_queue_join_concurrency() {
        async {
            let queue: Queue<u8, 2> = Queue::new();

            join(
                async {
                    for i in 0..10 {
                        while queue.push(i).is_err() {
                            yield_now().await;
                        }
                    }
                },
                async {
                    for i in 0..10 {
                        assert_eq!(queue.receive().await, i);
                    }
                },
            )
            .await;
        }
        .block_on();
    }
}
