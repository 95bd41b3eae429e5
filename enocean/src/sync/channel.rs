//! Single slot channel, used as a signaling mechanism between parts of one
//! task. Sending never blocks and overwrites a message that was not yet
//! received.
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;
use core::task::Waker;

struct ChannelState<T> {
    message: Option<T>,
    waker_recv: Option<Waker>,
}

pub struct Channel<T> {
    state: RefCell<ChannelState<T>>,
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(ChannelState {
                message: None,
                waker_recv: None,
            }),
        }
    }

    /// Store a message and wake the receiver. Returns `true` when a message
    /// that was not yet received got overwritten.
    pub fn send(&self, message: T) -> bool {
        let mut state = self.state.borrow_mut();
        let did_replace = state.message.replace(message).is_some();

        if let Some(waker) = state.waker_recv.take() {
            waker.wake()
        }

        did_replace
    }

    /// Wait for a message and take it out of the channel.
    pub async fn receive(&self) -> T {
        poll_fn(|cx| {
            let mut state = self.state.borrow_mut();
            match state.message.take() {
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

    /// Take the message, if any, without waiting.
    pub fn try_receive(&self) -> Option<T> {
        self.state.borrow_mut().message.take()
    }

    /// Drop a message that was not yet received.
    pub fn clear(&self) {
        self.state.borrow_mut().message = None;
    }

    /// Check if there is an item in the channel
    pub fn has_item(&self) -> bool {
        self.state.borrow().message.is_some()
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}
