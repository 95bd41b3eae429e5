use core::fmt::Debug;
use core::future::Future;

/// The serial link to the transceiver module.
///
/// One call to [`Transport::read`] delivers one ESP3 packet. Framing the
/// byte stream, for example with an inter byte timeout, is up to the
/// implementation.
pub trait Transport {
    type Error: Debug;

    /// Write a complete packet.
    fn write(&self, bytes: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;

    /// Wait for the next chunk of bytes and copy it into `buffer`. Returns the
    /// number of bytes written, at most `buffer.len()`.
    fn read(&self, buffer: &mut [u8]) -> impl Future<Output = Result<usize, Self::Error>>;
}

#[cfg(test)]
pub mod tests {
    use core::cell::RefCell;
    use core::future::poll_fn;
    use core::task::{Poll, Waker};
    use std::boxed::Box;
    use std::collections::VecDeque;
    use std::vec::Vec;

    use super::Transport;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum TestTransportEvent {
        Write(Vec<u8>),
        Read(Vec<u8>),
    }

    type Responder = Box<dyn FnMut(&[u8]) -> Option<Vec<u8>>>;

    /// A scripted module: inbound chunks are queued by the test, and an
    /// optional responder answers every write.
    #[derive(Default)]
    pub struct TestTransport {
        inbound: RefCell<VecDeque<Vec<u8>>>,
        waker: RefCell<Option<Waker>>,
        events: RefCell<Vec<TestTransportEvent>>,
        responder: RefCell<Option<Responder>>,
        closed: RefCell<bool>,
    }

    impl TestTransport {
        /// Answer every write with the chunk returned by `responder`.
        pub fn respond_with(&self, responder: impl FnMut(&[u8]) -> Option<Vec<u8>> + 'static) {
            *self.responder.borrow_mut() = Some(Box::new(responder));
        }

        /// Queue a chunk for the gateway to read.
        pub fn push(&self, chunk: &[u8]) {
            self.inbound.borrow_mut().push_back(chunk.to_vec());
            if let Some(waker) = self.waker.borrow_mut().take() {
                waker.wake();
            }
        }

        /// Make the next read fail.
        pub fn close(&self) {
            *self.closed.borrow_mut() = true;
            if let Some(waker) = self.waker.borrow_mut().take() {
                waker.wake();
            }
        }

        pub fn events(&self) -> Vec<TestTransportEvent> {
            self.events.borrow().clone()
        }

        pub fn writes(&self) -> Vec<Vec<u8>> {
            self.events
                .borrow()
                .iter()
                .filter_map(|event| match event {
                    TestTransportEvent::Write(bytes) => Some(bytes.clone()),
                    TestTransportEvent::Read(_) => None,
                })
                .collect()
        }

        pub fn pending(&self) -> usize {
            self.inbound.borrow().len()
        }
    }

    impl Transport for TestTransport {
        type Error = ();

        async fn write(&self, bytes: &[u8]) -> Result<(), ()> {
            self.events
                .borrow_mut()
                .push(TestTransportEvent::Write(bytes.to_vec()));

            let reply = match self.responder.borrow_mut().as_mut() {
                Some(responder) => responder(bytes),
                None => None,
            };
            if let Some(reply) = reply {
                self.push(&reply);
            }

            Ok(())
        }

        async fn read(&self, buffer: &mut [u8]) -> Result<usize, ()> {
            poll_fn(|cx| {
                if *self.closed.borrow() {
                    return Poll::Ready(Err(()));
                }

                match self.inbound.borrow_mut().pop_front() {
                    Some(chunk) => {
                        let len = chunk.len().min(buffer.len());
                        buffer[..len].copy_from_slice(&chunk[..len]);
                        self.events
                            .borrow_mut()
                            .push(TestTransportEvent::Read(chunk));
                        Poll::Ready(Ok(len))
                    }
                    None => {
                        *self.waker.borrow_mut() = Some(cx.waker().clone());
                        Poll::Pending
                    }
                }
            })
            .await
        }
    }
}
