//! A handful of executor independent synchronization primitives.
//!
//! They synchronize different parts of one task, running concurrently through
//! [`select`](select::select) and [`join`](join::join). None of them is `Sync`.
pub mod channel;
pub mod join;
pub mod mutex;
pub mod queue;
pub mod select;
pub mod yield_now;


/// Type representing 2 possible outcomes/states
#[derive(Debug, PartialEq)]
pub enum Either<T, S> {
    First(T),
    Second(S),
}

impl<T, S> Either<T, S> {
    pub fn is_first(&self) -> bool {
        matches!(self, Either::First(_))
    }

    pub fn is_second(&self) -> bool {
        matches!(self, Either::Second(_))
    }
}
