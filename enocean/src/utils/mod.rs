#[macro_use]
pub(crate) mod log;
