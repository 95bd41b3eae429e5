//! Logger backend agnostic logging.
//!
//! With the `defmt` feature the messages go to `defmt`, with the `log`
//! feature to `log`. Without either, the arguments are evaluated and dropped.

macro_rules! log_backend {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "log", feature = "defmt")))]
        let _ = ($(&$x),*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => { log_backend!(error, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { log_backend!(warn, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { log_backend!(info, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { log_backend!(debug, $($arg)*) };
}

macro_rules! trace {
    ($($arg:tt)*) => { log_backend!(trace, $($arg)*) };
}
