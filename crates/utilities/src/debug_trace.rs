/// Forwards to `log::trace!` only when the `tokn_debug-trace` feature is
/// enabled in the crate that uses the macro.
///
/// Intended for the inner loops of the automaton constructions, where even a
/// disabled `trace!` has a measurable cost.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tokn_debug-trace")]
        ::log::trace!($($arg)*);
    };
}
