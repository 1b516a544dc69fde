use std::error::Error;

/// The error type used to propagate heterogeneous errors with `?`.
///
/// Errors that callers are expected to inspect have their own `thiserror`
/// enums, which convert into this type automatically.
pub type ToknError = Box<dyn Error>;
