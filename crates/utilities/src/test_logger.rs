/// Initializes the global logger for tests, the output is captured by the
/// test harness.
///
/// Returns false when a logger was already installed, which happens for every
/// test after the first one in the same binary.
pub fn test_logger() -> bool {
    env_logger::builder().is_test(true).try_init().is_ok()
}
