//! Log output for tests.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is not set.
pub const DEFAULT_TEST_LOG_LEVEL: &str = "warn";

/// Routes `tracing` output through the test harness's captured writer.
///
/// The filter comes from `RUST_LOG`, falling back to
/// [`DEFAULT_TEST_LOG_LEVEL`]. Only the first call installs a subscriber;
/// later calls do nothing.
///
/// # Example
///
/// ```
/// daedalus_test::init_test_logging();
/// tracing::warn!(operation = "checkout", "visible with --nocapture");
/// ```
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_LOG_LEVEL));

    // Another test may already have installed a subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}
