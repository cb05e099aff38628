#![cfg(test)]
crate::reexport!(context);
crate::reexport!(fixtures);
pub use rstest::*;

/// Install the test tracing subscriber once per test binary. Filter with
/// `RUST_LOG`, e.g. `RUST_LOG=qsense=trace`.
pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
