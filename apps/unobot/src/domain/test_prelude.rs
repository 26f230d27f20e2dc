//! Shared proptest configuration for domain property tests.

use proptest::test_runner::Config;

/// Case count comes from `PROPTEST_CASES` (default 8) so CI can turn it up.
pub fn proptest_config() -> Config {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8);
    Config {
        cases,
        failure_persistence: None,
        ..Config::default()
    }
}
