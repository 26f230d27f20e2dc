//! Shared helpers for unobot integration tests.
//!
//! Integration test binaries cannot reach the library's `#[cfg(test)]`
//! modules, so the logging bootstrap they need lives here.

pub mod logging;
