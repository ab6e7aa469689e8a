//! Process-wide logging setup for storefront binaries and test harnesses.
//!
//! The domain crates only emit `tracing` events; whoever hosts them calls
//! [`init`] once at start-up.

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber construction (filter, JSON layer).
pub mod tracing;
