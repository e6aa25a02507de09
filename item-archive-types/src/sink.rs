//! Side channel for faults that are reported but never surfaced as errors.

use std::error::Error;
use tracing::warn;

/// Receives faults the caller chose to degrade instead of propagate.
///
/// Implemented for any `Fn(&dyn Error)` closure, so tests and UIs can plug
/// in their own reporting.
pub trait NotificationSink {
    fn notify(&self, error: &(dyn Error + 'static));
}

impl<F> NotificationSink for F
where
    F: Fn(&(dyn Error + 'static)),
{
    fn notify(&self, error: &(dyn Error + 'static)) {
        self(error);
    }
}

/// Reports faults as `warn` level tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, error: &(dyn Error + 'static)) {
        warn!(error = %error, "degraded after recoverable fault");
    }
}
