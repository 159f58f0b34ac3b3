//! Telemetry sink port.

use crate::events::TelemetryEvent;

/// Trait for emitting telemetry events.
///
/// Emission is fire-and-forget: implementations buffer or forward
/// asynchronously and must not block, and nothing in resolution ever awaits
/// an emission.
pub trait TelemetryPort: Send + Sync {
    /// Emit a telemetry event.
    fn emit(&self, event: TelemetryEvent);

    /// Clone this sink into a boxed trait object.
    ///
    /// Enables cloning of `Arc<dyn TelemetryPort>` holders without requiring
    /// the underlying type to implement `Clone`.
    fn clone_box(&self) -> Box<dyn TelemetryPort>;
}

/// A telemetry sink that discards all events.
///
/// Suitable for tests and for hosts that do not collect telemetry.
#[derive(Debug, Clone, Default)]
pub struct NoopTelemetry;

impl NoopTelemetry {
    /// Create a new no-op sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TelemetryPort for NoopTelemetry {
    fn emit(&self, _event: TelemetryEvent) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn TelemetryPort> {
        Box::new(self.clone())
    }
}
