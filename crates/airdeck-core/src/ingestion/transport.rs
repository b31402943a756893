use core::fmt::Debug;

use crate::config::PAYLOAD_CAPACITY;

/// One inbound payload as delivered by the transport.
pub type Frame = heapless::Vec<u8, PAYLOAD_CAPACITY>;

/// Publish/subscribe link carrying the telemetry topic.
///
/// Implementations own connection details (broker, topic, credentials) and
/// any reconnection. `receive` must be cancel-safe: the ingestion task drops
/// a pending receive whenever a status message is due.
pub trait TelemetryTransport {
    type Error: Debug;

    /// Establish the session and subscribe to the topic.
    fn connect(&mut self) -> impl Future<Output = Result<(), Self::Error>>;

    /// Wait for the next inbound payload.
    fn receive(&mut self) -> impl Future<Output = Result<Frame, Self::Error>>;

    /// Publish a payload on the topic.
    fn publish(&mut self, payload: &str) -> impl Future<Output = Result<(), Self::Error>>;
}
