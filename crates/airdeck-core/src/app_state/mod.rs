//! Application-wide state and error types for airdeck

mod telemetry;

use core::fmt::{Debug, Write};

use thiserror_no_std::Error;

use crate::gesture::SensorFault;

pub use telemetry::{
    CityOutOfRange, FieldText, Reading, TelemetrySnapshot, TelemetryStore, clip_to_capacity,
};

/// Faults that end a task. The host restarts the device after either one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Gesture sensor fault: {0}")]
    Sensor(SensorFault),
    #[error("Transport setup failed: {0}")]
    TransportInit(heapless::String<64>),
}

impl From<SensorFault> for AppError {
    fn from(fault: SensorFault) -> Self {
        AppError::Sensor(fault)
    }
}

impl AppError {
    /// Build a [`AppError::TransportInit`] from any debuggable transport error.
    ///
    /// The detail text is cut off when it does not fit.
    pub fn transport_init<E: Debug>(err: &E) -> Self {
        let mut details = heapless::String::new();
        write!(details, "{:?}", err).ok();
        AppError::TransportInit(details)
    }
}
