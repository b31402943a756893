//! Gesture input contract.
//!
//! The panel has no buttons. A proximity/gesture sensor reports directional
//! swipes and the view engine waits on them through [`GestureSource`].
//! Decoding the sensor itself happens outside this crate. A driver feeds
//! decoded swipes into a [`GestureChannel`] or implements the trait directly.

mod channel;

use thiserror_no_std::Error;

pub use channel::{ChannelGestureSource, GestureChannel};

/// A directional swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Up,
    Down,
    Left,
    Right,
}

impl Gesture {
    pub const ALL: [Gesture; 4] = [Gesture::Up, Gesture::Down, Gesture::Left, Gesture::Right];

    /// Name logged for this gesture: the opposite direction of the variant.
    pub const fn mirrored_label(self) -> &'static str {
        match self {
            Gesture::Up => "DOWN",
            Gesture::Down => "UP",
            Gesture::Left => "RIGHT",
            Gesture::Right => "LEFT",
        }
    }
}

/// Unrecoverable gesture sensor conditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    #[error("sensor bus transaction failed")]
    Bus,
    #[error("sensor disconnected")]
    Disconnected,
    #[error("sensor reported an unknown condition")]
    Unknown,
}

/// Source of decoded gestures.
pub trait GestureSource {
    /// Wait for the next gesture. There is no timeout.
    fn read_gesture(&mut self) -> impl Future<Output = Result<Gesture, SensorFault>>;

    /// Hand the sensor back before the task exits on a fault.
    fn release(&mut self) {}
}

impl<T: GestureSource + ?Sized> GestureSource for &mut T {
    fn read_gesture(&mut self) -> impl Future<Output = Result<Gesture, SensorFault>> {
        (**self).read_gesture()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
