//! One-slot hand-off between a sensor driver and the view engine.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::debug;

use super::{Gesture, GestureSource, SensorFault};

/// Holds at most one pending gesture. Gestures offered while the slot is
/// taken are dropped.
pub struct GestureChannel {
    slot: Channel<CriticalSectionRawMutex, Result<Gesture, SensorFault>, 1>,
}

impl Default for GestureChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureChannel {
    pub const fn new() -> Self {
        Self {
            slot: Channel::new(),
        }
    }

    /// Offer a decoded gesture without blocking.
    ///
    /// Returns `false` when a gesture is already pending and this one was
    /// dropped.
    pub fn offer(&self, gesture: Gesture) -> bool {
        match self.slot.try_send(Ok(gesture)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!(" Gesture {:?} dropped, previous one not consumed", gesture);
                false
            }
        }
    }

    /// Report a sensor fault. Replaces any pending gesture.
    pub fn fail(&self, fault: SensorFault) {
        loop {
            self.slot.clear();
            if self.slot.try_send(Err(fault)).is_ok() {
                return;
            }
        }
    }

    /// Whether a gesture or fault is waiting to be read.
    pub fn is_pending(&self) -> bool {
        self.slot.is_full()
    }

    /// Reader side for the view engine.
    pub fn source(&self) -> ChannelGestureSource<'_> {
        ChannelGestureSource { channel: self }
    }
}

/// [`GestureSource`] reading from a [`GestureChannel`].
pub struct ChannelGestureSource<'a> {
    channel: &'a GestureChannel,
}

impl GestureSource for ChannelGestureSource<'_> {
    async fn read_gesture(&mut self) -> Result<Gesture, SensorFault> {
        self.channel.slot.receive().await
    }

    fn release(&mut self) {
        self.channel.slot.clear();
    }
}
