//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use airdeck_core::gesture::{Gesture, GestureSource, SensorFault};
use airdeck_core::ui::{DisplaySink, GRID_COLUMNS, GRID_ROWS};
use embedded_hal_async::delay::DelayNs;

/// One drawn row as the panel would show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub inverted: bool,
}

pub type Screen = [Option<Line>; GRID_ROWS as usize];

/// A finished render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub cleared_inverted: bool,
    pub contrast: Option<u8>,
    pub rows: Screen,
}

impl Frame {
    pub fn text(&self, row: usize) -> Option<&str> {
        self.rows[row].as_ref().map(|line| line.text.as_str())
    }

    pub fn is_inverted(&self, row: usize) -> bool {
        self.rows[row].as_ref().is_some_and(|line| line.inverted)
    }
}

/// Sink that records each flushed frame.
#[derive(Debug, Default)]
pub struct RecordingSink {
    current: Option<Frame>,
    pub frames: Vec<Frame>,
}

impl RecordingSink {
    pub fn last(&self) -> &Frame {
        self.frames.last().expect("nothing rendered")
    }
}

impl DisplaySink for RecordingSink {
    type Error = Infallible;

    fn clear(&mut self, invert: bool) -> Result<(), Self::Error> {
        self.current = Some(Frame {
            cleared_inverted: invert,
            contrast: None,
            rows: Default::default(),
        });
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        if let Some(frame) = self.current.as_mut() {
            frame.contrast = Some(level);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str, invert: bool) -> Result<(), Self::Error> {
        let frame = self.current.as_mut().expect("draw before clear");
        if let Some(slot) = frame.rows.get_mut(row as usize) {
            *slot = Some(Line {
                text: text.chars().take(GRID_COLUMNS).collect(),
                inverted: invert,
            });
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if let Some(frame) = self.current.take() {
            self.frames.push(frame);
        }
        Ok(())
    }
}

/// Replays gestures, then reports a disconnected sensor.
pub struct ScriptedGestures {
    pending: VecDeque<Gesture>,
    pub released: bool,
}

impl ScriptedGestures {
    pub fn new(gestures: &[Gesture]) -> Self {
        Self {
            pending: gestures.iter().copied().collect(),
            released: false,
        }
    }
}

impl GestureSource for ScriptedGestures {
    async fn read_gesture(&mut self) -> Result<Gesture, SensorFault> {
        self.pending.pop_front().ok_or(SensorFault::Disconnected)
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Delay that returns at once.
pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}
