use super::constants::{
    HEADER_ROW, HUMIDITY_HEADER, TEMPERATURE_HEADER, VALUE_ROW, VISIBILITY_HEADER,
};
use super::{Transition, View, begin};
use crate::app_state::{Reading, TelemetryStore};
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

/// RIGHT returns to `back`; every other swipe only redraws.
pub(super) fn handle(gesture: Gesture, reading: Reading, back: View) -> Transition {
    match gesture {
        Gesture::Right => Transition::to(back),
        Gesture::Up | Gesture::Down | Gesture::Left => Transition::to(View::Detail(reading)),
    }
}

const fn header(reading: Reading) -> &'static str {
    match reading {
        Reading::Temperature => TEMPERATURE_HEADER,
        Reading::Humidity => HUMIDITY_HEADER,
        Reading::Visibility => VISIBILITY_HEADER,
    }
}

pub(super) fn draw<S: DisplaySink>(
    sink: &mut S,
    reading: Reading,
    store: &TelemetryStore,
    contrast: u8,
) -> Result<(), S::Error> {
    begin(sink, false, contrast)?;
    sink.draw_text(HEADER_ROW, header(reading), true)?;
    // Copied out first so the field lock is not held while drawing.
    let value = store.read(reading);
    sink.draw_text(VALUE_ROW, &value, false)
}
