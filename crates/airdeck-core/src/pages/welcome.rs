use super::constants::{WELCOME_HINT, WELCOME_HINT_ROW, WELCOME_TITLE, WELCOME_TITLE_ROW};
use super::{Transition, View, begin};
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

/// Any swipe opens the menu on its first entry.
pub(super) fn handle(_gesture: Gesture) -> Transition {
    Transition::to(View::Menu(0))
}

pub(super) fn draw<S: DisplaySink>(sink: &mut S, contrast: u8) -> Result<(), S::Error> {
    begin(sink, true, contrast)?;
    sink.draw_text(WELCOME_TITLE_ROW, WELCOME_TITLE, true)?;
    sink.draw_text(WELCOME_HINT_ROW, WELCOME_HINT, true)
}
