use super::constants::{AREAS_HEADER, HEADER_ROW};
use super::{ConfirmChoice, Transition, View, begin, draw_area_footer, list};
use crate::config::CityCatalog;
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

pub(super) fn handle(gesture: Gesture, cursor: usize, cities: &CityCatalog, back: View) -> Transition {
    match gesture {
        Gesture::Up => Transition::to(View::CitySelect(list::next(cursor, cities.len()))),
        Gesture::Down => Transition::to(View::CitySelect(list::prev(cursor, cities.len()))),
        Gesture::Left => Transition::to(View::Confirm {
            choice: ConfirmChoice::Yes,
            proposed: cursor,
        }),
        Gesture::Right => Transition::to(back),
    }
}

pub(super) fn draw<S: DisplaySink>(
    sink: &mut S,
    cursor: usize,
    cities: &CityCatalog,
    city: &str,
    contrast: u8,
) -> Result<(), S::Error> {
    begin(sink, false, contrast)?;
    sink.draw_text(HEADER_ROW, AREAS_HEADER, false)?;
    list::draw(sink, cities.len(), cursor, |index| {
        cities.get(index).unwrap_or_default()
    })?;
    draw_area_footer(sink, city)
}
