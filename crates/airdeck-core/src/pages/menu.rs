use log::warn;

use super::constants::{HEADER_ROW, MENU_HEADER};
use super::{Transition, View, ViewKind, begin, draw_area_footer, list};
use crate::app_state::Reading;
use crate::config::MenuCatalog;
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

pub(super) fn handle(gesture: Gesture, selected: usize, menu: &MenuCatalog) -> Transition {
    let next = match gesture {
        Gesture::Up => View::Menu(list::next(selected, menu.len())),
        Gesture::Down => View::Menu(list::prev(selected, menu.len())),
        Gesture::Left => open(selected, menu),
        Gesture::Right => View::Menu(selected),
    };
    Transition::to(next)
}

/// Child view for the highlighted entry.
fn open(selected: usize, menu: &MenuCatalog) -> View {
    match menu.get(selected).map(|entry| entry.kind) {
        Some(ViewKind::Temperature) => View::Detail(Reading::Temperature),
        Some(ViewKind::Humidity) => View::Detail(Reading::Humidity),
        Some(ViewKind::Visibility) => View::Detail(Reading::Visibility),
        Some(ViewKind::SelectArea) => View::CitySelect(0),
        other => {
            warn!(" Menu entry {} cannot be opened: {:?}", selected, other);
            View::Menu(selected)
        }
    }
}

pub(super) fn draw<S: DisplaySink>(
    sink: &mut S,
    selected: usize,
    menu: &MenuCatalog,
    city: &str,
    contrast: u8,
) -> Result<(), S::Error> {
    begin(sink, false, contrast)?;
    sink.draw_text(HEADER_ROW, MENU_HEADER, false)?;
    list::draw(sink, menu.len(), selected, |index| {
        menu.get(index).map(|entry| entry.label).unwrap_or_default()
    })?;
    draw_area_footer(sink, city)
}
