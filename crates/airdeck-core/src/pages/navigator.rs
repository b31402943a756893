//! Navigation state machine.

use log::debug;

use super::{Action, View, city_select, confirm, detail, menu, welcome};
use crate::app_state::TelemetryStore;
use crate::config::{CityCatalog, MenuCatalog};
use crate::gesture::Gesture;
use crate::ui::DisplaySink;

/// Owns the current view and applies gestures to it.
///
/// The hierarchy is flat: every child of the menu returns to the menu entry
/// it was opened from, so only that one cursor is remembered.
pub struct Navigator {
    view: View,
    menu_cursor: usize,
    menu: MenuCatalog,
    cities: CityCatalog,
}

impl Navigator {
    /// Start on the welcome screen.
    pub fn new(menu: MenuCatalog, cities: CityCatalog) -> Self {
        Self {
            view: View::Welcome,
            menu_cursor: 0,
            menu,
            cities,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    fn back_to_menu(&self) -> View {
        View::Menu(self.menu_cursor)
    }

    /// Apply one gesture. Returns the action the transition requests, if any.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> Option<Action> {
        let transition = match self.view {
            View::Welcome => welcome::handle(gesture),
            View::Menu(selected) => menu::handle(gesture, selected, &self.menu),
            View::Detail(reading) => detail::handle(gesture, reading, self.back_to_menu()),
            View::CitySelect(cursor) => {
                city_select::handle(gesture, cursor, &self.cities, self.back_to_menu())
            }
            View::Confirm { choice, proposed } => {
                confirm::handle(gesture, choice, proposed, self.back_to_menu())
            }
        };

        if let View::Menu(selected) = transition.next {
            self.menu_cursor = selected;
        }
        debug!(
            " {:?} --{:?}--> {:?} (action: {:?})",
            self.view, gesture, transition.next, transition.action
        );
        self.view = transition.next;
        transition.action
    }

    /// Full redraw of the current view.
    pub fn draw<S: DisplaySink>(
        &self,
        sink: &mut S,
        store: &TelemetryStore,
        contrast: u8,
    ) -> Result<(), S::Error> {
        let city = store.selected_city_name();
        match self.view {
            View::Welcome => welcome::draw(sink, contrast),
            View::Menu(selected) => menu::draw(sink, selected, &self.menu, city, contrast),
            View::Detail(reading) => detail::draw(sink, reading, store, contrast),
            View::CitySelect(cursor) => {
                city_select::draw(sink, cursor, &self.cities, city, contrast)
            }
            View::Confirm { choice, .. } => confirm::draw(sink, choice, city, contrast),
        }
    }
}
