//! Views of the panel and the gesture-driven navigation between them.
//!
//! Each view module pairs a `handle` function (gesture to [`Transition`])
//! with a `draw` function (full redraw onto a [`DisplaySink`]).
//! [`Navigator`] owns the current [`View`] and dispatches to the right pair
//! with a `match`.

mod city_select;
mod confirm;
mod constants;
mod detail;
mod list;
mod menu;
mod navigator;
mod view;
mod welcome;

use crate::app_state::clip_to_capacity;
use crate::ui::DisplaySink;

use constants::{AREA_PREFIX, FOOTER_CAPACITY, FOOTER_ROW};

pub use navigator::Navigator;
pub use view::{Action, ConfirmChoice, View, ViewKind};

use view::Transition;

/// Start a full redraw: blank the screen and restore contrast.
fn begin<S: DisplaySink>(sink: &mut S, invert: bool, contrast: u8) -> Result<(), S::Error> {
    sink.clear(invert)?;
    sink.set_contrast(contrast)
}

/// `Area: <city>` status line at the bottom of list views.
fn draw_area_footer<S: DisplaySink>(sink: &mut S, city: &str) -> Result<(), S::Error> {
    let mut line = heapless::String::<FOOTER_CAPACITY>::new();
    line.push_str(AREA_PREFIX).ok();
    line.push_str(clip_to_capacity(city, FOOTER_CAPACITY - AREA_PREFIX.len()))
        .ok();
    sink.draw_text(FOOTER_ROW, &line, false)
}
