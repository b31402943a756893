//! Layout and copy for the 16x8 text grid

// ============================================================================
// Rows
// ============================================================================

/// Title row of every view except Welcome.
pub(super) const HEADER_ROW: u8 = 0;

/// First row of a scrolling list.
pub(super) const LIST_FIRST_ROW: u8 = 1;

/// Rows available to a list (1 through 6).
pub(super) const LIST_ROWS: usize = 6;

/// Row holding the `Area: <city>` status line.
pub(super) const FOOTER_ROW: u8 = 7;

/// Row showing a telemetry value on a detail view.
pub(super) const VALUE_ROW: u8 = 4;

pub(super) const WELCOME_TITLE_ROW: u8 = 2;
pub(super) const WELCOME_HINT_ROW: u8 = 4;

pub(super) const CONFIRM_PROMPT_ROW: u8 = 1;

/// Row of the first confirm option. `No` sits on the row below.
pub(super) const CONFIRM_OPTIONS_ROW: u8 = 3;

// ============================================================================
// Copy
// ============================================================================

pub(super) const WELCOME_TITLE: &str = "    Welcome";
pub(super) const WELCOME_HINT: &str = "Swipe to launch!";
pub(super) const MENU_HEADER: &str = "----- Menu -----";
pub(super) const AREAS_HEADER: &str = "---- <Areas ----";
pub(super) const TEMPERATURE_HEADER: &str = "- <Temperature -";
pub(super) const HUMIDITY_HEADER: &str = "-- < Humidity --";
pub(super) const VISIBILITY_HEADER: &str = "- < Visibility -";
pub(super) const CONFIRM_PROMPT: &str = "Are you sure?";
pub(super) const AREA_PREFIX: &str = "Area: ";

/// Capacity of the footer line before the sink clips it.
pub(super) const FOOTER_CAPACITY: usize = 64;
