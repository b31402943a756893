//! Display geometry and the draw-command contract the views render through.
//!
//! The panel is a 128x64 monochrome OLED addressed as a 16x8 text grid: every
//! row is one 8-pixel display page and every column an 8-pixel cell.

mod sink;

pub use sink::{DisplaySink, RenderFault};

/// Display width in pixels.
pub const DISPLAY_WIDTH_PX: u32 = 128;

/// Display height in pixels.
pub const DISPLAY_HEIGHT_PX: u32 = 64;

/// Width and height of one text cell in pixels.
pub const CELL_SIZE_PX: u32 = 8;

/// Text columns per row.
pub const GRID_COLUMNS: usize = (DISPLAY_WIDTH_PX / CELL_SIZE_PX) as usize;

/// Text rows on screen.
pub const GRID_ROWS: u8 = (DISPLAY_HEIGHT_PX / CELL_SIZE_PX) as u8;
