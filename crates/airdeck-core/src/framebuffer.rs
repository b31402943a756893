//! Monochrome framebuffer in SSD1306 page layout.
//!
//! Views draw into this RAM buffer through [`DisplaySink`]. The buffer keeps
//! the panel's native memory layout (8 pages of 128 column bytes, bit 0 at the
//! top of the page) and remembers which pages changed, so a driver only sends
//! those pages to the controller.

use core::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::ui::{
    CELL_SIZE_PX, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, DisplaySink, GRID_COLUMNS, GRID_ROWS,
};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Height of one controller page in pixels.
pub const PAGE_HEIGHT_PX: usize = 8;

/// Number of controller pages.
pub const PAGE_COUNT: usize = HEIGHT / PAGE_HEIGHT_PX;

/// Left padding of a 5-pixel glyph inside its 8-pixel cell.
const GLYPH_OFFSET_PX: i32 = 1;

/// One controller page: a byte per column.
pub type Page = [u8; WIDTH];

/// 1-bpp framebuffer implementing `DrawTarget<Color = BinaryColor>`.
pub struct FrameBuffer {
    pages: [Page; PAGE_COUNT],
    /// Bit `n` set when page `n` changed since the last flush.
    dirty: u8,
    contrast: u8,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A dark framebuffer at full contrast.
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGE_COUNT],
            dirty: 0,
            contrast: 0xFF,
        }
    }

    /// Set or clear a pixel, marking its page dirty only if it changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let page = y / PAGE_HEIGHT_PX;
        let mask = 1u8 << (y % PAGE_HEIGHT_PX);
        let byte = &mut self.pages[page][x];
        let updated = if on { *byte | mask } else { *byte & !mask };
        if updated != *byte {
            *byte = updated;
            self.dirty |= 1 << page;
        }
    }

    /// Whether the pixel at (`x`, `y`) is lit. Out-of-range reads are dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / PAGE_HEIGHT_PX][x] & (1 << (y % PAGE_HEIGHT_PX)) != 0
    }

    /// Raw column bytes of one page.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Contrast level last requested by a view.
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Hand every changed page to `write`, then reset the dirty state.
    ///
    /// Pages stay dirty when `write` fails so the next flush retries them.
    pub fn flush_pages<E, F>(&mut self, mut write: F) -> Result<(), E>
    where
        F: FnMut(usize, &Page) -> Result<(), E>,
    {
        if self.dirty == 0 {
            return Ok(());
        }
        debug!(" Flushing dirty pages {:08b}", self.dirty);

        for (index, page) in self.pages.iter().enumerate() {
            if self.dirty & (1 << index) != 0 {
                write(index, page)?;
                self.dirty &= !(1 << index);
            }
        }
        Ok(())
    }

    fn color_to_bit(color: BinaryColor) -> bool {
        color.is_on()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (x, y) = (coord.x, coord.y);
            if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
                self.set_pixel(x as usize, y as usize, Self::color_to_bit(color));
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let on = Self::color_to_bit(color);
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                self.set_pixel(x as usize, y as usize, on);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if Self::color_to_bit(color) { 0xFF } else { 0x00 };
        for (index, page) in self.pages.iter_mut().enumerate() {
            if page.iter().any(|byte| *byte != fill) {
                page.fill(fill);
                self.dirty |= 1 << index;
            }
        }
        Ok(())
    }
}

impl DisplaySink for FrameBuffer {
    type Error = Infallible;

    fn clear(&mut self, invert: bool) -> Result<(), Self::Error> {
        DrawTarget::clear(self, BinaryColor::from(invert))
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        self.contrast = level;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str, invert: bool) -> Result<(), Self::Error> {
        if row >= GRID_ROWS {
            debug!(" Ignoring text for row {} outside the grid", row);
            return Ok(());
        }

        let (foreground, background) = if invert {
            (BinaryColor::Off, BinaryColor::On)
        } else {
            (BinaryColor::On, BinaryColor::Off)
        };
        let style = MonoTextStyle::new(&FONT_5X8, foreground);
        let top = row as i32 * CELL_SIZE_PX as i32;

        let mut glyph = [0u8; 4];
        for (column, ch) in text.chars().take(GRID_COLUMNS).enumerate() {
            let left = column as i32 * CELL_SIZE_PX as i32;
            let cell = Rectangle::new(Point::new(left, top), Size::new(CELL_SIZE_PX, CELL_SIZE_PX));
            self.fill_solid(&cell, background)?;

            let position = Point::new(left + GLYPH_OFFSET_PX, top);
            Text::with_baseline(ch.encode_utf8(&mut glyph), position, style, Baseline::Top)
                .draw(self)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_in_cell(fb: &FrameBuffer, row: usize, column: usize) -> usize {
        let mut lit = 0;
        for y in row * 8..row * 8 + 8 {
            for x in column * 8..column * 8 + 8 {
                if fb.pixel(x, y) {
                    lit += 1;
                }
            }
        }
        lit
    }

    #[test]
    fn test_new_buffer_is_dark_and_clean() {
        let fb = FrameBuffer::new();
        assert!(!fb.is_dirty());
        assert!(!fb.pixel(0, 0));
        assert_eq!(fb.contrast(), 0xFF);
    }

    #[test]
    fn test_inverted_clear_lights_every_pixel() {
        let mut fb = FrameBuffer::new();
        DisplaySink::clear(&mut fb, true).unwrap();
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(127, 63));
        assert!(fb.page(7).unwrap().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_text_marks_only_its_page_dirty() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(4, "21.5", false).unwrap();

        let mut flushed = Vec::new();
        fb.flush_pages(|index, _| {
            flushed.push(index);
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(flushed, [4]);
        assert!(!fb.is_dirty());
        assert!(lit_in_cell(&fb, 4, 0) > 0);
        assert_eq!(lit_in_cell(&fb, 4, 4), 0);
    }

    #[test]
    fn test_inverted_text_lights_cell_background() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(1, "Yes", true).unwrap();
        // Lit background with a dark glyph: most of the cell is on.
        assert!(lit_in_cell(&fb, 1, 0) > 32);
        // Column past the text stays dark.
        assert_eq!(lit_in_cell(&fb, 1, 3), 0);
    }

    #[test]
    fn test_text_clipped_to_grid() {
        let mut fb = FrameBuffer::new();
        DisplaySink::clear(&mut fb, false).unwrap();
        fb.draw_text(0, "ABCDEFGHIJKLMNOPQRSTUVWXYZ", true).unwrap();
        assert!(lit_in_cell(&fb, 0, 15) > 0);
        assert!(fb.pixel(127, 0));
        // Row outside the grid is ignored.
        fb.draw_text(8, "lost", false).unwrap();
    }

    #[test]
    fn test_failed_flush_keeps_pages_dirty() {
        let mut fb = FrameBuffer::new();
        fb.draw_text(2, "x", false).unwrap();
        assert_eq!(fb.flush_pages(|_, _| Err("spi")), Err("spi"));
        assert!(fb.is_dirty());
    }
}
