//! OLED panel rendered to the terminal.
//!
//! Views draw into a [`FrameBuffer`]. On flush the changed frame is printed
//! with half-block characters, two pixel rows per text line.

use std::convert::Infallible;
use std::io::{self, Write};

use airdeck_core::framebuffer::FrameBuffer;
use airdeck_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, DisplaySink};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Clear screen and home the cursor.
const ANSI_RESET_SCREEN: &str = "\x1b[2J\x1b[H";

pub struct TerminalPanel<W: Write> {
    frame: FrameBuffer,
    out: W,
}

impl TerminalPanel<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPanel<W> {
    pub fn new(out: W) -> Self {
        Self {
            frame: FrameBuffer::new(),
            out,
        }
    }

    /// Text picture of the current frame.
    pub fn picture(&self) -> String {
        let mut picture = String::with_capacity((WIDTH * 3 + 4) * (HEIGHT / 2 + 2));
        let border: String = "─".repeat(WIDTH);

        picture.push('┌');
        picture.push_str(&border);
        picture.push_str("┐\n");
        for y in (0..HEIGHT).step_by(2) {
            picture.push('│');
            for x in 0..WIDTH {
                picture.push(match (self.frame.pixel(x, y), self.frame.pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            picture.push_str("│\n");
        }
        picture.push('└');
        picture.push_str(&border);
        picture.push_str("┘\n");
        picture.push_str(&format!(
            "contrast 0x{:02X}   w/s: up/down  a: enter  d: back  !: fault  q: quit\n",
            self.frame.contrast()
        ));
        picture
    }
}

impl<W: Write> DisplaySink for TerminalPanel<W> {
    type Error = io::Error;

    fn clear(&mut self, invert: bool) -> Result<(), Self::Error> {
        let Ok(()) = DisplaySink::clear(&mut self.frame, invert);
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        let Ok(()) = self.frame.set_contrast(level);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str, invert: bool) -> Result<(), Self::Error> {
        let Ok(()) = self.frame.draw_text(row, text, invert);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.frame.is_dirty() {
            return Ok(());
        }
        let picture = self.picture();
        self.out.write_all(ANSI_RESET_SCREEN.as_bytes())?;
        self.out.write_all(picture.as_bytes())?;
        self.out.flush()?;
        // The whole frame went out; nothing is left to send per page.
        let Ok(()) = self.frame.flush_pages(|_, _| Ok::<(), Infallible>(()));
        Ok(())
    }
}
