use core::fmt::Debug;

use thiserror_no_std::Error;

/// Text-grid display driven by the view engine.
///
/// Rows outside the grid are ignored and text past the last column is
/// clipped by the implementation.
pub trait DisplaySink {
    type Error: Debug;

    /// Fill the whole screen, lit when `invert` is set.
    fn clear(&mut self, invert: bool) -> Result<(), Self::Error>;

    fn set_contrast(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Draw `text` from the first column of `row`. Inverted text is dark on
    /// lit cells.
    fn draw_text(&mut self, row: u8, text: &str, invert: bool) -> Result<(), Self::Error>;

    /// Push the finished frame out. Called once per render pass.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    type Error = T::Error;

    fn clear(&mut self, invert: bool) -> Result<(), Self::Error> {
        (**self).clear(invert)
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), Self::Error> {
        (**self).set_contrast(level)
    }

    fn draw_text(&mut self, row: u8, text: &str, invert: bool) -> Result<(), Self::Error> {
        (**self).draw_text(row, text, invert)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// A render pass the sink rejected. Logged by the view engine, never fatal.
#[derive(Error, Debug)]
#[error("display sink error: {0:?}")]
pub struct RenderFault<E: Debug>(pub E);
