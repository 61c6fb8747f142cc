//! Buffered display module for use with the [embedded-graphics] crate
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyleBuilder},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::{Baseline, Text},
//! };
//! use sh1106_oled::{Builder, I2cInterface};
//! # fn run(i2c: impl embedded_hal::i2c::I2c) -> Result<(), sh1106_oled::Error> {
//! let iface = I2cInterface::new(i2c, sh1106_oled::DEFAULT_ADDRESS);
//! let mut disp = Builder::new(128, 64).init(iface, [0u8; 1024])?;
//!
//! let text_style = MonoTextStyleBuilder::new()
//!     .font(&FONT_6X10)
//!     .text_color(BinaryColor::On)
//!     .build();
//! Text::with_baseline("Hello world!", Point::zero(), text_style, Baseline::Top)
//!     .draw(&mut disp)?;
//!
//! disp.show()?;
//! # Ok(())
//! # }
//! ```
//!
//! [embedded-graphics]: https://docs.rs/embedded-graphics

use display_interface::{DisplayError, WriteOnlyDataCommand};

use crate::{
    geometry::Geometry,
    properties::{DisplayProperties, DisplayState},
};

/// Graphics mode handler
///
/// Holds the pixel buffer in vertical LSB-first layout: byte `page * width + x` carries rows
/// `page * 8` (bit 0) to `page * 8 + 7` (bit 7) of column `x`.
pub struct GraphicsMode<DI, B> {
    properties: DisplayProperties<DI>,
    buffer: B,
}

impl<DI, B> GraphicsMode<DI, B>
where
    DI: WriteOnlyDataCommand,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Buffer length is checked by [`DisplayProperties::into_graphics_mode`]
    pub(crate) fn new(properties: DisplayProperties<DI>, buffer: B) -> Self {
        GraphicsMode { properties, buffer }
    }

    /// Release the display properties and the pixel buffer
    pub fn release(self) -> (DisplayProperties<DI>, B) {
        (self.properties, self.buffer)
    }

    /// Send the power-on sequence, then blank the buffer and write it out so GRAM never shows
    /// leftover contents
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.properties.init_column_mode()?;
        self.clear();
        self.show()?;
        self.properties.set_active();
        debug!("sh1106 active");

        Ok(())
    }

    /// Clear the display buffer. You need to call `display.show()` for any effect on the screen
    pub fn clear(&mut self) {
        self.frame_mut().fill(0);
    }

    /// Write the whole buffer out to GRAM
    ///
    /// Every page is rewritten, so a frame left half written by a failed transfer is repaired by
    /// the next successful call.
    pub fn show(&mut self) -> Result<(), DisplayError> {
        let geometry = *self.properties.geometry();
        let width = geometry.width() as usize;
        let col_offset = geometry.column_offset();

        trace!("show {} pages at column {}", geometry.pages(), col_offset);
        for (page, data) in self
            .buffer
            .as_ref()
            .chunks_exact(width)
            .take(geometry.pages() as usize)
            .enumerate()
        {
            self.properties.write_page(page as u8, col_offset, data)?;
        }

        Ok(())
    }

    /// Turn a pixel on or off. If the X and Y coordinates are out of the bounds of the display,
    /// this method call is a noop.
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if let Some((idx, bit)) = self.locate(x, y) {
            let cell = &mut self.buffer.as_mut()[idx];
            if on {
                *cell |= bit;
            } else {
                *cell &= !bit;
            }
        }
    }

    /// Read back a pixel from the buffer. Out of bounds pixels read as off.
    pub fn get_pixel(&self, x: u32, y: u32) -> bool {
        self.locate(x, y)
            .map(|(idx, bit)| self.buffer.as_ref()[idx] & bit != 0)
            .unwrap_or(false)
    }

    /// Buffer index and bit mask of a pixel, `None` outside the shown pages
    fn locate(&self, x: u32, y: u32) -> Option<(usize, u8)> {
        let geometry = self.properties.geometry();
        if x >= geometry.width() as u32 || y >= geometry.pages() as u32 * 8 {
            return None;
        }

        let idx = (y as usize / 8) * geometry.width() as usize + x as usize;
        Some((idx, 1 << (y % 8)))
    }

    /// The frame part of the buffer
    fn frame_mut(&mut self) -> &mut [u8] {
        let len = self.properties.geometry().buffer_len();
        &mut self.buffer.as_mut()[..len]
    }

    /// Raw vertically packed pixel data
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Mutable raw vertically packed pixel data. Changes show up on the next `show()`.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> (u16, u16) {
        self.properties.dimensions()
    }

    /// Panel geometry
    pub fn geometry(&self) -> &Geometry {
        self.properties.geometry()
    }

    /// Lifecycle state
    pub fn state(&self) -> DisplayState {
        self.properties.state()
    }

    /// Turn the display on. GRAM contents are kept while off.
    pub fn power_on(&mut self) -> Result<(), DisplayError> {
        self.properties.display_on(true)
    }

    /// Turn the display off
    pub fn power_off(&mut self) -> Result<(), DisplayError> {
        self.properties.display_on(false)
    }

    /// Set the display contrast
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.properties.set_contrast(contrast)
    }

    /// Invert the display
    pub fn set_invert(&mut self, invert: bool) -> Result<(), DisplayError> {
        self.properties.set_invert(invert)
    }

    /// Force every pixel on, ignoring GRAM, or go back to following GRAM
    pub fn set_entire_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.properties.set_all_on(on)
    }
}

#[cfg(feature = "graphics")]
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

#[cfg(feature = "graphics")]
impl<DI, B> DrawTarget for GraphicsMode<DI, B>
where
    DI: WriteOnlyDataCommand,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bb = self.bounding_box();

        pixels
            .into_iter()
            .filter(|Pixel(pos, _color)| bb.contains(*pos))
            .for_each(|Pixel(pos, color)| self.set_pixel(pos.x as u32, pos.y as u32, color.is_on()));

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xff } else { 0 };
        self.frame_mut().fill(fill);
        Ok(())
    }
}

#[cfg(feature = "graphics")]
impl<DI, B> OriginDimensions for GraphicsMode<DI, B>
where
    DI: WriteOnlyDataCommand,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        let (w, h) = self.dimensions();

        Size::new(w.into(), h.into())
    }
}
