//! Container to store and set display properties

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

use crate::{
    command::Command,
    error::Error,
    geometry::{Geometry, GRAM_WIDTH},
    mode::graphics::GraphicsMode,
};

/// Where a display is in its power-on lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Connected, nothing sent yet
    Uninitialized,
    /// Init sequence started but hasn't completed, e.g. because a write failed
    Initializing,
    /// Init sequence and first frame sent
    Active,
}

/// Display properties struct
pub struct DisplayProperties<DI> {
    iface: DI,
    geometry: Geometry,
    state: DisplayState,
}

impl<DI> DisplayProperties<DI>
where
    DI: WriteOnlyDataCommand,
{
    /// Create new DisplayProperties instance
    pub fn new(iface: DI, geometry: Geometry) -> DisplayProperties<DI> {
        DisplayProperties {
            iface,
            geometry,
            state: DisplayState::Uninitialized,
        }
    }

    /// Attach a pixel buffer, producing a [`GraphicsMode`] display
    ///
    /// The buffer must hold at least `pages * width` bytes. Extra bytes are never sent.
    pub fn into_graphics_mode<B>(self, buffer: B) -> Result<GraphicsMode<DI, B>, Error>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let required = self.geometry.buffer_len();
        let actual = buffer.as_ref().len();
        if actual < required {
            return Err(Error::BufferTooSmall { required, actual });
        }

        Ok(GraphicsMode::new(self, buffer))
    }

    /// Send the power-on command sequence
    ///
    /// GRAM contents are undefined afterwards until a full frame is drawn.
    pub fn init_column_mode(&mut self) -> Result<(), DisplayError> {
        debug!(
            "sh1106 init {}x{}, external vcc {}",
            self.geometry.width(),
            self.geometry.height(),
            self.geometry.external_vcc()
        );
        self.state = DisplayState::Initializing;
        for cmd in Command::init_sequence(&self.geometry) {
            cmd.send(&mut self.iface)?;
        }

        Ok(())
    }

    pub(crate) fn set_active(&mut self) {
        self.state = DisplayState::Active;
    }

    /// Draws a subset of a page to screen
    ///
    /// start_col specifies the column offset in screen space, not in GRAM space
    /// so the user doesn't need to offset it themselves.
    ///
    /// The column address is reset before every page; the SH1106 doesn't wrap from one page to
    /// the next. Fails with [`DisplayError::OutOfBoundsError`] without sending anything if the
    /// run would extend past the last GRAM column.
    pub fn draw_page(&mut self, page_addr: u8, start_col: u8, buf: &[u8]) -> Result<(), DisplayError> {
        let gram_col = start_col
            .checked_add(self.geometry.column_offset())
            .filter(|&col| col as usize + buf.len() <= GRAM_WIDTH as usize)
            .ok_or(DisplayError::OutOfBoundsError)?;
        self.write_page(page_addr, gram_col, buf)
    }

    /// Write `buf` to GRAM starting at `gram_col` of `page_addr`
    pub(crate) fn write_page(
        &mut self,
        page_addr: u8,
        gram_col: u8,
        buf: &[u8],
    ) -> Result<(), DisplayError> {
        for cmd in page_address(page_addr, gram_col) {
            cmd.send(&mut self.iface)?;
        }

        self.iface.send_data(DataFormat::U8(buf))
    }

    /// Get the panel geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> (u16, u16) {
        (self.geometry.width(), self.geometry.height())
    }

    /// Lifecycle state
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Turn the display on or off. The display can be drawn to and retains all
    /// of its memory even while off.
    pub fn display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        Command::DisplayOn(on).send(&mut self.iface)
    }

    /// Set the display contrast
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        Command::Contrast(contrast).send(&mut self.iface)
    }

    /// Invert the display
    pub fn set_invert(&mut self, invert: bool) -> Result<(), DisplayError> {
        Command::Invert(invert).send(&mut self.iface)
    }

    /// Light every pixel regardless of GRAM contents, or go back to showing GRAM
    pub fn set_all_on(&mut self, on: bool) -> Result<(), DisplayError> {
        Command::AllOn(on).send(&mut self.iface)
    }

    /// Release the interface
    pub fn release(self) -> DI {
        self.iface
    }
}

/// Commands selecting `page` and GRAM column `col` as the target of the next data write
pub fn page_address(page: u8, col: u8) -> [Command; 3] {
    [
        Command::PageAddress(page),
        Command::ColumnAddressLow(0xF & col),
        Command::ColumnAddressHigh(0xF & (col >> 4)),
    ]
}
