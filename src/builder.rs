//! Interface factory
//!
//! ```rust,no_run
//! use sh1106_oled::{Builder, I2cInterface, DEFAULT_ADDRESS};
//! # fn run(i2c: impl embedded_hal::i2c::I2c) -> Result<(), sh1106_oled::Error> {
//! // 128x64 panel running off the internal charge pump
//! let mut disp = Builder::new(128, 64)
//!     .connect(I2cInterface::new(i2c, DEFAULT_ADDRESS))?
//!     .into_graphics_mode([0u8; 1024])?;
//! disp.init()?;
//! # Ok(())
//! # }
//! ```

use display_interface::WriteOnlyDataCommand;

use crate::{error::Error, geometry::Geometry, mode::GraphicsMode, properties::DisplayProperties};

/// Builder struct. Driver options and interface are set using its methods.
#[derive(Debug, Clone, Copy)]
pub struct Builder {
    width: u16,
    height: u16,
    external_vcc: bool,
}

impl Builder {
    /// Create new builder for a `width` x `height` panel using the internal charge pump
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            external_vcc: false,
        }
    }

    /// Panel is powered from an external VCC; changes pre-charge timing and disables the charge
    /// pump
    pub fn with_external_vcc(self, external_vcc: bool) -> Self {
        Self {
            external_vcc,
            ..self
        }
    }

    /// Validate the geometry and bind it to an interface. Nothing is sent yet.
    pub fn connect<DI>(self, iface: DI) -> Result<DisplayProperties<DI>, Error>
    where
        DI: WriteOnlyDataCommand,
    {
        let geometry = Geometry::new(self.width, self.height, self.external_vcc)?;
        Ok(DisplayProperties::new(iface, geometry))
    }

    /// Connect, attach `buffer` and run the full power-on sequence, returning a display that's
    /// lit and blank
    ///
    /// If a write fails the interface and buffer are dropped along with the half-initialized
    /// display. To keep hold of them, e.g. to retry or reset the bus, go through [`connect`],
    /// [`into_graphics_mode`] and [`GraphicsMode::init`] instead; the display can still be
    /// [`release`]d after a failed `init`.
    ///
    /// [`connect`]: Builder::connect
    /// [`into_graphics_mode`]: DisplayProperties::into_graphics_mode
    /// [`release`]: GraphicsMode::release
    pub fn init<DI, B>(self, iface: DI, buffer: B) -> Result<GraphicsMode<DI, B>, Error>
    where
        DI: WriteOnlyDataCommand,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let mut disp = self.connect(iface)?.into_graphics_mode(buffer)?;
        disp.init()?;
        Ok(disp)
    }
}
