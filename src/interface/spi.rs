//! 4-wire SPI transport with hardware reset
//!
//! The interface drives chip select itself instead of using an
//! [`SpiDevice`](embedded_hal::spi::SpiDevice), so the data/command line is always settled before
//! the controller is selected.

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, PinState},
    spi::{Mode, SpiBus, MODE_0},
};

/// Reset held high before the pulse, in ms
pub const RESET_HIGH_MS: u32 = 1;
/// Reset pulse width, in ms
pub const RESET_LOW_MS: u32 = 10;
/// Settling time after reset before the first command, in ms
pub const RESET_SETTLE_MS: u32 = 100;

/// Highest SPI clock recommended for the SH1106
pub const MAX_FREQUENCY_HZ: u32 = 10_000_000;

/// Bus settings the controller expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: MAX_FREQUENCY_HZ,
            mode: MODE_0,
        }
    }
}

/// Hook applying [`SpiConfig`] to the bus before every transfer
///
/// Needed when the bus is shared with devices using other settings. HALs configure embedded-hal
/// buses when they're created, so the default [`NoSetup`] leaves the bus alone.
pub trait BusSetup<SPI> {
    /// Apply `config` to `spi`
    fn apply(&mut self, spi: &mut SPI, config: &SpiConfig) -> Result<(), DisplayError>;
}

/// Leaves the bus configuration untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSetup;

impl<SPI> BusSetup<SPI> for NoSetup {
    fn apply(&mut self, _spi: &mut SPI, _config: &SpiConfig) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// SH1106 over 4-wire SPI
///
/// Owns the data/command (`DC`), reset (`RST`) and chip select (`CS`) lines.
#[derive(Debug)]
pub struct SpiInterface<SPI, DC, RST, CS, S = NoSetup> {
    spi: SPI,
    dc: DC,
    rst: RST,
    cs: CS,
    config: SpiConfig,
    setup: S,
}

impl<SPI, DC, RST, CS> SpiInterface<SPI, DC, RST, CS, NoSetup>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
{
    /// Take ownership of the bus and pins and hardware-reset the controller.
    ///
    /// Blocks for a little over 110 ms while the reset pulse runs.
    pub fn new<D>(spi: SPI, dc: DC, rst: RST, cs: CS, delay: &mut D) -> Result<Self, DisplayError>
    where
        D: DelayNs,
    {
        Self::with_setup(spi, dc, rst, cs, SpiConfig::default(), NoSetup, delay)
    }
}

impl<SPI, DC, RST, CS, S> SpiInterface<SPI, DC, RST, CS, S>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
    S: BusSetup<SPI>,
{
    /// Like [`SpiInterface::new`], re-applying `config` through `setup` before every transfer
    pub fn with_setup<D>(
        spi: SPI,
        mut dc: DC,
        mut rst: RST,
        mut cs: CS,
        config: SpiConfig,
        setup: S,
        delay: &mut D,
    ) -> Result<Self, DisplayError>
    where
        D: DelayNs,
    {
        if config.frequency > MAX_FREQUENCY_HZ {
            warn!("spi clock {} Hz is above the recommended maximum", config.frequency);
        }

        dc.set_low().map_err(|_| DisplayError::DCError)?;
        rst.set_low().map_err(|_| DisplayError::RSError)?;
        cs.set_high().map_err(|_| DisplayError::CSError)?;

        let mut iface = Self {
            spi,
            dc,
            rst,
            cs,
            config,
            setup,
        };
        iface.reset(delay)?;

        Ok(iface)
    }

    /// Pulse the reset line and wait for the controller to come up
    pub fn reset<D>(&mut self, delay: &mut D) -> Result<(), DisplayError>
    where
        D: DelayNs,
    {
        debug!("sh1106 hardware reset");
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_HIGH_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_LOW_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_SETTLE_MS);

        Ok(())
    }

    /// Bus settings applied before each transfer
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST, CS) {
        (self.spi, self.dc, self.rst, self.cs)
    }

    /// Send `bytes` in one chip select frame with DC at `dc`
    fn transfer(&mut self, dc: PinState, bytes: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::CSError)?;
        self.dc.set_state(dc).map_err(|_| DisplayError::DCError)?;
        self.cs.set_low().map_err(|_| DisplayError::CSError)?;

        let written = self.write_selected(bytes);
        if written.is_err() {
            warn!("spi write of {} bytes failed", bytes.len());
        }

        // deselect even when the write failed
        let deselected = self.cs.set_high().map_err(|_| DisplayError::CSError);
        written.and(deselected)
    }

    fn write_selected(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.setup.apply(&mut self.spi, &self.config)?;
        self.spi.write(bytes).map_err(|_| DisplayError::BusWriteError)?;
        self.spi.flush().map_err(|_| DisplayError::BusWriteError)
    }
}

impl<SPI, DC, RST, CS, S> WriteOnlyDataCommand for SpiInterface<SPI, DC, RST, CS, S>
where
    SPI: SpiBus,
    DC: OutputPin,
    RST: OutputPin,
    CS: OutputPin,
    S: BusSetup<SPI>,
{
    fn send_commands(&mut self, cmds: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(cmds) = cmds else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        for &cmd in cmds {
            self.transfer(PinState::Low, &[cmd])?;
        }

        Ok(())
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(data) = buf else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        self.transfer(PinState::High, data)
    }
}
