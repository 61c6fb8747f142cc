//! I2C transport

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::i2c::{I2c, Operation};

/// Default 7-bit address of SH1106 modules (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte: a single command byte follows
const COMMAND_PREFIX: u8 = 0x00;
/// Control byte: display data follows until the end of the transfer
const DATA_PREFIX: u8 = 0x40;

/// SH1106 over I2C
///
/// Every command byte goes out in its own `[0x00, byte]` write. Display data goes out as one
/// write of `0x40` followed by the payload.
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create new I2C interface for the controller at `address`
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> WriteOnlyDataCommand for I2cInterface<I2C>
where
    I2C: I2c,
{
    fn send_commands(&mut self, cmds: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(cmds) = cmds else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        for &cmd in cmds {
            self.i2c
                .write(self.address, &[COMMAND_PREFIX, cmd])
                .map_err(|_| {
                    warn!("i2c command write to {} failed", self.address);
                    DisplayError::BusWriteError
                })?;
        }

        Ok(())
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(data) = buf else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        // adjacent write operations go out back to back, without a repeated start
        self.i2c
            .transaction(
                self.address,
                &mut [Operation::Write(&[DATA_PREFIX]), Operation::Write(data)],
            )
            .map_err(|_| {
                warn!("i2c data write of {} bytes to {} failed", data.len(), self.address);
                DisplayError::BusWriteError
            })
    }
}
