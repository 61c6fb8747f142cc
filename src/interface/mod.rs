//! Bus adapters implementing [`WriteOnlyDataCommand`](display_interface::WriteOnlyDataCommand)
//!
//! Each command and parameter byte is framed as its own command transfer; pixel data for a page
//! goes out as a single data transfer.

pub mod i2c;
pub mod spi;

pub use self::{
    i2c::{I2cInterface, DEFAULT_ADDRESS},
    spi::{BusSetup, NoSetup, SpiConfig, SpiInterface},
};
