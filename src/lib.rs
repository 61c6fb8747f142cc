//! SH1106 OLED display driver
//!
//! Blocking driver for SH1106 controllers over I2C or 4-wire SPI, built on
//! [display-interface](https://docs.rs/display-interface) and
//! [embedded-hal](https://docs.rs/embedded-hal) 1.0. With the default `graphics` feature the
//! buffered [`GraphicsMode`] is an [embedded-graphics](https://docs.rs/embedded-graphics) draw
//! target.
//!
//! The SH1106 has 132 columns of GRAM whatever the width of the attached panel, so the visible
//! area is centered in it, and it has no column range addressing: the page and column address
//! are set again before every page of pixel data.
//!
//! ```rust,no_run
//! use sh1106_oled::{Builder, SpiInterface};
//! # fn run<SPI, DC, RST, CS, D>(spi: SPI, dc: DC, rst: RST, cs: CS, mut delay: D)
//! #     -> Result<(), sh1106_oled::Error>
//! # where
//! #     SPI: embedded_hal::spi::SpiBus,
//! #     DC: embedded_hal::digital::OutputPin,
//! #     RST: embedded_hal::digital::OutputPin,
//! #     CS: embedded_hal::digital::OutputPin,
//! #     D: embedded_hal::delay::DelayNs,
//! # {
//! let iface = SpiInterface::new(spi, dc, rst, cs, &mut delay)?;
//! let mut disp = Builder::new(128, 64).init(iface, [0u8; 1024])?;
//!
//! disp.set_pixel(10, 20, true);
//! disp.show()?;
//! disp.set_contrast(0x40)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `graphics` (default): `DrawTarget` support through `embedded-graphics-core`
//! - `defmt`: log through `defmt` and derive `defmt::Format` on plain data types
//! - `log`: log through the `log` facade

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod builder;
pub mod command;
mod error;
pub mod geometry;
pub mod interface;
pub mod mode;
pub mod properties;

pub use crate::{
    builder::Builder,
    error::Error,
    geometry::{Geometry, GeometryError, GRAM_HEIGHT, GRAM_WIDTH},
    interface::{I2cInterface, SpiConfig, SpiInterface, DEFAULT_ADDRESS},
    mode::GraphicsMode,
    properties::{DisplayProperties, DisplayState},
};
pub use display_interface::DisplayError;
