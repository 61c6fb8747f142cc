//! Errors raised while setting up a display

use core::fmt;

use display_interface::DisplayError;

use crate::geometry::GeometryError;

/// Setup error
///
/// Once a display is running, its operations report the interface's [`DisplayError`] directly.
#[derive(Debug, Clone)]
pub enum Error {
    /// The requested panel doesn't fit the controller
    Geometry(GeometryError),
    /// The pixel buffer can't hold a full frame
    BufferTooSmall {
        /// Bytes needed, `pages * width`
        required: usize,
        /// Bytes provided
        actual: usize,
    },
    /// Writing to the controller failed
    Interface(DisplayError),
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Error::Geometry(e)
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Geometry(e) => write!(f, "invalid geometry: {}", e),
            Error::BufferTooSmall { required, actual } => write!(
                f,
                "pixel buffer holds {} bytes, a frame needs {}",
                actual, required
            ),
            Error::Interface(e) => write!(f, "interface error: {:?}", e),
        }
    }
}
