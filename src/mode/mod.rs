//! Display modes

pub mod graphics;

pub use self::graphics::GraphicsMode;
