//! Visible panel geometry and its placement inside the controller's GRAM

use core::fmt;

/// Width of the SH1106 graphics RAM in columns, independent of the panel that is attached
pub const GRAM_WIDTH: u16 = 132;
/// Height of the SH1106 graphics RAM in rows (8 pages)
pub const GRAM_HEIGHT: u16 = 64;

/// Reasons a panel geometry can't be mapped onto the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Width is zero
    ZeroWidth,
    /// Panel is wider than the 132 GRAM columns
    TooWide(u16),
    /// Panel is taller than the 64 GRAM rows
    TooTall(u16),
    /// Height is less than one 8 pixel page
    NoPages(u16),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth => f.write_str("display width must be non-zero"),
            Self::TooWide(w) => write!(f, "width {} exceeds the {} GRAM columns", w, GRAM_WIDTH),
            Self::TooTall(h) => write!(f, "height {} exceeds the {} GRAM rows", h, GRAM_HEIGHT),
            Self::NoPages(h) => write!(f, "height {} is shorter than one page", h),
        }
    }
}

/// Dimensions of the visible panel and its power supply mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    width: u16,
    height: u16,
    pages: u16,
    external_vcc: bool,
}

impl Geometry {
    /// Validate a panel geometry.
    ///
    /// A height that isn't a multiple of 8 is accepted but only the complete pages are ever
    /// written; the rows of the trailing partial page are never driven.
    pub fn new(width: u16, height: u16, external_vcc: bool) -> Result<Self, GeometryError> {
        if width == 0 {
            return Err(GeometryError::ZeroWidth);
        }
        if width > GRAM_WIDTH {
            return Err(GeometryError::TooWide(width));
        }
        if height > GRAM_HEIGHT {
            return Err(GeometryError::TooTall(height));
        }
        if height < 8 {
            return Err(GeometryError::NoPages(height));
        }
        if height % 8 != 0 {
            warn!(
                "height {} is not a multiple of 8, the last {} rows will not be shown",
                height,
                height % 8
            );
        }

        Ok(Self {
            width,
            height,
            pages: height / 8,
            external_vcc,
        })
    }

    /// Visible width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Visible height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of complete 8 pixel pages
    pub fn pages(&self) -> u16 {
        self.pages
    }

    /// Whether the panel is powered from an external VCC rather than the internal charge pump
    pub fn external_vcc(&self) -> bool {
        self.external_vcc
    }

    /// `false` when the height leaves a partial page that is truncated
    pub fn is_page_aligned(&self) -> bool {
        self.height % 8 == 0
    }

    /// First GRAM column of the visible area, centering the panel in the 132 GRAM columns
    pub fn column_offset(&self) -> u8 {
        ((GRAM_WIDTH - self.width) / 2) as u8
    }

    /// Bytes of vertically packed pixel data needed for one full frame
    pub fn buffer_len(&self) -> usize {
        self.pages as usize * self.width as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_size_panel() {
        let g = Geometry::new(128, 64, false).unwrap();
        assert_eq!(g.pages(), 8);
        assert_eq!(g.column_offset(), 2);
        assert_eq!(g.buffer_len(), 1024);
        assert!(g.is_page_aligned());
    }

    #[test]
    fn narrow_short_panel() {
        let g = Geometry::new(96, 16, true).unwrap();
        assert_eq!(g.pages(), 2);
        assert_eq!(g.column_offset(), 18);
        assert!(g.external_vcc());
    }

    #[test]
    fn odd_width_rounds_down() {
        let g = Geometry::new(127, 64, false).unwrap();
        assert_eq!(g.column_offset(), 2);
        let g = Geometry::new(132, 64, false).unwrap();
        assert_eq!(g.column_offset(), 0);
    }

    #[test]
    fn partial_page_truncates() {
        let g = Geometry::new(128, 60, false).unwrap();
        assert_eq!(g.pages(), 7);
        assert_eq!(g.height(), 60);
        assert!(!g.is_page_aligned());
        assert_eq!(g.buffer_len(), 7 * 128);
    }

    #[test]
    fn rejects_unmappable_sizes() {
        assert_eq!(Geometry::new(0, 64, false), Err(GeometryError::ZeroWidth));
        assert_eq!(Geometry::new(133, 64, false), Err(GeometryError::TooWide(133)));
        assert_eq!(Geometry::new(128, 72, false), Err(GeometryError::TooTall(72)));
        assert_eq!(Geometry::new(128, 7, false), Err(GeometryError::NoPages(7)));
    }
}
