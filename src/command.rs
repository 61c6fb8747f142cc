//! SH1106 command set

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

use crate::geometry::Geometry;

/// Memory addressing mode selected by [`Command::AddressMode`]
///
/// The SH1106 ignores everything but page addressing when writing GRAM; the command is still part
/// of the power-on sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddrMode {
    /// Horizontal addressing
    Horizontal = 0x00,
    /// Vertical addressing
    Vertical = 0x01,
    /// Page addressing
    Page = 0x02,
}

/// Controller commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set contrast, 0 (dimmest) to 255 (brightest)
    Contrast(u8),
    /// Force every pixel on (`true`) or follow GRAM contents (`false`)
    AllOn(bool),
    /// Invert pixel colors
    Invert(bool),
    /// Turn the panel on or off. GRAM is retained while off.
    DisplayOn(bool),
    /// Select memory addressing mode
    AddressMode(AddrMode),
    /// Low nibble of the column address used by the next data write
    ColumnAddressLow(u8),
    /// High nibble of the column address used by the next data write
    ColumnAddressHigh(u8),
    /// Page (8 row strip) used by the next data write, 0-7
    PageAddress(u8),
    /// GRAM row mapped to the first COM line, 0-63
    StartLine(u8),
    /// Reverse the column to segment mapping (highest column drives SEG0)
    SegmentRemap(bool),
    /// Multiplex ratio, the number of active COM lines minus one
    Multiplex(u8),
    /// Scan COM lines from COM[N-1] down to COM0
    ReverseComDir(bool),
    /// Vertical shift of the COM lines
    DisplayOffset(u8),
    /// Alternative (`true`) or sequential (`false`) COM pin layout
    ComPinConfig(bool),
    /// Oscillator frequency (high nibble) and clock divide ratio (low nibble)
    DisplayClockDiv(u8, u8),
    /// Discharge period (phase 2) and pre-charge period (phase 1), in display clocks
    PreChargePeriod(u8, u8),
    /// Raw VCOM deselect level
    VcomhDeselect(u8),
    /// Enable the internal DC-DC charge pump
    ChargePump(bool),
}

impl Command {
    /// Encode the command into its opcode and optional parameter byte
    pub fn encode(self) -> ([u8; 2], usize) {
        match self {
            Command::Contrast(val) => ([0x81, val], 2),
            Command::AllOn(on) => ([0xA4 | (on as u8), 0], 1),
            Command::Invert(inv) => ([0xA6 | (inv as u8), 0], 1),
            Command::DisplayOn(on) => ([0xAE | (on as u8), 0], 1),
            Command::AddressMode(mode) => ([0x20, mode as u8], 2),
            Command::ColumnAddressLow(addr) => ([0x0F & addr, 0], 1),
            Command::ColumnAddressHigh(addr) => ([0x10 | (0xF & addr), 0], 1),
            Command::PageAddress(page) => ([0xB0 | (0x7 & page), 0], 1),
            Command::StartLine(line) => ([0x40 | (0x3F & line), 0], 1),
            Command::SegmentRemap(remap) => ([0xA0 | (remap as u8), 0], 1),
            Command::Multiplex(ratio) => ([0xA8, ratio], 2),
            Command::ReverseComDir(rev) => ([0xC0 | ((rev as u8) << 3), 0], 1),
            Command::DisplayOffset(offset) => ([0xD3, offset], 2),
            Command::ComPinConfig(alt) => ([0xDA, 0x02 | ((alt as u8) << 4)], 2),
            Command::DisplayClockDiv(fosc, div) => {
                ([0xD5, ((0xF & fosc) << 4) | (0xF & div)], 2)
            }
            Command::PreChargePeriod(discharge, precharge) => {
                ([0xD9, ((0xF & discharge) << 4) | (0xF & precharge)], 2)
            }
            Command::VcomhDeselect(level) => ([0xDB, level], 2),
            Command::ChargePump(en) => ([0x8D, 0x10 | ((en as u8) << 2)], 2),
        }
    }

    /// Send command to the display
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), DisplayError>
    where
        DI: WriteOnlyDataCommand,
    {
        let (data, len) = self.encode();
        iface.send_commands(DataFormat::U8(&data[0..len]))
    }

    /// Power-on sequence taking a freshly reset controller to a lit, non-inverted panel at full
    /// contrast
    ///
    /// Segment remap, reversed COM scan and the alternative COM pin layout are fixed; they match
    /// the common 128x64 modules.
    pub fn init_sequence(geometry: &Geometry) -> [Command; 16] {
        let external_vcc = geometry.external_vcc();
        let (discharge, precharge) = if external_vcc { (0x2, 0x2) } else { (0xF, 0x1) };

        [
            Command::DisplayOn(false),
            Command::AddressMode(AddrMode::Horizontal),
            Command::StartLine(0),
            Command::SegmentRemap(true),
            Command::Multiplex((geometry.height() - 1) as u8),
            Command::ReverseComDir(true),
            Command::DisplayOffset(0),
            Command::ComPinConfig(true),
            Command::DisplayClockDiv(0x8, 0x0),
            Command::PreChargePeriod(discharge, precharge),
            Command::VcomhDeselect(0x30),
            Command::Contrast(0xFF),
            Command::AllOn(false),
            Command::Invert(false),
            Command::ChargePump(!external_vcc),
            Command::DisplayOn(true),
        ]
    }
}
