#![allow(dead_code)]

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};

/// One transfer seen by [`Recorder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Command(u8),
    Data(Vec<u8>),
}

/// Interface recording every command byte and data transfer
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<Op>,
    /// Fail the transfer with this index, counting from 0
    pub fail_at: Option<usize>,
}

impl Recorder {
    pub fn failing_at(n: usize) -> Self {
        Self {
            ops: Vec::new(),
            fail_at: Some(n),
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Command(c) => Some(*c),
                Op::Data(_) => None,
            })
            .collect()
    }

    fn push(&mut self, op: Op) -> Result<(), DisplayError> {
        if self.fail_at == Some(self.ops.len()) {
            return Err(DisplayError::BusWriteError);
        }
        self.ops.push(op);
        Ok(())
    }
}

impl WriteOnlyDataCommand for Recorder {
    fn send_commands(&mut self, cmds: DataFormat<'_>) -> Result<(), DisplayError> {
        match cmds {
            DataFormat::U8(bytes) => bytes.iter().try_for_each(|&b| self.push(Op::Command(b))),
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        match buf {
            DataFormat::U8(bytes) => self.push(Op::Data(bytes.to_vec())),
            _ => Err(DisplayError::DataFormatNotImplemented),
        }
    }
}

/// Power-on sequence for a 128x64 panel on the internal charge pump
pub const INIT_128X64: [u8; 25] = [
    0xAE, 0x20, 0x00, 0x40, 0xA1, 0xA8, 0x3F, 0xC8, 0xD3, 0x00, 0xDA, 0x12, 0xD5, 0x80, 0xD9,
    0xF1, 0xDB, 0x30, 0x81, 0xFF, 0xA4, 0xA6, 0x8D, 0x14, 0xAF,
];

/// Expected transfers of a full frame write
pub fn frame_ops(width: usize, pages: usize, col_offset: u8, buffer: &[u8]) -> Vec<Op> {
    let mut ops = Vec::new();
    for page in 0..pages {
        ops.push(Op::Command(0xB0 | page as u8));
        ops.push(Op::Command(col_offset & 0x0F));
        ops.push(Op::Command(0x10 | (col_offset >> 4)));
        ops.push(Op::Data(buffer[page * width..(page + 1) * width].to_vec()));
    }
    ops
}
