//! Single-byte remote command protocol.
//!
//! A controller connects, writes one byte and closes. Each valid byte has exactly one bit set:
//! the low nibble latches a thruster on, the high nibble latches it off.

use crate::domain::Thruster;
use crate::use_cases::LatchCommand;

pub const CODE_BOTTOM_ON: u8 = 0b0000_0001;
pub const CODE_LEFT_ON: u8 = 0b0000_0010;
pub const CODE_RIGHT_ON: u8 = 0b0000_0100;
pub const CODE_TOP_ON: u8 = 0b0000_1000;
pub const CODE_BOTTOM_OFF: u8 = 0b0001_0000;
pub const CODE_LEFT_OFF: u8 = 0b0010_0000;
pub const CODE_RIGHT_OFF: u8 = 0b0100_0000;
pub const CODE_TOP_OFF: u8 = 0b1000_0000;

/// Maps an opcode to its latch command. Anything outside the table is `None`.
pub fn decode_opcode(byte: u8) -> Option<LatchCommand> {
    let command = match byte {
        CODE_BOTTOM_ON => LatchCommand::Set(Thruster::Bottom),
        CODE_LEFT_ON => LatchCommand::Set(Thruster::Left),
        CODE_RIGHT_ON => LatchCommand::Set(Thruster::Right),
        CODE_TOP_ON => LatchCommand::Set(Thruster::Top),
        CODE_BOTTOM_OFF => LatchCommand::Clear(Thruster::Bottom),
        CODE_LEFT_OFF => LatchCommand::Clear(Thruster::Left),
        CODE_RIGHT_OFF => LatchCommand::Clear(Thruster::Right),
        CODE_TOP_OFF => LatchCommand::Clear(Thruster::Top),
        _ => return None,
    };
    Some(command)
}

pub fn encode_opcode(command: LatchCommand) -> u8 {
    match command {
        LatchCommand::Set(t) => t.bit(),
        LatchCommand::Clear(t) => t.bit() << 4,
    }
}
