//! ### Command codes
//!
//! In command mode the ZSC31014 accepts 3-byte frames: one command byte followed by two data bytes (big-endian).
//! Reads use the register code `0x00..=0x13` with zeroed data bytes, writes use `0x40 + code` and carry the new
//! word. Two additional commands switch the protocol mode:
//! - `0xA0` Start_CM, only accepted within the power-on command window
//! - `0x80` Start_NOM, leaves command mode until the next power cycle
#![doc(alias = "Start_CM")]
#![doc(alias = "Start_NOM")]

/// Offset between a register's read code and its write code.
pub const WRITE_OFFSET: u8 = 0x40;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Read the EEPROM word with the given code (`0x00..=0x13`)
    Read(u8),

    /// Write the EEPROM word with the given code (`0x00..=0x13`). Codes past that wrap instead of overflowing.
    Write(u8),

    /// Enter command mode. Must be sent right after power-on.
    StartCommandMode,

    /// Leave command mode and start streaming measurements.
    StartNormalOperation,
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        match cmd {
            Command::Read(code) => code,
            Command::Write(code) => WRITE_OFFSET.wrapping_add(code),
            Command::StartCommandMode => 0xA0,
            Command::StartNormalOperation => 0x80,
        }
    }
}
