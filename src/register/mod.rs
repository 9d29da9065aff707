//! Register catalog of the ZSC31014.
//!
//! Every EEPROM word is represented by a marker type implementing [`Reg`] plus [`Readable`] and/or
//! [`Writable`]. The marker carries the read command code; the matching write command is always
//! `0x40 + code` (see [`cmd::Command`]).
//!
//! All registers are 16 bits wide and are transferred big-endian in command mode.
pub mod cmd;
pub mod cust_id;
pub mod zmdi_config1;
pub mod zmdi_config2;
pub mod offset_b;
pub mod gain_b;
pub mod correction;
pub mod b_config;
pub mod factory;

/// Number of readable EEPROM words (codes `0x00` to `0x13`).
pub const REGISTER_COUNT: usize = 0x14;

/// Whether `code` names one of the EEPROM words, `0x00..=0x13`.
pub const fn is_register(code: u8) -> bool {
    (code as usize) < REGISTER_COUNT
}

/// Whether the host may write the word under `code`. The factory calibration words are read-only.
pub const fn is_writable(code: u8) -> bool {
    matches!(code, 0x00..=0x09 | 0x0E | 0x0F | 0x13)
}

/// A register returned a value that has no meaning for the field at `bit_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u16,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u16, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

pub struct UnexpectedValue(pub u8);

/// Raw snapshot of every EEPROM word, indexed by register code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EepromDump([u16; REGISTER_COUNT]);

impl EepromDump {
    pub(crate) fn new(words: [u16; REGISTER_COUNT]) -> Self {
        Self(words)
    }

    pub fn words(&self) -> &[u16; REGISTER_COUNT] {
        &self.0
    }

    /// The word stored under `code`, or `None` if `code` is past the last register.
    pub fn get(&self, code: u8) -> Option<u16> {
        self.0.get(code as usize).copied()
    }

    /// `(code, word)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u16)> + '_ {
        self.0.iter().enumerate().map(|(code, word)| (code as u8, *word))
    }
}

/// Sign of a correction coefficient or input polarity.
///
/// Most fields encode [`Polarity::Negative`] as `1`, but a few (SPI polarity, bridge polarity) use the
/// opposite sense. Each register documents which.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Decodes a bit where `1` means negative.
    pub(crate) fn from_negative_bit(bit: u16) -> Self {
        if bit & 0b1 != 0 { Polarity::Negative } else { Polarity::Positive }
    }

    /// Decodes a bit where `1` means positive.
    pub(crate) fn from_positive_bit(bit: u16) -> Self {
        if bit & 0b1 != 0 { Polarity::Positive } else { Polarity::Negative }
    }

    pub(crate) fn negative_bit(self) -> u16 {
        (self == Polarity::Negative) as u16
    }

    pub(crate) fn positive_bit(self) -> u16 {
        (self == Polarity::Positive) as u16
    }
}

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    fn encode(v: &Self::In) -> u16;
}
