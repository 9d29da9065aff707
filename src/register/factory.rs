//! ### Factory calibration words (`0x0A` - `0x0D`, `0x10` - `0x12`, 16 bits, R)
//!
//! Temperature channel calibration, oscillator trim and the EEPROM signature. These are programmed by the
//! manufacturer; the driver only reads them, so they carry no [`Writable`](crate::register::Writable) impl.
//! The values are returned as raw words.
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the Offset_T (0x0A) register
pub struct OffsetT;
impl Reg for OffsetT { const ADDR: u8 = 0x0A; }

/// Marker struct for the Gain_T (0x0B) register
pub struct GainT;
impl Reg for GainT { const ADDR: u8 = 0x0B; }

/// Marker struct for the SOT_T (0x0C) register
pub struct SotT;
impl Reg for SotT { const ADDR: u8 = 0x0C; }

/// Marker struct for the TSETL (0x0D) register
pub struct Tsetl;
impl Reg for Tsetl { const ADDR: u8 = 0x0D; }

/// Marker struct for the T_Config (0x10) register
pub struct TConfig;
impl Reg for TConfig { const ADDR: u8 = 0x10; }

/// Marker struct for the Osc_Trim (0x11) register
pub struct OscTrim;
impl Reg for OscTrim { const ADDR: u8 = 0x11; }

/// Marker struct for the Signature (0x12) register
pub struct Signature;
impl Reg for Signature { const ADDR: u8 = 0x12; }

impl Readable for OffsetT {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for GainT {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for SotT {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for Tsetl {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for TConfig {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for OscTrim {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}

impl Readable for Signature {
    type Out = u16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word) }
}
