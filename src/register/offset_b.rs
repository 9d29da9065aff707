//! ### Offset_B - Bridge offset correction (`0x03`, 16 bits, R/W)
//!
//! Two's complement offset applied to the bridge reading before gain correction.
#![doc(alias = "Offset_B")]
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker struct for the Offset_B (0x03) register
pub struct OffsetB;
impl Reg for OffsetB { const ADDR: u8 = 0x03; }

impl Readable for OffsetB {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> {
        Ok(word as i16)
    }
}

impl Writable for OffsetB {
    type In = i16;
    fn encode(v: &Self::In) -> u16 {
        *v as u16
    }
}
