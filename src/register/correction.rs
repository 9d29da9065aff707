//! ### Temperature and second-order correction coefficients (`0x05` - `0x09`, 16 bits, R/W)
//!
//! Magnitudes of the correction terms; the signs live in
//! [`ZmdiConfig1Fields`](crate::register::zmdi_config1::ZmdiConfig1Fields) and the curve shape of the second-order
//! terms in its `sot_curve` field.
//!
//! | code   | marker        | term                                  |
//! |--------|---------------|---------------------------------------|
//! | `0x05` | [`Tcg`]       | temperature coefficient of gain       |
//! | `0x06` | [`Tco`]       | temperature coefficient of offset     |
//! | `0x07` | [`SotTco`]    | second-order offset vs. temperature   |
//! | `0x08` | [`SotTcg`]    | second-order gain vs. temperature     |
//! | `0x09` | [`SotBridge`] | second-order offset vs. bridge        |
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker struct for the Tcg (0x05) register
pub struct Tcg;
impl Reg for Tcg { const ADDR: u8 = 0x05; }

/// Marker struct for the Tco (0x06) register
pub struct Tco;
impl Reg for Tco { const ADDR: u8 = 0x06; }

/// Marker struct for the SOT_tco (0x07) register
pub struct SotTco;
impl Reg for SotTco { const ADDR: u8 = 0x07; }

/// Marker struct for the SOT_tcg (0x08) register
pub struct SotTcg;
impl Reg for SotTcg { const ADDR: u8 = 0x08; }

/// Marker struct for the SOT_bridge (0x09) register
pub struct SotBridge;
impl Reg for SotBridge { const ADDR: u8 = 0x09; }

impl Readable for Tcg {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word as i16) }
}

impl Writable for Tcg {
    type In = i16;
    fn encode(v: &Self::In) -> u16 { *v as u16 }
}

impl Readable for Tco {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word as i16) }
}

impl Writable for Tco {
    type In = i16;
    fn encode(v: &Self::In) -> u16 { *v as u16 }
}

impl Readable for SotTco {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word as i16) }
}

impl Writable for SotTco {
    type In = i16;
    fn encode(v: &Self::In) -> u16 { *v as u16 }
}

impl Readable for SotTcg {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word as i16) }
}

impl Writable for SotTcg {
    type In = i16;
    fn encode(v: &Self::In) -> u16 { *v as u16 }
}

impl Readable for SotBridge {
    type Out = i16;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> { Ok(word as i16) }
}

impl Writable for SotBridge {
    type In = i16;
    fn encode(v: &Self::In) -> u16 { *v as u16 }
}
