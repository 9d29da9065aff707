//! ### Gain_B - Bridge gain correction (`0x04`, 16 bits, R/W)
//!
//! Unsigned fixed point with 13 fractional bits in bits `0..=14`. Bit 15 is a range flag: when set the
//! decoded value is multiplied by 8, extending the range to `[4, 32)` at an eighth of the resolution.
//!
//! Not to be confused with the analog [`PreAmpGain`](crate::register::b_config::PreAmpGain) stored in B_Config.
#![doc(alias = "Gain_B")]
use crate::register::{InvalidRegisterField, Readable, Reg, Writable};

/// Marker struct for the Gain_B (0x04) register
pub struct GainB;
impl Reg for GainB { const ADDR: u8 = 0x04; }

const FRACTION_SCALE: f32 = (1 << 13) as f32;
const RANGE_FLAG: u16 = 0x8000;
const MANTISSA_MASK: u16 = 0x7FFF;

/// Largest gain (exclusive) the register can hold.
pub const MAX_GAIN: f32 = 32.0;

/// The gain is negative, NaN, or not below [`MAX_GAIN`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainOutOfRange;

/// A gain correction value that is known to fit the Gain_B encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainValue(u16);

impl GainValue {
    /// Encodes `gain`, rounding to the nearest representable value.
    pub fn new(gain: f32) -> Result<Self, GainOutOfRange> {
        encode_gain(gain).map(GainValue)
    }

    pub fn from_raw(raw: u16) -> Self {
        GainValue(raw)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn value(&self) -> f32 {
        decode_gain(self.0)
    }
}

/// Converts a raw Gain_B word into the gain it represents.
pub fn decode_gain(raw: u16) -> f32 {
    let gain = (raw & MANTISSA_MASK) as f32 / FRACTION_SCALE;

    if raw & RANGE_FLAG != 0 { gain * 8.0 } else { gain }
}

/// Converts a gain into a raw Gain_B word.
pub fn encode_gain(gain: f32) -> Result<u16, GainOutOfRange> {
    // Written so that NaN falls through to the error
    if !(0.0..MAX_GAIN).contains(&gain) {
        return Err(GainOutOfRange);
    }

    let (gain, flag) = if gain >= 4.0 { (gain / 8.0, RANGE_FLAG) } else { (gain, 0) };

    // `as` saturates, and gain is non-negative, so adding 0.5 rounds half up
    let mantissa = ((gain * FRACTION_SCALE + 0.5) as u32).min(MANTISSA_MASK as u32) as u16;

    Ok(flag | mantissa)
}

impl Readable for GainB {
    type Out = GainValue;
    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> {
        Ok(GainValue::from_raw(word))
    }
}

impl Writable for GainB {
    type In = GainValue;
    fn encode(v: &Self::In) -> u16 {
        v.raw()
    }
}
