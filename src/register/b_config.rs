//! ### B_Config - Bridge analog front-end configuration (`0x0F`, 16 bits, R/W)
//!
//! | bits    | field                                   |
//! |---------|-----------------------------------------|
//! | 0..=3   | preamp offset, `0..=15`                 |
//! | 4..=6   | preamp gain (see [`PreAmpGain`])        |
//! | 7       | bridge polarity, `1` = positive         |
//! | 8       | long integration                        |
//! | 9       | B-sink                                  |
//! | 10..=11 | mux mode, `10` = full, `11` = half      |
//! | 12      | disable nulling                         |
//! | 13..=15 | reserved, `000`                         |
#![doc(alias = "B_Config")]
use crate::register::{InvalidRegisterField, Polarity, Readable, Reg, UnexpectedValue, Writable};

/// Marker struct for the B_Config (0x0F) register
pub struct BConfig;
impl Reg for BConfig { const ADDR: u8 = 0x0F; }

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BConfigFields {
    pub disable_nulling: bool,
    pub mux: MuxMode,
    pub use_b_sink: bool,
    pub use_long_integration: bool,
    pub polarity: Polarity,
    pub pre_amp_gain: PreAmpGain,
    /// Only the low 4 bits are stored
    pub pre_amp_offset: u8,
}

impl Readable for BConfig {
    type Out = BConfigFields;

    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> {
        Ok(BConfigFields {
            pre_amp_offset: (word & 0b1111) as u8,
            pre_amp_gain: PreAmpGain::from(((word >> 4) & 0b111) as u8),
            polarity: Polarity::from_positive_bit(word >> 7),
            use_long_integration: (word >> 8) & 0b1 != 0,
            use_b_sink: (word >> 9) & 0b1 != 0,
            mux: MuxMode::try_from(((word >> 10) & 0b11) as u8)
                .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0 as u16, 10))?,
            disable_nulling: (word >> 12) & 0b1 != 0,
        })
    }
}

impl Writable for BConfig {
    type In = BConfigFields;

    fn encode(v: &Self::In) -> u16 {
        let pre_amp_gain: u8 = v.pre_amp_gain.into();
        let mux: u8 = v.mux.into();

        let mut value = (v.pre_amp_offset & 0b1111) as u16;
        value |= (pre_amp_gain as u16) << 4;
        value |= v.polarity.positive_bit() << 7;
        if v.use_long_integration { value |= 1 << 8; }
        if v.use_b_sink { value |= 1 << 9; }
        value |= (mux as u16) << 10;
        if v.disable_nulling { value |= 1 << 12; }

        value
    }
}

/// Bridge sensor wiring topology.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxMode {
    FullBridge,
    HalfBridge,
}

impl TryFrom<u8> for MuxMode {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0b10 => Ok(MuxMode::FullBridge),
            0b11 => Ok(MuxMode::HalfBridge),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<MuxMode> for u8 {
    fn from(v: MuxMode) -> u8 {
        match v {
            MuxMode::FullBridge => 0b10,
            MuxMode::HalfBridge => 0b11,
        }
    }
}

/// Analog preamplifier gain.
///
/// The register code is *not* monotonic in the gain, so always go through this type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PreAmpGain {
    X1_5,
    X3,
    X6,
    X12,
    X24,
    X48,
    X96,
    X192,
}

impl PreAmpGain {
    /// The amplification factor.
    pub fn multiplier(self) -> f32 {
        match self {
            PreAmpGain::X1_5 => 1.5,
            PreAmpGain::X3 => 3.0,
            PreAmpGain::X6 => 6.0,
            PreAmpGain::X12 => 12.0,
            PreAmpGain::X24 => 24.0,
            PreAmpGain::X48 => 48.0,
            PreAmpGain::X96 => 96.0,
            PreAmpGain::X192 => 192.0,
        }
    }
}

impl From<u8> for PreAmpGain {
    fn from(field: u8) -> Self {
        match field & 0b111 {
            0b000 => PreAmpGain::X1_5,
            0b100 => PreAmpGain::X3,
            0b001 => PreAmpGain::X6,
            0b101 => PreAmpGain::X12,
            0b010 => PreAmpGain::X24,
            0b110 => PreAmpGain::X48,
            0b011 => PreAmpGain::X96,
            _ => PreAmpGain::X192,
        }
    }
}

impl From<PreAmpGain> for u8 {
    fn from(v: PreAmpGain) -> u8 {
        match v {
            PreAmpGain::X1_5 => 0b000,
            PreAmpGain::X3 => 0b100,
            PreAmpGain::X6 => 0b001,
            PreAmpGain::X12 => 0b101,
            PreAmpGain::X24 => 0b010,
            PreAmpGain::X48 => 0b110,
            PreAmpGain::X96 => 0b011,
            PreAmpGain::X192 => 0b111,
        }
    }
}
