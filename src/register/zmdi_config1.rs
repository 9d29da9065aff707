//! ### ZMDI_Config1 - Interface and conversion configuration (`0x01`, 16 bits, R/W)
//!
//! | bits    | field                                                   |
//! |---------|---------------------------------------------------------|
//! | 0..=2   | reserved, must be written as `001`                      |
//! | 3       | oscillator: `0` = 4 MHz, `1` = 1 MHz                    |
//! | 4       | interface: `0` = I2C, `1` = SPI                         |
//! | 5       | `0` = continuous (update), `1` = sleep mode (on demand) |
//! | 6..=7   | update rate                                             |
//! | 8       | reserved, `0`                                           |
//! | 9       | second-order temperature curve shape                    |
//! | 10..=15 | signs of the correction coefficients, `1` = negative    |
#![doc(alias = "ZMDI_Config1")]
use crate::register::{InvalidRegisterField, Polarity, Readable, Reg, Writable};

/// Marker struct for the ZMDI_Config1 (0x01) register
pub struct ZmdiConfig1;
impl Reg for ZmdiConfig1 { const ADDR: u8 = 0x01; }

const RESERVED_PATTERN: u16 = 0b001;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZmdiConfig1Fields {
    pub clock_speed: ClockSpeed,
    pub comm_type: CommType,
    pub sleep_mode: OperationMode,
    pub update_rate: UpdateRate,
    pub sot_curve: SotCurve,
    /// Sign of the temperature coefficient of offset
    pub tco_sign: Polarity,
    /// Sign of the temperature coefficient of gain
    pub tcg_sign: Polarity,
    /// Sign of the second-order term of offset vs. bridge
    pub sot_bridge_sign: Polarity,
    /// Sign of the second-order term of offset vs. temperature
    pub sot_tco_sign: Polarity,
    /// Sign of the second-order term of gain vs. temperature
    pub sot_tcg_sign: Polarity,
    /// Sign of the second-order linearity term of the temperature reading
    pub sot_t_sign: Polarity,
}

impl Readable for ZmdiConfig1 {
    type Out = ZmdiConfig1Fields;

    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ZmdiConfig1Fields {
            clock_speed: ClockSpeed::from(((word >> 3) & 0b1) as u8),
            comm_type: CommType::from(((word >> 4) & 0b1) as u8),
            sleep_mode: OperationMode::from(((word >> 5) & 0b1) as u8),
            update_rate: UpdateRate::from(((word >> 6) & 0b11) as u8),
            sot_curve: SotCurve::from(((word >> 9) & 0b1) as u8),
            tco_sign: Polarity::from_negative_bit(word >> 10),
            tcg_sign: Polarity::from_negative_bit(word >> 11),
            sot_bridge_sign: Polarity::from_negative_bit(word >> 12),
            sot_tco_sign: Polarity::from_negative_bit(word >> 13),
            sot_tcg_sign: Polarity::from_negative_bit(word >> 14),
            sot_t_sign: Polarity::from_negative_bit(word >> 15),
        })
    }
}

impl Writable for ZmdiConfig1 {
    type In = ZmdiConfig1Fields;

    fn encode(v: &Self::In) -> u16 {
        let clock_speed: u8 = v.clock_speed.into();
        let comm_type: u8 = v.comm_type.into();
        let sleep_mode: u8 = v.sleep_mode.into();
        let update_rate: u8 = v.update_rate.into();
        let sot_curve: u8 = v.sot_curve.into();

        RESERVED_PATTERN
            | (clock_speed as u16) << 3
            | (comm_type as u16) << 4
            | (sleep_mode as u16) << 5
            | (update_rate as u16) << 6
            | (sot_curve as u16) << 9
            | v.tco_sign.negative_bit() << 10
            | v.tcg_sign.negative_bit() << 11
            | v.sot_bridge_sign.negative_bit() << 12
            | v.sot_tco_sign.negative_bit() << 13
            | v.sot_tcg_sign.negative_bit() << 14
            | v.sot_t_sign.negative_bit() << 15
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSpeed {
    Mhz4,
    Mhz1,
}

impl From<u8> for ClockSpeed {
    fn from(field: u8) -> Self {
        match field {
            0 => ClockSpeed::Mhz4,
            _ => ClockSpeed::Mhz1,
        }
    }
}

impl From<ClockSpeed> for u8 {
    fn from(v: ClockSpeed) -> u8 {
        match v {
            ClockSpeed::Mhz4 => 0,
            ClockSpeed::Mhz1 => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommType {
    I2c,
    Spi,
}

impl From<u8> for CommType {
    fn from(field: u8) -> Self {
        match field {
            0 => CommType::I2c,
            _ => CommType::Spi,
        }
    }
}

impl From<CommType> for u8 {
    fn from(v: CommType) -> u8 {
        match v {
            CommType::I2c => 0,
            CommType::Spi => 1,
        }
    }
}

/// How the device schedules conversions in normal operation mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// Conversions run continuously at the configured [`UpdateRate`]
    Continuous,
    /// The device sleeps between measurement requests
    OnDemand,
}

impl From<u8> for OperationMode {
    fn from(field: u8) -> Self {
        match field {
            0 => OperationMode::Continuous,
            _ => OperationMode::OnDemand,
        }
    }
}

impl From<OperationMode> for u8 {
    fn from(v: OperationMode) -> u8 {
        match v {
            OperationMode::Continuous => 0,
            OperationMode::OnDemand => 1,
        }
    }
}

/// Conversion period in continuous mode.
///
/// | rate      | 1 MHz    | 4 MHz   |
/// |-----------|----------|---------|
/// | `Fastest` | 1.6 ms   | 0.5 ms  |
/// | `Faster`  | 5.0 ms   | 1.5 ms  |
/// | `Slower`  | 25.0 ms  | 6.5 ms  |
/// | `Slowest` | 125.0 ms | 32.0 ms |
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateRate {
    Fastest,
    Faster,
    Slower,
    Slowest,
}

impl From<u8> for UpdateRate {
    fn from(field: u8) -> Self {
        match field {
            0b00 => UpdateRate::Fastest,
            0b01 => UpdateRate::Faster,
            0b10 => UpdateRate::Slower,
            _ => UpdateRate::Slowest,
        }
    }
}

impl From<UpdateRate> for u8 {
    fn from(v: UpdateRate) -> u8 {
        match v {
            UpdateRate::Fastest => 0b00,
            UpdateRate::Faster => 0b01,
            UpdateRate::Slower => 0b10,
            UpdateRate::Slowest => 0b11,
        }
    }
}

/// Shape of the second-order temperature correction curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SotCurve {
    Parabolic,
    SShaped,
}

impl From<u8> for SotCurve {
    fn from(field: u8) -> Self {
        match field {
            0 => SotCurve::Parabolic,
            _ => SotCurve::SShaped,
        }
    }
}

impl From<SotCurve> for u8 {
    fn from(v: SotCurve) -> u8 {
        match v {
            SotCurve::Parabolic => 0,
            SotCurve::SShaped => 1,
        }
    }
}
