//! Errors that can occur when using the ZSC31014 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication
//! with the ZSC31014. It is generic over the underlying bus (I2C) error type and the power pin error type.

use crate::register::gain_b::GainOutOfRange;
use crate::register::InvalidRegisterField;
use crate::zsc31014::ProtocolState;

/// This represents all possible errors that can occur when using the ZSC31014 device.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zsc31014Error<BusError, PinError> {
    /// An error has occurred in the I2C driver
    Bus(BusError),

    /// Driving the power-control pin failed
    Pin(PinError),

    /// The status byte of a command mode reply was not `0x5A`.
    ///
    /// Usually means the device is not in command mode, or the wrong address is being used.
    InvalidResponse { status: u8 },

    /// Reading from a register returned a bit pattern that does not map to any known value.
    ///
    /// Could possibly indicate a bug in the driver, an unprogrammed EEPROM, or less likely, a faulty chip.
    UnexpectedRegisterData(InvalidRegisterField),

    /// The register code is past `0x13`, or names a read-only word and was used for a write.
    InvalidRegister(u8),

    /// The gain value can not be represented by the GAIN_B register (must be within `[0, 32)`).
    GainOutOfRange,

    /// Bias calibration was asked to average zero samples.
    InvalidSampleCount,

    /// The requested bus address does not fit in 7 bits.
    InvalidAddress(u8),

    /// The operation is not available in the protocol state the device is currently in.
    WrongMode {
        expected: ProtocolState,
        actual: ProtocolState,
    },
}

impl<BusError, PinError> From<InvalidRegisterField> for Zsc31014Error<BusError, PinError> {
    fn from(value: InvalidRegisterField) -> Self {
        Zsc31014Error::UnexpectedRegisterData(value)
    }
}

impl<BusError, PinError> From<GainOutOfRange> for Zsc31014Error<BusError, PinError> {
    fn from(_: GainOutOfRange) -> Self {
        Zsc31014Error::GainOutOfRange
    }
}
