//! Normal operation mode sample frames.
//!
//! In normal operation the device answers a plain 2-byte read with its latest bridge conversion. The two most
//! significant bits of the first byte are status flags, the remaining 14 bits are the ratiometric bridge value.

/// Largest raw bridge value (14 bits).
pub const MAX_RAW: u16 = 0x3FFF;

/// Status prefix of a sample frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleStatus {
    /// Fresh data since the last read
    Valid,
    /// The device is in command mode; the data bits are meaningless
    CommandMode,
    /// The value was already read before
    Stale,
    /// A diagnostic condition (e.g. broken bridge connection) was detected
    Diagnostic,
}

impl From<u8> for SampleStatus {
    fn from(field: u8) -> Self {
        match field & 0b11 {
            0b00 => SampleStatus::Valid,
            0b01 => SampleStatus::CommandMode,
            0b10 => SampleStatus::Stale,
            _ => SampleStatus::Diagnostic,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub status: SampleStatus,
    /// Ratiometric bridge value, `0..=16383`
    pub bridge: u16,
}

impl RawSample {
    pub fn from_bytes(frame: [u8; 2]) -> Self {
        Self {
            status: SampleStatus::from(frame[0] >> 6),
            bridge: u16::from_be_bytes([frame[0] & 0b0011_1111, frame[1]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_masks_status_bits() {
        let sample = RawSample::from_bytes([0xFF, 0xFF]);
        assert_eq!(MAX_RAW, sample.bridge);
        assert_eq!(SampleStatus::Diagnostic, sample.status);

        let sample = RawSample::from_bytes([0b1000_0001, 0x02]);
        assert_eq!(0x0102, sample.bridge);
        assert_eq!(SampleStatus::Stale, sample.status);
    }

    #[test]
    fn sample_status_decode() {
        assert_eq!(SampleStatus::Valid, RawSample::from_bytes([0b0000_0000, 0]).status);
        assert_eq!(SampleStatus::CommandMode, RawSample::from_bytes([0b0100_0000, 0]).status);
        assert_eq!(SampleStatus::Stale, RawSample::from_bytes([0b1000_0000, 0]).status);
        assert_eq!(SampleStatus::Diagnostic, RawSample::from_bytes([0b1100_0000, 0]).status);
    }
}
