//! ### ZMDI_Config2 - Addressing, diagnostics and locks (`0x02`, 16 bits, R/W)
//!
//! | bits    | field                                            |
//! |---------|--------------------------------------------------|
//! | 0       | SPI clock polarity, `1` = positive (!)           |
//! | 1       | sensor connection check enable                   |
//! | 2       | sensor short check enable                        |
//! | 3..=9   | 7-bit I2C address                                |
//! | 10..=12 | address lock, `011` = locked                     |
//! | 13..=15 | EEPROM lock, `011` = locked                      |
//!
//! **Locks are permanent.** Once the part starts normal operation with the address lock set it only answers
//! on the programmed address; once the EEPROM lock is set the EEPROM can no longer be written.
#![doc(alias = "ZMDI_Config2")]
use embedded_hal::i2c::SevenBitAddress;
use crate::register::{InvalidRegisterField, Polarity, Readable, Reg, Writable};

/// Marker struct for the ZMDI_Config2 (0x02) register
pub struct ZmdiConfig2;
impl Reg for ZmdiConfig2 { const ADDR: u8 = 0x02; }

const LOCKED_PATTERN: u16 = 0b011;
const UNLOCKED_PATTERN: u16 = 0b000;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZmdiConfig2Fields {
    pub spi_polarity: Polarity,
    pub enable_sensor_connection_check: bool,
    pub enable_sensor_short_check: bool,
    /// Only the low 7 bits are stored
    pub address: SevenBitAddress,
    pub lock_address: bool,
    pub lock_eeprom: bool,
}

impl Readable for ZmdiConfig2 {
    type Out = ZmdiConfig2Fields;

    fn decode(word: u16) -> Result<Self::Out, InvalidRegisterField> {
        Ok(ZmdiConfig2Fields {
            spi_polarity: Polarity::from_positive_bit(word),
            enable_sensor_connection_check: (word & 0b010) != 0,
            enable_sensor_short_check: (word & 0b100) != 0,
            address: ((word >> 3) & 0b111_1111) as u8,
            lock_address: ((word >> 10) & 0b111) == LOCKED_PATTERN,
            lock_eeprom: ((word >> 13) & 0b111) == LOCKED_PATTERN,
        })
    }
}

impl Writable for ZmdiConfig2 {
    type In = ZmdiConfig2Fields;

    fn encode(v: &Self::In) -> u16 {
        let mut value = v.spi_polarity.positive_bit();
        if v.enable_sensor_connection_check { value |= 0b010; }
        if v.enable_sensor_short_check { value |= 0b100; }
        value |= ((v.address & 0b111_1111) as u16) << 3;
        value |= lock_pattern(v.lock_address) << 10;
        value |= lock_pattern(v.lock_eeprom) << 13;

        value
    }
}

fn lock_pattern(locked: bool) -> u16 {
    if locked { LOCKED_PATTERN } else { UNLOCKED_PATTERN }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zmdi_config2_decode() {
        let reg = ZmdiConfig2::decode(0b0000_0000_0000_0000).unwrap();
        assert_eq!(Polarity::Negative, reg.spi_polarity);
        assert!(!reg.enable_sensor_connection_check);
        assert!(!reg.enable_sensor_short_check);
        assert!(!reg.lock_address);
        assert!(!reg.lock_eeprom);

        let reg = ZmdiConfig2::decode(0b0000_0000_0000_0111).unwrap();
        assert_eq!(Polarity::Positive, reg.spi_polarity);
        assert!(reg.enable_sensor_connection_check);
        assert!(reg.enable_sensor_short_check);

        // Default factory address 0x28
        let reg = ZmdiConfig2::decode(0x28 << 3).unwrap();
        assert_eq!(0x28, reg.address);
    }

    #[test]
    fn zmdi_config2_decode_locks_only_on_exact_pattern() {
        for pattern in 0u16..=0b111 {
            let reg = ZmdiConfig2::decode((pattern << 10) | (pattern << 13)).unwrap();
            assert_eq!(pattern == 0b011, reg.lock_address, "address lock pattern {:03b}", pattern);
            assert_eq!(pattern == 0b011, reg.lock_eeprom, "eeprom lock pattern {:03b}", pattern);
        }
    }

    #[test]
    fn zmdi_config2_encode() {
        let fields = ZmdiConfig2Fields {
            spi_polarity: Polarity::Negative,
            enable_sensor_connection_check: true,
            enable_sensor_short_check: true,
            address: 0x33,
            lock_address: true,
            lock_eeprom: false,
        };
        assert_eq!(0b000_011_0110011_1_1_0, ZmdiConfig2::encode(&fields));

        let fields = ZmdiConfig2Fields {
            spi_polarity: Polarity::Positive,
            enable_sensor_connection_check: false,
            enable_sensor_short_check: false,
            address: 0x7F,
            lock_address: false,
            lock_eeprom: true,
        };
        assert_eq!(0b011_000_1111111_0_0_1, ZmdiConfig2::encode(&fields));
        assert_eq!(fields, ZmdiConfig2::decode(ZmdiConfig2::encode(&fields)).unwrap());
    }

    #[test]
    fn zmdi_config2_every_record_survives_encode_decode() {
        for address in 0u8..=0x7F {
            for spi_polarity in [Polarity::Positive, Polarity::Negative] {
                for enable_sensor_connection_check in [false, true] {
                    for enable_sensor_short_check in [false, true] {
                        for lock_address in [false, true] {
                            for lock_eeprom in [false, true] {
                                let fields = ZmdiConfig2Fields {
                                    spi_polarity,
                                    enable_sensor_connection_check,
                                    enable_sensor_short_check,
                                    address,
                                    lock_address,
                                    lock_eeprom,
                                };
                                let word = ZmdiConfig2::encode(&fields);
                                assert_eq!(Ok(fields), ZmdiConfig2::decode(word), "0x{:04x}", word);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn zmdi_config2_encode_normalizes_foreign_lock_patterns() {
        // 0b101 is not "locked", so it is written back as unlocked
        let fields = ZmdiConfig2::decode(0b101 << 10).unwrap();
        assert_eq!(0, ZmdiConfig2::encode(&fields) >> 10);
    }
}
