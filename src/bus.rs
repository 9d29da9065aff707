//! Transport abstraction between the driver and the two-wire bus.
//!
//! The ZSC31014 protocol is frame based: command mode exchanges fixed 3-byte frames, normal operation streams
//! 2-byte samples. Neither uses register-pointer writes, so a [`Bus`] only needs plain addressed reads and writes.
//! The bus also owns the device address, which changes exactly once when commissioning programs a new one.
use embedded_hal::i2c::SevenBitAddress;

/// Factory default I2C address of the ZSC31014.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x28;

pub trait Bus {
    type Error;

    /// Writes `frame` to the device in a single transaction.
    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buffer` from the device in a single transaction.
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// The address transactions are currently sent to.
    fn address(&self) -> SevenBitAddress;

    fn set_address(&mut self, address: SevenBitAddress);
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = <I2cType as embedded_hal::i2c::ErrorType>::Error;

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, frame)?;

        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(self.address, buffer)?;

        Ok(())
    }

    fn address(&self) -> SevenBitAddress {
        self.address
    }

    fn set_address(&mut self, address: SevenBitAddress) {
        self.address = address;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn i2c_frames_use_current_address() {
        let expectations = [
            I2cTransaction::write(0x28, vec![0xA0, 0x00, 0x00]),
            I2cTransaction::read(0x28, vec![0x5A, 0x12, 0x34]),
            I2cTransaction::write(0x33, vec![0x80, 0x00, 0x00]),
        ];
        let mut bus = I2c::new(I2cMock::new(&expectations), DEFAULT_ADDRESS);

        bus.write(&[0xA0, 0x00, 0x00]).unwrap();
        let mut reply = [0u8; 3];
        bus.read(&mut reply).unwrap();
        assert_eq!([0x5A, 0x12, 0x34], reply);

        bus.set_address(0x33);
        assert_eq!(0x33, bus.address());
        bus.write(&[0x80, 0x00, 0x00]).unwrap();

        bus.release().done();
    }

    #[test]
    fn i2c_propagates_transport_errors() {
        let expectations = [
            I2cTransaction::read(0x28, vec![0x00, 0x00]).with_error(ErrorKind::Other),
        ];
        let mut bus = I2c::new(I2cMock::new(&expectations), DEFAULT_ADDRESS);

        let mut sample = [0u8; 2];
        assert_eq!(Err(ErrorKind::Other), bus.read(&mut sample));

        bus.release().done();
    }
}
