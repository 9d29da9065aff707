use crate::bus::{Bus, I2c};
use crate::calibration::{BiasAccumulator, LinearCalibration};
use crate::error::Zsc31014Error;
use crate::register::b_config::{BConfig, BConfigFields};
use crate::register::cmd::Command;
use crate::register::correction::{SotBridge, SotTcg, SotTco, Tcg, Tco};
use crate::register::cust_id::{CustId0, CustId1, CustId2, FactoryId};
use crate::register::gain_b::{GainB, GainValue};
use crate::register::offset_b::OffsetB;
use crate::register::zmdi_config1::{SotCurve, ZmdiConfig1, ZmdiConfig1Fields};
use crate::register::zmdi_config2::{ZmdiConfig2, ZmdiConfig2Fields};
use crate::register::{is_register, is_writable, EepromDump, Readable, Writable, REGISTER_COUNT};
use crate::sample::RawSample;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::SevenBitAddress;

/// Type alias for a Zsc31014 chip communicating over I2C
type Zsc31014I2c<T, P, D> = Zsc31014<I2c<T>, P, D>;

/// Status byte that prefixes every command mode reply.
const COMMAND_MODE_STATUS: u8 = 0x5A;

/// How long the supply is held low, and then high, when power cycling.
const POWER_HOLD_US: u32 = 500;

/// Settle time after Start_CM and between a read command and its reply.
const COMMAND_SETTLE_US: u32 = 100;

/// Spacing between consecutive reads of an EEPROM dump.
const DUMP_SPACING_US: u32 = 10;

/// Spacing between samples averaged into the bias.
const BIAS_SAMPLE_INTERVAL_MS: u32 = 100;

/// Where the driver believes the device is in its power-on protocol.
///
/// The ZSC31014 only accepts Start_CM inside a short window after power-on, and leaves command mode only through
/// Start_NOM. Register access is limited to [`CommandMode`](ProtocolState::CommandMode), sample reads to
/// [`NormalOperation`](ProtocolState::NormalOperation).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolState {
    /// Nothing has been sent yet, or a power cycle did not complete
    Unpowered,
    CommandMode,
    NormalOperation,
}

/// Main Zsc31014 driver struct
///
/// Owns the bus adapter, the pin switching the sensor supply, and a delay provider. The supply pin is what makes
/// command mode reachable: the part only listens for Start_CM right after it powers up.
pub struct Zsc31014<B, P, D> {
    pub(crate) bus: B,
    pub(crate) power: P,
    pub(crate) delay: D,
    pub(crate) state: ProtocolState,
    calibration: LinearCalibration,
}

/// Type alias used to simplify return types throughout the driver
pub type Zsc31014Result<T, BusError, PinError> = Result<T, Zsc31014Error<BusError, PinError>>;

impl<T, P, D> Zsc31014I2c<T, P, D>
where
    T: embedded_hal::i2c::I2c,
    P: OutputPin,
    D: DelayNs,
{
    /// Constructs a new Zsc31014 driver instance that communicates over I2C at `address`.
    ///
    /// Nothing is sent on the bus; the device is assumed [`Unpowered`](ProtocolState::Unpowered) until
    /// [`power_cycle`](Self::power_cycle) or [`start_command_mode`](Self::start_command_mode) is called.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::digital::OutputPin;
    /// # use embedded_hal::i2c::I2c;
    /// # use zsc31014_rs::Zsc31014Result;
    ///  use zsc31014_rs::Zsc31014;
    ///  use zsc31014_rs::bus::DEFAULT_ADDRESS;
    /// # fn demo<I: I2c, P: OutputPin, D: DelayNs>(i2c: I, pin: P, delay: D) -> Zsc31014Result<(), I::Error, P::Error> {
    ///
    ///  let mut device = Zsc31014::new_i2c(i2c, DEFAULT_ADDRESS, pin, delay);
    ///  device.power_cycle()?;
    ///  let raw = device.read_raw_sample()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c(i2c: T, address: SevenBitAddress, power: P, delay: D) -> Self {
        Self::new(I2c::new(i2c, address), power, delay)
    }
}

impl<B, P, D> Zsc31014<B, P, D>
where
    B: Bus,
    P: OutputPin,
    D: DelayNs,
{
    /// Creates a new driver on top of any [`Bus`] implementation.
    pub fn new(bus: B, power: P, delay: D) -> Self {
        Zsc31014 {
            bus,
            power,
            delay,
            state: ProtocolState::Unpowered,
            calibration: LinearCalibration::identity(),
        }
    }

    /// Gives back the bus, the power pin and the delay.
    pub fn release(self) -> (B, P, D) {
        (self.bus, self.power, self.delay)
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// The address frames are currently sent to.
    pub fn address(&self) -> SevenBitAddress {
        self.bus.address()
    }

    fn expect_state(&self, expected: ProtocolState) -> Zsc31014Result<(), B::Error, P::Error> {
        if self.state != expected {
            return Err(Zsc31014Error::WrongMode { expected, actual: self.state });
        }

        Ok(())
    }

    fn send(&mut self, command: Command, data: u16) -> Zsc31014Result<(), B::Error, P::Error> {
        let [high, low] = data.to_be_bytes();
        self.bus
            .write(&[command.into(), high, low])
            .map_err(Zsc31014Error::Bus)
    }

    /// Switches the sensor supply off and on again.
    ///
    /// If no Start_CM arrives within the power-on window the part starts streaming measurements, so afterwards the
    /// driver is in [`NormalOperation`](ProtocolState::NormalOperation).
    pub fn power_cycle(&mut self) -> Zsc31014Result<(), B::Error, P::Error> {
        self.state = ProtocolState::Unpowered;

        self.power.set_low().map_err(Zsc31014Error::Pin)?;
        self.delay.delay_us(POWER_HOLD_US);
        self.power.set_high().map_err(Zsc31014Error::Pin)?;
        self.delay.delay_us(POWER_HOLD_US);

        self.state = ProtocolState::NormalOperation;
        log_debug!("Power cycled");

        Ok(())
    }

    /// Power cycles the part and sends Start_CM (0xA0) inside the power-on window.
    ///
    /// Any state is accepted since the power cycle resets the device anyway.
    pub fn start_command_mode(&mut self) -> Zsc31014Result<(), B::Error, P::Error> {
        self.power_cycle()?;
        self.send(Command::StartCommandMode, 0)?;
        self.state = ProtocolState::CommandMode;
        self.delay.delay_us(COMMAND_SETTLE_US);
        log_debug!("Entered command mode at 0x{=u8:x}", self.bus.address());

        Ok(())
    }

    /// Sends Start_NOM (0x80).
    ///
    /// **Note:** This is one-way. Getting back into command mode requires [`start_command_mode`](Self::start_command_mode),
    /// which power cycles the part.
    pub fn start_normal_operation(&mut self) -> Zsc31014Result<(), B::Error, P::Error> {
        self.expect_state(ProtocolState::CommandMode)?;
        self.send(Command::StartNormalOperation, 0)?;
        self.state = ProtocolState::NormalOperation;
        log_debug!("Entered normal operation");

        Ok(())
    }

    /// Reads the EEPROM word with register code `code` (`0x00..=0x13`).
    ///
    /// Sends the read command, waits for the part to fetch the word and reads the 3-byte reply. A reply whose
    /// status byte is not `0x5A` is rejected with [`Zsc31014Error::InvalidResponse`].
    ///
    /// Codes outside the register file are rejected with [`Zsc31014Error::InvalidRegister`] before anything is sent,
    /// so this can never issue a mode command.
    pub fn read_register(&mut self, code: u8) -> Zsc31014Result<u16, B::Error, P::Error> {
        if !is_register(code) {
            return Err(Zsc31014Error::InvalidRegister(code));
        }
        self.expect_state(ProtocolState::CommandMode)?;
        self.send(Command::Read(code), 0)?;
        self.delay.delay_us(COMMAND_SETTLE_US);

        let mut reply = [0u8; 3];
        self.bus.read(&mut reply).map_err(Zsc31014Error::Bus)?;

        if reply[0] != COMMAND_MODE_STATUS {
            log_warn!("Read of 0x{=u8:x} returned status 0x{=u8:x}", code, reply[0]);
            return Err(Zsc31014Error::InvalidResponse { status: reply[0] });
        }

        Ok(u16::from_be_bytes([reply[1], reply[2]]))
    }

    /// Writes `value` to the EEPROM word with register code `code`, using the write command `0x40 + code`.
    ///
    /// The word is not read back. Codes outside the register file and the read-only factory words are rejected with
    /// [`Zsc31014Error::InvalidRegister`] before anything is sent.
    pub fn write_register(&mut self, code: u8, value: u16) -> Zsc31014Result<(), B::Error, P::Error> {
        if !is_writable(code) {
            return Err(Zsc31014Error::InvalidRegister(code));
        }
        self.expect_state(ProtocolState::CommandMode)?;
        self.send(Command::Write(code), value)
    }

    /// Read a register using a **typed marker** from [`crate::register`].
    ///
    /// The register code comes from `R::ADDR` and the word is decoded by `R::decode(...)`, which may return
    /// [`InvalidRegisterField`](crate::register::InvalidRegisterField) for bit patterns with no meaning.
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use zsc31014_rs::{Zsc31014, Zsc31014Result};
    /// # use zsc31014_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::digital::OutputPin;
    /// # fn demo<B: Bus, P: OutputPin, D: DelayNs>(mut device: Zsc31014<B, P, D>) -> Zsc31014Result<(), B::Error, P::Error> {
    /// use zsc31014_rs::register::b_config::BConfig;
    /// device.start_command_mode()?;
    /// let bridge = device.read::<BConfig>()?;
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Zsc31014Result<R::Out, B::Error, P::Error> {
        let word = self.read_register(R::ADDR)?;

        Ok(R::decode(word)?)
    }

    /// Write a register using a **typed marker** from [`crate::register`].
    ///
    /// This overwrites the whole word. Use [`modify`](Self::modify) to change a few fields and keep the rest.
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write_register(W::ADDR, W::encode(v))
    }

    /// Read-modify-write of a register: decodes the current word, lets `f` change it and writes it back.
    pub fn modify<R>(&mut self, f: impl FnOnce(&mut <R as Readable>::Out)) -> Zsc31014Result<(), B::Error, P::Error>
    where
        R: Readable + Writable<In = <R as Readable>::Out>,
    {
        let mut fields = self.read::<R>()?;
        f(&mut fields);

        self.write::<R>(&fields)
    }

    /// Reads one 14-bit bridge value, `0..=16383`.
    pub fn read_raw_sample(&mut self) -> Zsc31014Result<u16, B::Error, P::Error> {
        Ok(self.read_sample()?.bridge)
    }

    /// Reads one sample frame including its status bits.
    pub fn read_sample(&mut self) -> Zsc31014Result<RawSample, B::Error, P::Error> {
        self.expect_state(ProtocolState::NormalOperation)?;

        let mut frame = [0u8; 2];
        self.bus.read(&mut frame).map_err(Zsc31014Error::Bus)?;

        Ok(RawSample::from_bytes(frame))
    }

    /// Sets the correction polynomial `scale * raw + intercept`. The current bias is kept.
    pub fn set_linear_calibration(&mut self, scale: f32, intercept: f32) {
        self.calibration.scale = scale;
        self.calibration.intercept = intercept;
    }

    /// Replaces polynomial and bias at once, e.g. with values stored from an earlier run.
    pub fn set_calibration(&mut self, calibration: LinearCalibration) {
        self.calibration = calibration;
    }

    pub fn linear_calibration(&self) -> LinearCalibration {
        self.calibration
    }

    /// Back to `scale = 1`, `intercept = 0`, `bias = 0`.
    pub fn reset_calibration(&mut self) {
        self.calibration = LinearCalibration::identity();
    }

    /// Reads a raw sample and returns `scale * raw + intercept - bias`.
    pub fn read_corrected_value(&mut self) -> Zsc31014Result<f32, B::Error, P::Error> {
        let raw = self.read_raw_sample()?;

        Ok(self.calibration.correct(raw))
    }

    /// Measures the bias as the mean of `sample_count` calibrated samples taken 100 ms apart.
    ///
    /// The current bias does not take part in the estimate. The new bias is stored and returned. Take this at a
    /// known reference condition, such as an unloaded load cell.
    ///
    /// Returns [`Zsc31014Error::InvalidSampleCount`] if `sample_count` is zero.
    pub fn calibrate_bias(&mut self, sample_count: u32) -> Zsc31014Result<f32, B::Error, P::Error> {
        if sample_count == 0 {
            return Err(Zsc31014Error::InvalidSampleCount);
        }

        let mut acc = BiasAccumulator::new();
        for _ in 0..sample_count {
            let raw = self.read_raw_sample()?;
            acc.add(&self.calibration, raw);
            self.delay.delay_ms(BIAS_SAMPLE_INTERVAL_MS);
        }

        log_debug!("Bias sums: {=f64} (raw {=u64}) over {=u32} samples", acc.sum(), acc.raw_sum(), acc.count());

        let bias = acc.mean().ok_or(Zsc31014Error::InvalidSampleCount)?;
        self.calibration.bias = bias;
        log_debug!("Bias set to {=f32} (raw mean {})", bias, acc.raw_mean());

        Ok(bias)
    }

    pub fn customer_id0(&mut self) -> Zsc31014Result<u16, B::Error, P::Error> {
        self.read::<CustId0>()
    }

    pub fn customer_id1(&mut self) -> Zsc31014Result<u16, B::Error, P::Error> {
        self.read::<CustId1>()
    }

    pub fn customer_id2(&mut self) -> Zsc31014Result<u16, B::Error, P::Error> {
        self.read::<CustId2>()
    }

    pub fn set_customer_id0(&mut self, id: u16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<CustId0>(&id)
    }

    pub fn set_customer_id1(&mut self, id: u16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<CustId1>(&id)
    }

    pub fn set_customer_id2(&mut self, id: u16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<CustId2>(&id)
    }

    /// Reads the three customer ID words and unpacks the factory traceability data from them.
    pub fn factory_id(&mut self) -> Zsc31014Result<FactoryId, B::Error, P::Error> {
        let cust_id0 = self.customer_id0()?;
        let cust_id1 = self.customer_id1()?;
        let cust_id2 = self.customer_id2()?;

        Ok(FactoryId::from_customer_ids(cust_id0, cust_id1, cust_id2))
    }

    /// Returns the interface and correction configuration from the ZMDI_Config1 (0x01) register.
    pub fn zmdi_config1(&mut self) -> Zsc31014Result<ZmdiConfig1Fields, B::Error, P::Error> {
        self.read::<ZmdiConfig1>()
    }

    pub fn set_zmdi_config1(&mut self, config: &ZmdiConfig1Fields) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<ZmdiConfig1>(config)
    }

    /// Returns the address and lock configuration from the ZMDI_Config2 (0x02) register.
    pub fn zmdi_config2(&mut self) -> Zsc31014Result<ZmdiConfig2Fields, B::Error, P::Error> {
        self.read::<ZmdiConfig2>()
    }

    /// **Note:** A new address only takes effect after the next power cycle, and the driver keeps using the
    /// current one. [`commission`](Self::commission) takes care of both.
    pub fn set_zmdi_config2(&mut self, config: &ZmdiConfig2Fields) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<ZmdiConfig2>(config)
    }

    /// Returns the bridge front-end configuration from the B_Config (0x0F) register.
    pub fn bridge_config(&mut self) -> Zsc31014Result<BConfigFields, B::Error, P::Error> {
        self.read::<BConfig>()
    }

    pub fn set_bridge_config(&mut self, config: &BConfigFields) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<BConfig>(config)
    }

    /// Bridge offset correction from the Offset_B (0x03) register.
    pub fn offset(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<OffsetB>()
    }

    pub fn set_offset(&mut self, offset: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<OffsetB>(&offset)
    }

    /// Bridge gain correction from the Gain_B (0x04) register.
    pub fn gain(&mut self) -> Zsc31014Result<f32, B::Error, P::Error> {
        Ok(self.read::<GainB>()?.value())
    }

    /// Writes the bridge gain correction.
    ///
    /// Returns [`Zsc31014Error::GainOutOfRange`] without touching the bus if `gain` is outside `[0, 32)`.
    pub fn set_gain(&mut self, gain: f32) -> Zsc31014Result<(), B::Error, P::Error> {
        let gain = GainValue::new(gain)?;

        self.write::<GainB>(&gain)
    }

    pub fn second_order_curve(&mut self) -> Zsc31014Result<SotCurve, B::Error, P::Error> {
        Ok(self.zmdi_config1()?.sot_curve)
    }

    /// Selects the shape of the second-order bridge correction. The other ZMDI_Config1 fields are preserved.
    pub fn set_second_order_curve(&mut self, curve: SotCurve) -> Zsc31014Result<(), B::Error, P::Error> {
        self.modify::<ZmdiConfig1>(|config| config.sot_curve = curve)
    }

    pub fn tco(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<Tco>()
    }

    pub fn set_tco(&mut self, coefficient: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<Tco>(&coefficient)
    }

    pub fn tcg(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<Tcg>()
    }

    pub fn set_tcg(&mut self, coefficient: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<Tcg>(&coefficient)
    }

    pub fn sot_tco(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<SotTco>()
    }

    pub fn set_sot_tco(&mut self, coefficient: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<SotTco>(&coefficient)
    }

    pub fn sot_tcg(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<SotTcg>()
    }

    pub fn set_sot_tcg(&mut self, coefficient: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<SotTcg>(&coefficient)
    }

    pub fn sot_bridge(&mut self) -> Zsc31014Result<i16, B::Error, P::Error> {
        self.read::<SotBridge>()
    }

    pub fn set_sot_bridge(&mut self, coefficient: i16) -> Zsc31014Result<(), B::Error, P::Error> {
        self.write::<SotBridge>(&coefficient)
    }

    /// Reads every EEPROM word, `0x00` to `0x13`.
    pub fn dump_eeprom(&mut self) -> Zsc31014Result<EepromDump, B::Error, P::Error> {
        let mut words = [0u16; REGISTER_COUNT];
        for (code, word) in words.iter_mut().enumerate() {
            *word = self.read_register(code as u8)?;
            log_debug!("0x{=u8:x}: 0x{=u16:x}", code as u8, *word);
            self.delay.delay_us(DUMP_SPACING_US);
        }

        Ok(EepromDump::new(words))
    }

    pub fn is_eeprom_locked(&mut self) -> Zsc31014Result<bool, B::Error, P::Error> {
        Ok(self.zmdi_config2()?.lock_eeprom)
    }

    /// Sets the EEPROM lock pattern in ZMDI_Config2.
    ///
    /// **Note:** Once the part powers up locked, command mode writes are refused for good.
    pub fn lock_eeprom(&mut self) -> Zsc31014Result<(), B::Error, P::Error> {
        self.modify::<ZmdiConfig2>(|config| config.lock_eeprom = true)?;
        log_info!("EEPROM locked");

        Ok(())
    }
}
