//! One-time commissioning of a fresh part.
//!
//! [`Zsc31014::commission`] walks the part through command mode, programs the interface, address and bridge
//! front-end, writes the bridge offset and finally starts normal operation at the new address. Every step is
//! followed by a 150 ms settle so the EEPROM writes can complete.
//!
//! What happens when a step fails is decided by
//! [`CommissioningConfig::continue_on_error`](crate::config::CommissioningConfig::continue_on_error): either the
//! failure is recorded in the returned [`CommissioningReport`] and the sequence carries on, or the error is returned
//! straight away.
use crate::bus::Bus;
use crate::config::CommissioningConfig;
use crate::error::Zsc31014Error;
use crate::register::b_config::{BConfig, MuxMode};
use crate::register::cust_id::FactoryId;
use crate::register::zmdi_config1::{UpdateRate, ZmdiConfig1};
use crate::register::zmdi_config2::ZmdiConfig2;
use crate::{Zsc31014, Zsc31014Result};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;

/// Settle time after each step.
const COMMISSION_SETTLE_MS: u32 = 150;

/// Preamp offset programmed into B_Config.
const COMMISSION_PRE_AMP_OFFSET: u8 = 0b0001;

const MAX_FAILURES: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommissioningStep {
    /// Power cycle and Start_CM
    EnterCommandMode,
    /// Read the customer ID words
    ReadFactoryId,
    /// ZMDI_Config1: fastest update rate
    ConfigureInterface,
    /// ZMDI_Config2: diagnostics, new address and locks
    ConfigureAddress,
    /// B_Config: full bridge front-end with the selected preamp gain
    ConfigureBridge,
    /// Offset_B
    WriteOffset,
    /// Offset_B and Gain_B read back, verbose runs only
    ReadBack,
    /// Start_NOM
    StartNormalOperation,
}

/// A step that failed while running with `continue_on_error`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepFailure<BusError, PinError> {
    pub step: CommissioningStep,
    pub error: Zsc31014Error<BusError, PinError>,
}

/// Outcome of [`Zsc31014::commission`].
///
/// A clean report means every step went through. Otherwise the part may be partially configured, so check
/// [`failures`](Self::failures) before relying on it.
#[derive(Debug)]
pub struct CommissioningReport<BusError, PinError> {
    continue_on_error: bool,
    failures: Vec<StepFailure<BusError, PinError>, MAX_FAILURES>,
    customer_ids: Option<[u16; 3]>,
    offset: Option<i16>,
    gain: Option<f32>,
}

impl<BusError, PinError> CommissioningReport<BusError, PinError> {
    fn new(continue_on_error: bool) -> Self {
        Self {
            continue_on_error,
            failures: Vec::new(),
            customer_ids: None,
            offset: None,
            gain: None,
        }
    }

    /// Passes `result` through, or records its error when running with `continue_on_error`.
    ///
    /// `Ok(None)` means the step failed and the sequence should carry on.
    fn record<T>(
        &mut self,
        step: CommissioningStep,
        result: Result<T, Zsc31014Error<BusError, PinError>>,
    ) -> Result<Option<T>, Zsc31014Error<BusError, PinError>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                log_warn!("Commissioning step {} failed", step);
                if !self.continue_on_error {
                    return Err(error);
                }

                // Each step records at most once, so this never overflows.
                let _ = self.failures.push(StepFailure { step, error });
                Ok(None)
            }
        }
    }

    pub fn failures(&self) -> &[StepFailure<BusError, PinError>] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Cust_ID0, Cust_ID1 and Cust_ID2 as read during commissioning.
    pub fn customer_ids(&self) -> Option<[u16; 3]> {
        self.customer_ids
    }

    pub fn factory_id(&self) -> Option<FactoryId> {
        self.customer_ids
            .map(|[cust_id0, cust_id1, cust_id2]| FactoryId::from_customer_ids(cust_id0, cust_id1, cust_id2))
    }

    /// Offset_B as read back after writing it. Verbose runs only.
    pub fn offset(&self) -> Option<i16> {
        self.offset
    }

    /// Gain_B as read back after writing the offset. Verbose runs only.
    pub fn gain(&self) -> Option<f32> {
        self.gain
    }
}

impl<B, P, D> Zsc31014<B, P, D>
where
    B: Bus,
    P: OutputPin,
    D: DelayNs,
{
    fn settle(&mut self) {
        self.delay.delay_ms(COMMISSION_SETTLE_MS);
    }

    fn read_customer_ids(&mut self) -> Zsc31014Result<[u16; 3], B::Error, P::Error> {
        Ok([self.customer_id0()?, self.customer_id1()?, self.customer_id2()?])
    }

    fn read_back(&mut self) -> Zsc31014Result<(i16, f32), B::Error, P::Error> {
        Ok((self.offset()?, self.gain()?))
    }

    /// Programs a part with its basic configuration and starts normal operation at `config`'s address.
    ///
    /// This will:
    /// - Power cycle the part and enter command mode
    /// - Read the customer ID words (see [`CommissioningReport::factory_id`])
    /// - Set the fastest update rate in ZMDI_Config1
    /// - Enable the sensor connection and short checks, set and lock the new address in ZMDI_Config2, leaving the
    ///   EEPROM unlocked
    /// - Configure B_Config for a full bridge with B-sink and long integration, the selected preamp gain and a
    ///   preamp offset of 1
    /// - Write the bridge offset, and read back offset and gain if `verbose` is set
    /// - Start normal operation
    /// - Switch the driver over to the new address
    ///
    /// Register updates are read-modify-write; if the read fails the write is skipped. The address switch happens
    /// even when earlier steps failed, since ZMDI_Config2 may have been written anyway.
    ///
    /// Returns [`Zsc31014Error::InvalidAddress`] without touching the bus if the new address does not fit in 7 bits.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::digital::OutputPin;
    /// # use zsc31014_rs::bus::Bus;
    /// # use zsc31014_rs::{Zsc31014, Zsc31014Result};
    ///  use zsc31014_rs::config::CommissioningConfig;
    ///  use zsc31014_rs::register::b_config::PreAmpGain;
    /// # fn demo<B: Bus, P: OutputPin, D: DelayNs>(mut device: Zsc31014<B, P, D>) -> Zsc31014Result<(), B::Error, P::Error> {
    ///
    ///  let config = CommissioningConfig::default()
    ///     .new_address(0x33)
    ///     .pre_amp_gain(PreAmpGain::X96);
    ///  let report = device.commission(&config)?;
    ///  if !report.is_clean() {
    ///     // re-verify before trusting the part
    ///  }
    /// # Ok(())
    /// # }
    /// ```
    pub fn commission(
        &mut self,
        config: &CommissioningConfig,
    ) -> Zsc31014Result<CommissioningReport<B::Error, P::Error>, B::Error, P::Error> {
        let new_address = config.new_address;
        if new_address > 0x7F {
            return Err(Zsc31014Error::InvalidAddress(new_address));
        }

        let mut report = CommissioningReport::new(config.continue_on_error);
        if config.verbose {
            log_info!("Commissioning, new address 0x{=u8:x}", new_address);
        }
        self.settle();

        report.record(CommissioningStep::EnterCommandMode, self.start_command_mode())?;
        self.settle();

        let customer_ids = self.read_customer_ids();
        if let Some(ids) = report.record(CommissioningStep::ReadFactoryId, customer_ids)? {
            report.customer_ids = Some(ids);
            if let Some(id) = report.factory_id() {
                log_info!(
                    "Factory ID: lot {=u32}, wafer {=u8}, x/y {=u8}/{=u16}, address 0x{=u8:x}",
                    id.lot_number,
                    id.wafer_number,
                    id.wafer_x_coordinate,
                    id.wafer_y_coordinate,
                    self.bus.address()
                );
            }
        }
        self.settle();

        let interface = self.modify::<ZmdiConfig1>(|fields| fields.update_rate = UpdateRate::Fastest);
        report.record(CommissioningStep::ConfigureInterface, interface)?;
        if config.verbose {
            log_info!("ZMDI_Config1 set");
        }
        self.settle();

        let address = self.modify::<ZmdiConfig2>(|fields| {
            fields.enable_sensor_connection_check = true;
            fields.enable_sensor_short_check = true;
            fields.address = new_address;
            fields.lock_address = true;
            fields.lock_eeprom = false;
        });
        report.record(CommissioningStep::ConfigureAddress, address)?;
        if config.verbose {
            log_info!("ZMDI_Config2 set");
        }
        self.settle();

        let pre_amp_gain = config.pre_amp_gain;
        let bridge = self.modify::<BConfig>(|fields| {
            fields.disable_nulling = false;
            fields.mux = MuxMode::FullBridge;
            fields.use_b_sink = true;
            fields.use_long_integration = true;
            fields.pre_amp_gain = pre_amp_gain;
            fields.pre_amp_offset = COMMISSION_PRE_AMP_OFFSET;
        });
        report.record(CommissioningStep::ConfigureBridge, bridge)?;
        if config.verbose {
            log_info!("B_Config set");
        }
        self.settle();

        let offset = self.set_offset(config.offset);
        report.record(CommissioningStep::WriteOffset, offset)?;
        if config.verbose {
            let read_back = self.read_back();
            if let Some((offset, gain)) = report.record(CommissioningStep::ReadBack, read_back)? {
                log_info!("Offset_B {=i16}, Gain_B {=f32}", offset, gain);
                report.offset = Some(offset);
                report.gain = Some(gain);
            }
        }
        self.settle();

        let normal = self.start_normal_operation();
        report.record(CommissioningStep::StartNormalOperation, normal)?;
        if config.verbose {
            log_info!("Normal operation started");
        }
        self.settle();

        self.bus.set_address(new_address);
        if config.verbose {
            log_info!("Now using address 0x{=u8:x}", new_address);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::b_config::PreAmpGain;
    use crate::register::cust_id::{CustId0, CustId1, CustId2};
    use crate::register::gain_b::GainB;
    use crate::register::offset_b::OffsetB;
    use crate::register::InvalidRegisterField;
    use crate::testing::{FakeBus, FakeBusError, FakeDelay, FakePin};
    use crate::ProtocolState;

    /// Settles plus one power cycle, Start_CM and six register reads.
    const CLEAN_RUN_US: u64 = 8 * 150_000 + 1_000 + 100 + 6 * 100;

    fn fresh_part() -> FakeBus {
        let mut bus = FakeBus::new();
        bus.with_register::<CustId0>(0x1234);
        bus.with_register::<CustId1>(0x0056);
        bus.with_register::<CustId2>(0x0078);
        // Slowest update rate
        bus.with_register::<ZmdiConfig1>(0x00C1);
        // Address 0x28, SPI polarity positive, nothing locked
        bus.with_register::<ZmdiConfig2>(0x0141);
        // Full bridge, 1.5x, nulling disabled
        bus.with_register::<BConfig>(0x1880);
        bus.with_register::<OffsetB>(0x0000);
        bus.with_register::<GainB>(0x2000);

        bus
    }

    fn device(bus: FakeBus) -> Zsc31014<FakeBus, FakePin, FakeDelay> {
        Zsc31014::new(bus, FakePin::new(), FakeDelay::new())
    }

    fn config() -> CommissioningConfig {
        CommissioningConfig::default().new_address(0x33)
    }

    #[test]
    fn commission_clean_run() {
        let mut device = device(fresh_part());

        let report = device.commission(&config()).unwrap();

        assert!(report.is_clean());
        assert_eq!(Some([0x1234, 0x0056, 0x0078]), report.customer_ids());
        assert_eq!(Some(0x3C0), report.factory_id().map(|id| id.lot_number));
        assert_eq!(None, report.offset());

        assert_eq!(0x0001, device.bus.register::<ZmdiConfig1>());
        assert_eq!(0x0D9F, device.bus.register::<ZmdiConfig2>());
        assert_eq!(0x0BF1, device.bus.register::<BConfig>());
        assert_eq!(0xE000, device.bus.register::<OffsetB>());

        let expected: [u8; 12] = [0xA0, 0x00, 0x0E, 0x13, 0x01, 0x41, 0x02, 0x42, 0x0F, 0x4F, 0x43, 0x80];
        let commands: Vec<u8, 16> = device.bus.commands().collect();
        assert_eq!(expected.as_slice(), commands.as_slice());
        assert!(device.bus.frames.iter().all(|(address, _)| *address == 0x28));

        assert_eq!(0x33, device.address());
        assert_eq!(ProtocolState::NormalOperation, device.state());
        assert_eq!(CLEAN_RUN_US, device.delay.total_us());
    }

    #[test]
    fn commission_verbose_reads_back() {
        let mut device = device(fresh_part());

        let report = device.commission(&config().verbose(true)).unwrap();

        assert!(report.is_clean());
        assert_eq!(Some(-8192), report.offset());
        assert_eq!(Some(1.0), report.gain());
        assert_eq!(CLEAN_RUN_US + 2 * 100, device.delay.total_us());
    }

    #[test]
    fn commission_continues_after_failed_step() {
        let mut bus = fresh_part();
        bus.failing_command(0x42);
        let mut device = device(bus);

        let report = device.commission(&config()).unwrap();

        assert!(!report.is_clean());
        let expected = [StepFailure {
            step: CommissioningStep::ConfigureAddress,
            error: Zsc31014Error::Bus(FakeBusError),
        }];
        assert_eq!(expected.as_slice(), report.failures());

        assert_eq!(0x0141, device.bus.register::<ZmdiConfig2>());
        assert_eq!(0x0BF1, device.bus.register::<BConfig>());
        assert_eq!(Some(0x80), device.bus.commands().last());
        assert_eq!(0x33, device.address());
    }

    #[test]
    fn commission_aborts_on_first_failure() {
        let mut bus = fresh_part();
        bus.failing_command(0x42);
        let mut device = device(bus);

        let result = device.commission(&config().continue_on_error(false));

        assert!(matches!(result, Err(Zsc31014Error::Bus(FakeBusError))));
        assert_eq!(0x1880, device.bus.register::<BConfig>());
        assert!(device.bus.commands().all(|command| command != 0x80));
        assert_eq!(0x28, device.address());
        assert_eq!(ProtocolState::CommandMode, device.state());
    }

    #[test]
    fn commission_skips_write_after_invalid_read() {
        let mut bus = fresh_part();
        // Mux 00 has no meaning
        bus.with_register::<BConfig>(0x0080);
        let mut device = device(bus);

        let report = device.commission(&config().pre_amp_gain(PreAmpGain::X24)).unwrap();

        let expected = [StepFailure {
            step: CommissioningStep::ConfigureBridge,
            error: Zsc31014Error::UnexpectedRegisterData(InvalidRegisterField::new(0x0F, 0b00, 10)),
        }];
        assert_eq!(expected.as_slice(), report.failures());
        assert_eq!(0x0080, device.bus.register::<BConfig>());
        assert!(device.bus.commands().all(|command| command != 0x4F));
        assert_eq!(0xE000, device.bus.register::<OffsetB>());
    }

    #[test]
    fn commission_rejects_wide_address() {
        let mut device = device(fresh_part());

        let result = device.commission(&CommissioningConfig::default().new_address(0x80));

        assert!(matches!(result, Err(Zsc31014Error::InvalidAddress(0x80))));
        assert!(device.bus.frames.is_empty());
        assert!(device.power.levels.is_empty());
        assert_eq!(0, device.delay.total_us());
        assert_eq!(ProtocolState::Unpowered, device.state());
    }
}
