//! Settings for commissioning a part.
//!
//! [`CommissioningConfig`] is built with by-value setters on top of [`Default`], which matches a factory-fresh part
//! answering on `0x28`.
use embedded_hal::i2c::SevenBitAddress;
use crate::bus::DEFAULT_ADDRESS;
use crate::register::b_config::PreAmpGain;

/// Offset_B value written during commissioning unless overridden.
pub const DEFAULT_FACTORY_OFFSET: i16 = 0xE000u16 as i16;

/// Settings for [`Zsc31014::commission`](crate::Zsc31014::commission).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommissioningConfig {
    pub(crate) new_address: SevenBitAddress,
    pub(crate) pre_amp_gain: PreAmpGain,
    pub(crate) offset: i16,
    pub(crate) verbose: bool,
    pub(crate) continue_on_error: bool,
}

impl Default for CommissioningConfig {
    fn default() -> Self {
        Self {
            new_address: DEFAULT_ADDRESS,
            pre_amp_gain: PreAmpGain::X192,
            offset: DEFAULT_FACTORY_OFFSET,
            verbose: false,
            continue_on_error: true,
        }
    }
}

impl CommissioningConfig {
    /// The address the device answers on after commissioning. This gets locked into the part.
    pub fn new_address(mut self, address: SevenBitAddress) -> Self {
        self.new_address = address;

        self
    }

    pub fn pre_amp_gain(mut self, gain: PreAmpGain) -> Self {
        self.pre_amp_gain = gain;

        self
    }

    /// Value written to the Offset_B register.
    pub fn offset(mut self, offset: i16) -> Self {
        self.offset = offset;

        self
    }

    /// Log progress and read back offset and gain after writing them.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;

        self
    }

    /// Keep going after a failed step instead of returning the first error.
    ///
    /// Enabled by default. The device may then end up partially configured, so check
    /// [`CommissioningReport::is_clean`](crate::commission::CommissioningReport::is_clean) and re-verify the
    /// configuration before trusting it.
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;

        self
    }
}
