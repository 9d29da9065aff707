//! Host-side correction applied on top of the raw bridge readings.
//!
//! The device already applies its own EEPROM-stored offset/gain/temperature correction. What arrives over the
//! bus is still a unitless 14-bit ratio though, so the driver maps it to a physical value with a straight line
//! (`scale * raw + intercept`) and removes a bias measured at a known reference condition (e.g. an unloaded
//! load cell):
//!
//! ```text
//! value = scale * raw + intercept - bias
//! ```

/// Number of samples averaged by [`Zsc31014::calibrate_bias`](crate::Zsc31014::calibrate_bias) by default.
pub const DEFAULT_BIAS_SAMPLES: u32 = 20;

/// Linear correction polynomial plus bias.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearCalibration {
    pub scale: f32,
    pub intercept: f32,
    pub bias: f32,
}

impl Default for LinearCalibration {
    fn default() -> Self {
        Self::identity()
    }
}

impl LinearCalibration {
    /// `scale = 1`, `intercept = 0`, `bias = 0`: raw values pass through unchanged.
    pub const fn identity() -> Self {
        Self { scale: 1.0, intercept: 0.0, bias: 0.0 }
    }

    /// Maps a raw sample through the polynomial, without removing the bias.
    pub fn apply(&self, raw: u16) -> f32 {
        self.scale * raw as f32 + self.intercept
    }

    /// Maps a raw sample through the polynomial and removes the bias.
    pub fn correct(&self, raw: u16) -> f32 {
        self.apply(raw) - self.bias
    }
}

/// Running sums for a bias estimate.
///
/// The integer sum of the raw samples is kept next to the floating point sum of the mapped samples so the two
/// can be compared when something looks off. It is 64 bits wide, so it holds any `u32` count of full-scale samples.
#[derive(Copy, Clone, Debug, Default)]
pub struct BiasAccumulator {
    sum: f64,
    raw_sum: u64,
    count: u32,
}

impl BiasAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, calibration: &LinearCalibration, raw: u16) {
        self.sum += calibration.apply(raw) as f64;
        self.raw_sum += raw as u64;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn raw_sum(&self) -> u64 {
        self.raw_sum
    }

    /// Mean of the mapped samples, or `None` if nothing was added.
    pub fn mean(&self) -> Option<f32> {
        if self.count == 0 {
            return None;
        }

        Some((self.sum / self.count as f64) as f32)
    }

    /// Integer mean of the raw samples, or `None` if nothing was added.
    pub fn raw_mean(&self) -> Option<u32> {
        if self.count == 0 {
            return None;
        }

        Some((self.raw_sum / self.count as u64) as u32)
    }
}
