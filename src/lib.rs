//! Platform agnostic `no_std` driver for the ZSC31014 sensor signal conditioner.
//!
//! The ZSC31014 conditions the output of a resistive bridge (load cells, pressure sensors) and returns a
//! ratiometric 14-bit value over I2C. Right after power-on it can be put into command mode, where its EEPROM
//! configuration is read and written in 3-byte frames; after that it streams samples until the next power cycle.
//!
//! The driver therefore owns three things: the I2C bus, the output pin switching the sensor supply, and a delay.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::i2c::I2c;
//! # use zsc31014_rs::Zsc31014Result;
//!  use zsc31014_rs::Zsc31014;
//!  use zsc31014_rs::bus::DEFAULT_ADDRESS;
//!  use zsc31014_rs::config::CommissioningConfig;
//! # fn demo<I: I2c, P: OutputPin, D: DelayNs>(i2c: I, pin: P, delay: D) -> Zsc31014Result<(), I::Error, P::Error> {
//!
//!  let mut device = Zsc31014::new_i2c(i2c, DEFAULT_ADDRESS, pin, delay);
//!  device.commission(&CommissioningConfig::default())?;
//!
//!  device.set_linear_calibration(0.05, -10.0);
//!  device.calibrate_bias(20)?;
//!  let value = device.read_corrected_value()?;
//! # Ok(())
//! # }
//! ```
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

// Must come first so the logging macros are visible in every other module.
mod fmt;

pub mod bus;
pub mod calibration;
pub mod commission;
pub mod config;
pub mod error;
pub mod register;
pub mod sample;
mod zsc31014;

#[cfg(test)]
mod testing;

pub use crate::error::Zsc31014Error;
pub use crate::zsc31014::{ProtocolState, Zsc31014, Zsc31014Result};
