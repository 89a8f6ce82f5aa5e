//! Generator configuration and defaults
//!
//! The defaults match the firmware's four-channel resonator bank running
//! at 16 kHz. Callers override them through [`GeneratorConfig`] rather than
//! through process-wide state.

use crate::types::{DesignError, FilterSpec};

/// Default resonator center frequencies in Hz
pub const DEFAULT_CENTER_FREQS_HZ: [f64; 4] = [300.0, 800.0, 1500.0, 2500.0];

/// Default firmware sample rate (16 kHz)
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 16_000.0;

/// Default quality factor shared by every channel
pub const DEFAULT_Q: f64 = 8.0;

/// Default header file name
pub const DEFAULT_OUTPUT_FILE: &str = "resonator_coefs_cmsis.h";

/// Default include guard for the emitted header
pub const DEFAULT_INCLUDE_GUARD: &str = "RESONATOR_COEFS_CMSIS_H";

/// Parameters for one generator run
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Center frequency of each channel in Hz, in channel order
    pub center_freqs_hz: Vec<f64>,
    /// Sample rate shared by all channels in Hz
    pub sample_rate_hz: f64,
    /// Quality factor shared by all channels
    pub q: f64,
}

impl GeneratorConfig {
    /// Build the validated filter specification for every channel
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoChannels`] for an empty frequency list, or
    /// the first invalid channel's error.
    pub fn filter_specs(&self) -> Result<Vec<FilterSpec>, DesignError> {
        if self.center_freqs_hz.is_empty() {
            return Err(DesignError::NoChannels);
        }

        self.center_freqs_hz
            .iter()
            .map(|&fc| FilterSpec::new(fc, self.q, self.sample_rate_hz))
            .collect()
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            center_freqs_hz: DEFAULT_CENTER_FREQS_HZ.to_vec(),
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            q: DEFAULT_Q,
        }
    }
}
