//! Shared types used across the generator
//!
//! This module defines the value records passed from the designer to the
//! emitter. Constructors enforce the invariants so later stages never see
//! an invalid filter specification.

use core::fmt;

use thiserror::Error;

/// Filter design error
///
/// Every variant is fatal for the run: there is no per-channel partial
/// success.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum DesignError {
    /// Sample rate is zero or negative
    #[error("sample rate must be positive, got {0} Hz")]
    NonPositiveSampleRate(f64),
    /// Quality factor is zero or negative
    #[error("quality factor must be positive, got {0}")]
    NonPositiveQ(f64),
    /// Center frequency is zero or negative
    #[error("center frequency must be positive, got {0} Hz")]
    NonPositiveFrequency(f64),
    /// Center frequency at or above half the sample rate
    #[error("center frequency {center_hz} Hz must be below Nyquist ({nyquist_hz} Hz)")]
    AboveNyquist {
        /// Requested center frequency
        center_hz: f64,
        /// Half the sample rate
        nyquist_hz: f64,
    },
    /// NaN or infinite input parameter
    #[error("filter parameters must be finite")]
    NonFinite,
    /// Designer produced a zero/non-finite `a0` or non-finite coefficients
    #[error("filter design for {0} Hz is degenerate")]
    DegenerateDesign(f64),
    /// Center frequency cannot be stored in the `uint16_t` frequency table
    #[error("center frequency {0} Hz does not fit the 16-bit frequency table")]
    FrequencyOutOfRange(f64),
    /// No center frequencies were requested
    #[error("at least one center frequency is required")]
    NoChannels,
}

/// Validated parameters for one resonator channel
///
/// Invariant: all fields finite and positive, `center_hz < sample_rate_hz / 2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    center_hz: f64,
    q: f64,
    sample_rate_hz: f64,
}

impl FilterSpec {
    /// Create a filter specification, rejecting anything the design is
    /// undefined for
    ///
    /// # Errors
    ///
    /// Returns a [`DesignError`] for non-finite or non-positive values and
    /// for center frequencies at or above Nyquist.
    pub fn new(center_hz: f64, q: f64, sample_rate_hz: f64) -> Result<Self, DesignError> {
        if !(center_hz.is_finite() && q.is_finite() && sample_rate_hz.is_finite()) {
            return Err(DesignError::NonFinite);
        }
        if sample_rate_hz <= 0.0 {
            return Err(DesignError::NonPositiveSampleRate(sample_rate_hz));
        }
        if q <= 0.0 {
            return Err(DesignError::NonPositiveQ(q));
        }
        if center_hz <= 0.0 {
            return Err(DesignError::NonPositiveFrequency(center_hz));
        }
        let nyquist_hz = sample_rate_hz / 2.0;
        if center_hz >= nyquist_hz {
            return Err(DesignError::AboveNyquist {
                center_hz,
                nyquist_hz,
            });
        }

        Ok(Self {
            center_hz,
            q,
            sample_rate_hz,
        })
    }

    /// Center frequency in Hz
    #[must_use]
    pub const fn center_hz(&self) -> f64 {
        self.center_hz
    }

    /// Quality factor
    #[must_use]
    pub const fn q(&self) -> f64 {
        self.q
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// -3 dB bandwidth in Hz (`fc / Q`)
    #[must_use]
    pub fn bandwidth_hz(&self) -> f64 {
        self.center_hz / self.q
    }
}

/// Quantized biquad coefficients in firmware slot order
/// `[b0, b1, b2, a1, a2]`
///
/// `a1` and `a2` carry the sign of the normalized denominator; they are
/// not negated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Q15Coeffs([i16; 5]);

impl Q15Coeffs {
    /// Number of coefficient slots per biquad stage
    pub const LEN: usize = 5;

    /// Slot names in storage order
    pub const SLOT_NAMES: [&'static str; 5] = ["b0", "b1", "b2", "a1", "a2"];

    /// Wrap raw Q15 values already in slot order
    #[must_use]
    pub const fn from_slots(slots: [i16; 5]) -> Self {
        Self(slots)
    }

    /// All five slots
    #[must_use]
    pub const fn as_array(&self) -> &[i16; 5] {
        &self.0
    }

    /// Numerator coefficient b0
    #[must_use]
    pub const fn b0(&self) -> i16 {
        self.0[0]
    }

    /// Numerator coefficient b1
    #[must_use]
    pub const fn b1(&self) -> i16 {
        self.0[1]
    }

    /// Numerator coefficient b2
    #[must_use]
    pub const fn b2(&self) -> i16 {
        self.0[2]
    }

    /// Denominator coefficient a1
    #[must_use]
    pub const fn a1(&self) -> i16 {
        self.0[3]
    }

    /// Denominator coefficient a2
    #[must_use]
    pub const fn a2(&self) -> i16 {
        self.0[4]
    }
}

impl fmt::Debug for Q15Coeffs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Designed and quantized coefficients for one channel
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientRecord {
    channel: usize,
    center_hz: f64,
    bandwidth_hz: f64,
    coeffs: Q15Coeffs,
    saturated: Vec<&'static str>,
}

impl CoefficientRecord {
    /// Build a record for a channel
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::FrequencyOutOfRange`] when the rounded center
    /// frequency does not fit the `uint16_t` frequency table.
    pub fn new(
        channel: usize,
        spec: &FilterSpec,
        coeffs: Q15Coeffs,
        saturated: Vec<&'static str>,
    ) -> Result<Self, DesignError> {
        if spec.center_hz().round() > f64::from(u16::MAX) {
            return Err(DesignError::FrequencyOutOfRange(spec.center_hz()));
        }

        Ok(Self {
            channel,
            center_hz: spec.center_hz(),
            bandwidth_hz: spec.bandwidth_hz(),
            coeffs,
            saturated,
        })
    }

    /// Channel index (position in the input list)
    #[must_use]
    pub const fn channel(&self) -> usize {
        self.channel
    }

    /// Center frequency in Hz
    #[must_use]
    pub const fn center_hz(&self) -> f64 {
        self.center_hz
    }

    /// -3 dB bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(&self) -> f64 {
        self.bandwidth_hz
    }

    /// Quantized coefficients
    #[must_use]
    pub const fn coeffs(&self) -> Q15Coeffs {
        self.coeffs
    }

    /// Names of the slots that were clipped during quantization
    #[must_use]
    pub fn saturated_slots(&self) -> &[&'static str] {
        &self.saturated
    }

    /// Center frequency as stored in the firmware frequency table
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn table_frequency(&self) -> u16 {
        // Range checked in `new`
        self.center_hz.round() as u16
    }
}

/// Ordered set of channel records
///
/// Record order defines the channel indices `0..N-1`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientTable {
    records: Vec<CoefficientRecord>,
}

impl CoefficientTable {
    /// Biquad stages per channel; the bank is single-stage
    pub const STAGE_COUNT: usize = 1;

    /// Build a table, renumbering records by position
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoChannels`] for an empty record list.
    pub fn new(records: Vec<CoefficientRecord>) -> Result<Self, DesignError> {
        if records.is_empty() {
            return Err(DesignError::NoChannels);
        }

        let records = records
            .into_iter()
            .enumerate()
            .map(|(channel, record)| CoefficientRecord { channel, ..record })
            .collect();

        Ok(Self { records })
    }

    /// Records in channel order
    #[must_use]
    pub fn records(&self) -> &[CoefficientRecord] {
        &self.records
    }

    /// Number of channels
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.records.len()
    }

    /// Total number of saturated slots across the bank
    #[must_use]
    pub fn saturation_count(&self) -> usize {
        self.records.iter().map(|r| r.saturated.len()).sum()
    }
}
