//! Filter Design Module
//!
//! Provides coefficient calculation for the resonator bank. All
//! calculations run once at build time, never in the firmware's audio path.
//!
//! The design step is pluggable through [`BiquadDesigner`]: any
//! implementation mapping a [`FilterSpec`] to a second-order transfer
//! function can feed the normalizer and quantizer. [`IirPeak`] is the
//! reference resonator.

use core::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::types::{DesignError, FilterSpec};

/// Raw second-order transfer function as produced by a designer
///
/// H(z) = (b\[0\] + b\[1\]*z^-1 + b\[2\]*z^-2) / (a\[0\] + a\[1\]*z^-1 + a\[2\]*z^-2)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransferFunction {
    /// Numerator `[b0, b1, b2]`
    pub b: [f64; 3],
    /// Denominator `[a0, a1, a2]`
    pub a: [f64; 3],
}

/// Something that can design a single peaking biquad
pub trait BiquadDesigner {
    /// Design the transfer function for one channel
    fn design(&self, spec: &FilterSpec) -> TransferFunction;
}

/// Second-order peaking resonator with unity gain at the center frequency
/// and a -3 dB bandwidth of `fc / Q`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IirPeak;

impl BiquadDesigner for IirPeak {
    fn design(&self, spec: &FilterSpec) -> TransferFunction {
        let omega = 2.0 * PI * spec.center_hz() / spec.sample_rate_hz();
        let bw = omega / spec.q();

        // Band edge gain of 1/sqrt(2) makes the scale factor exactly 1
        let gb = FRAC_1_SQRT_2;
        let beta = ((1.0 - gb * gb).sqrt() / gb) * (bw / 2.0).tan();
        let gain = 1.0 / (1.0 + beta);

        TransferFunction {
            b: [1.0 - gain, 0.0, -(1.0 - gain)],
            a: [1.0, -2.0 * gain * omega.cos(), 2.0 * gain - 1.0],
        }
    }
}

/// Biquad filter coefficients (Direct Form I)
///
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiquadCoeffs {
    /// Numerator coefficient b0
    pub b0: f64,
    /// Numerator coefficient b1
    pub b1: f64,
    /// Numerator coefficient b2
    pub b2: f64,
    /// Denominator coefficient a1 (note: a0 is normalized to 1)
    pub a1: f64,
    /// Denominator coefficient a2
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Design and normalize a peaking filter with the given designer
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DegenerateDesign`] if the requested bandwidth
    /// reaches Nyquist, or if the designer's output cannot be normalized or
    /// has a pole on or outside the unit circle.
    pub fn design<D: BiquadDesigner + ?Sized>(
        designer: &D,
        spec: &FilterSpec,
    ) -> Result<Self, DesignError> {
        // tan(bw / 2) is only monotonic for bw < pi, i.e. fc / Q < fs / 2
        if spec.bandwidth_hz() >= spec.sample_rate_hz() / 2.0 {
            return Err(DesignError::DegenerateDesign(spec.center_hz()));
        }

        Self::normalize(&designer.design(spec))
            .filter(Self::is_stable)
            .ok_or(DesignError::DegenerateDesign(spec.center_hz()))
    }

    /// Normalize coefficients by a0
    ///
    /// Signs are kept as designed: a1 and a2 are not negated. Returns `None`
    /// for a zero or non-finite a0 or any non-finite result.
    #[must_use]
    pub fn normalize(tf: &TransferFunction) -> Option<Self> {
        let [b0, b1, b2] = tf.b;
        let [a0, a1, a2] = tf.a;
        if a0 == 0.0 || !a0.is_finite() {
            return None;
        }

        let coeffs = Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: a1 / a0,
            a2: a2 / a0,
        };
        coeffs.as_slots().iter().all(|c| c.is_finite()).then_some(coeffs)
    }

    /// Coefficients in firmware slot order `[b0, b1, b2, a1, a2]`
    #[must_use]
    pub const fn as_slots(&self) -> [f64; 5] {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }

    /// Check that both poles lie strictly inside the unit circle
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }

    /// Calculate magnitude response at a given frequency
    #[must_use]
    pub fn magnitude_at(&self, freq: f64, fs: f64) -> f64 {
        let omega = 2.0 * PI * freq / fs;
        let cos_omega = omega.cos();
        let cos_2omega = (2.0 * omega).cos();

        // |H(e^jw)|^2 = |B(e^jw)|^2 / |A(e^jw)|^2
        let num = self.b0 * self.b0 + self.b1 * self.b1 + self.b2 * self.b2
            + 2.0 * (self.b0 * self.b1 + self.b1 * self.b2) * cos_omega
            + 2.0 * self.b0 * self.b2 * cos_2omega;

        let den = 1.0 + self.a1 * self.a1 + self.a2 * self.a2
            + 2.0 * (self.a1 + self.a1 * self.a2) * cos_omega
            + 2.0 * self.a2 * cos_2omega;

        if den > 0.0 {
            (num / den).sqrt()
        } else {
            0.0
        }
    }

    /// Calculate magnitude response in dB at a given frequency
    #[must_use]
    pub fn magnitude_db_at(&self, freq: f64, fs: f64) -> f64 {
        let mag = self.magnitude_at(freq, fs);
        if mag > 0.0 {
            20.0 * mag.log10()
        } else {
            -120.0
        }
    }
}
