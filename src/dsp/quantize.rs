//! Q15 Quantization
//!
//! Converts normalized real coefficients to the signed 1.15 fixed-point
//! format loaded by the firmware's biquad routine. Values outside
//! `[-1.0, 1.0 - 2^-15]` saturate to the nearest representable extreme.

use fixed::types::I1F15;

use super::filter_design::BiquadCoeffs;
use crate::types::Q15Coeffs;

/// Fixed-point coefficient type (Q1.15 format)
pub type Q15 = I1F15;

/// Scale between a real value and its raw Q15 integer
pub const Q15_SCALE: f64 = 32_768.0;

/// Result of quantizing a single value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quantized {
    /// Raw Q15 bits
    pub raw: i16,
    /// Whether the value had to be clipped to fit
    pub saturated: bool,
}

/// Quantize a real value to Q15
///
/// Rounds to nearest (ties to even) and clips to `[-32768, 32767]`.
/// Clipping is reported through [`Quantized::saturated`], never as an error.
///
/// # Panics
///
/// Panics if `value` is NaN. Designs reaching the quantizer have already
/// been checked for finite coefficients by `BiquadCoeffs::normalize`.
#[must_use]
pub fn quantize(value: f64) -> Quantized {
    assert!(!value.is_nan(), "cannot quantize NaN to Q15");
    match Q15::checked_from_num(value) {
        Some(q) => Quantized {
            raw: q.to_bits(),
            saturated: false,
        },
        None => Quantized {
            raw: Q15::saturating_from_num(value).to_bits(),
            saturated: true,
        },
    }
}

/// Convert a raw Q15 integer back to a real value
#[must_use]
pub fn dequantize(raw: i16) -> f64 {
    Q15::from_bits(raw).to_num::<f64>()
}

/// Quantized coefficient set plus the slots that saturated
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizedCoeffs {
    /// Coefficients in slot order `[b0, b1, b2, a1, a2]`
    pub coeffs: Q15Coeffs,
    /// Slot names that were clipped, in slot order
    pub saturated: Vec<&'static str>,
}

/// Quantize all five coefficients in firmware slot order
#[must_use]
pub fn quantize_coeffs(coeffs: &BiquadCoeffs) -> QuantizedCoeffs {
    let mut slots = [0i16; Q15Coeffs::LEN];
    let mut saturated = Vec::new();

    for ((slot, value), name) in slots
        .iter_mut()
        .zip(coeffs.as_slots())
        .zip(Q15Coeffs::SLOT_NAMES)
    {
        let q = quantize(value);
        *slot = q.raw;
        if q.saturated {
            saturated.push(name);
        }
    }

    QuantizedCoeffs {
        coeffs: Q15Coeffs::from_slots(slots),
        saturated,
    }
}
