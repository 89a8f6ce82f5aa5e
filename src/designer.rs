//! Filter Coefficient Designer
//!
//! Runs design, normalization and Q15 quantization for each configured
//! channel and collects the results into a [`CoefficientTable`].

use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::dsp::filter_design::{BiquadCoeffs, BiquadDesigner, IirPeak};
use crate::dsp::quantize::quantize_coeffs;
use crate::types::{CoefficientRecord, CoefficientTable, DesignError, FilterSpec};

/// Design and quantize a single channel
///
/// # Errors
///
/// Returns a [`DesignError`] if the design is degenerate or the center
/// frequency does not fit the firmware frequency table.
pub fn design_channel<D: BiquadDesigner + ?Sized>(
    designer: &D,
    channel: usize,
    spec: &FilterSpec,
) -> Result<CoefficientRecord, DesignError> {
    let coeffs = BiquadCoeffs::design(designer, spec)?;
    debug!(channel, ?coeffs, "normalized design");

    let quantized = quantize_coeffs(&coeffs);
    for &slot in &quantized.saturated {
        warn!(
            channel,
            center_hz = spec.center_hz(),
            slot,
            "coefficient saturated in Q15; magnitude >= 1.0"
        );
    }

    info!(
        "Ch{}: {}Hz -> {:?}",
        channel,
        spec.center_hz(),
        quantized.coeffs
    );

    CoefficientRecord::new(channel, spec, quantized.coeffs, quantized.saturated)
}

/// Design every configured channel in order
///
/// Any failing channel aborts the whole table.
///
/// # Errors
///
/// Returns the first [`DesignError`] encountered.
pub fn design_table<D: BiquadDesigner + ?Sized>(
    designer: &D,
    config: &GeneratorConfig,
) -> Result<CoefficientTable, DesignError> {
    let records = config
        .filter_specs()?
        .iter()
        .enumerate()
        .map(|(channel, spec)| design_channel(designer, channel, spec))
        .collect::<Result<Vec<_>, _>>()?;

    let table = CoefficientTable::new(records)?;
    if table.saturation_count() > 0 {
        warn!(
            saturated = table.saturation_count(),
            "some coefficients were clipped; check Q and center frequencies"
        );
    }

    Ok(table)
}

/// Design every configured channel with the reference [`IirPeak`] designer
///
/// # Errors
///
/// Returns the first [`DesignError`] encountered.
pub fn design_default(config: &GeneratorConfig) -> Result<CoefficientTable, DesignError> {
    design_table(&IirPeak, config)
}
