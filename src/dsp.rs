//! Digital Signal Processing
//!
//! Coefficient math for the resonator bank:
//! - Peaking biquad design behind a pluggable designer trait
//! - Normalization to the direct-form-I layout (`a0 = 1`)
//! - Q15 quantization with saturation

pub mod filter_design;
pub mod quantize;
