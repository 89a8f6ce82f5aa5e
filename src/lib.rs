//! Resonator Bank Coefficient Generator
//!
//! Build-time tool that designs a bank of narrow-band resonator (peaking)
//! biquads and emits their Q15 coefficients as a C header for firmware
//! running a direct-form-I fixed-point biquad routine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │  GeneratorConfig │───▶│     Designer     │───▶│     Emitter      │
//! │  freqs, fs, Q    │    │ design/normalize │    │  C header text   │
//! └──────────────────┘    │ quantize (Q15)   │    └──────────────────┘
//!                         └──────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Immutable values**: every record is created once and only read after
//! - **Type-driven design**: `FilterSpec` cannot be built with an invalid
//!   frequency, Q or sample rate
//! - **Functional core, imperative shell**: design and rendering are pure,
//!   only the binary touches the filesystem
//! - **Explicit error handling**: all fallible operations return `Result`

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Digital Signal Processing
///
/// Biquad design, normalization and Q15 quantization.
pub mod dsp;

/// Filter Coefficient Designer
///
/// Turns a configuration into an ordered table of quantized records.
pub mod designer;

/// Constant Table Emitter
///
/// Renders a coefficient table as a C header.
pub mod emitter;

/// Shared types used across modules
pub mod types;

/// Generator configuration and defaults
pub mod config;

pub use config::GeneratorConfig;
pub use designer::{design_default, design_table};
pub use emitter::{render_header, write_header, HeaderOptions};
pub use types::{CoefficientRecord, CoefficientTable, DesignError, FilterSpec, Q15Coeffs};
