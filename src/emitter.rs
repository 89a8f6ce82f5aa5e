//! Constant Table Emitter
//!
//! Renders a [`CoefficientTable`] as a self-contained C header for the
//! firmware's DF1 Q15 biquad bank. The layout is a compatibility contract:
//! `int16_t[5]` per channel in `{b0, b1, b2, a1, a2}` order, a pointer table
//! and a `uint16_t` frequency table, all `NUM_RESONATORS` long.
//!
//! Rendering is pure; the caller decides where the bytes go.

use core::fmt::{self, Write as _};
use std::io;

use crate::config::DEFAULT_INCLUDE_GUARD;
use crate::types::CoefficientTable;

/// Header rendering options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Include guard macro name
    pub include_guard: String,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            include_guard: DEFAULT_INCLUDE_GUARD.to_owned(),
        }
    }
}

/// Render the header with default options
#[must_use]
pub fn render_header(table: &CoefficientTable) -> String {
    render_header_with(table, &HeaderOptions::default())
}

/// Render the header with explicit options
///
/// # Panics
///
/// Never in practice; formatting into a `String` is infallible.
#[must_use]
pub fn render_header_with(table: &CoefficientTable, options: &HeaderOptions) -> String {
    let mut out = String::new();
    write_sections(&mut out, table, options).expect("formatting into a String cannot fail");
    out
}

/// Render the header and write it to `sink`
///
/// # Errors
///
/// Propagates any I/O error from the sink. Nothing is cleaned up on
/// failure.
pub fn write_header<W: io::Write>(table: &CoefficientTable, sink: W) -> io::Result<()> {
    write_header_with(table, &HeaderOptions::default(), sink)
}

/// Render the header with explicit options and write it to `sink`
///
/// # Errors
///
/// Propagates any I/O error from the sink.
pub fn write_header_with<W: io::Write>(
    table: &CoefficientTable,
    options: &HeaderOptions,
    mut sink: W,
) -> io::Result<()> {
    sink.write_all(render_header_with(table, options).as_bytes())?;
    sink.flush()
}

/// Name of a channel's coefficient array
#[must_use]
pub fn channel_array_name(channel: usize) -> String {
    format!("RESONATOR_{channel}_COEFS")
}

fn write_sections(
    out: &mut String,
    table: &CoefficientTable,
    options: &HeaderOptions,
) -> fmt::Result {
    let guard = &options.include_guard;
    write!(out, "#ifndef {guard}\n#define {guard}\n#include <stdint.h>\n\n")?;
    write!(
        out,
        "#define NUM_RESONATORS {}\n#define NUM_STAGES {}\n\n",
        table.channel_count(),
        CoefficientTable::STAGE_COUNT
    )?;

    for record in table.records() {
        let c = record.coeffs();
        writeln!(
            out,
            "static const int16_t {}[5] = {{{}, {}, {}, {}, {}}};",
            channel_array_name(record.channel()),
            c.b0(),
            c.b1(),
            c.b2(),
            c.a1(),
            c.a2()
        )?;
    }

    let names: Vec<String> = table
        .records()
        .iter()
        .map(|r| channel_array_name(r.channel()))
        .collect();
    write!(
        out,
        "\nstatic const int16_t* const RESONATOR_COEFS[NUM_RESONATORS] = {{{}}};\n\n",
        names.join(", ")
    )?;

    let freqs: Vec<String> = table
        .records()
        .iter()
        .map(|r| r.table_frequency().to_string())
        .collect();
    write!(
        out,
        "static const uint16_t RESONATOR_CENTER_FREQS[NUM_RESONATORS] = {{{}}};\n\n#endif\n",
        freqs.join(", ")
    )
}
