//! Filter Coefficient Designer Tests
//!
//! End-to-end checks of design, normalization and Q15 quantization.
//! Run with: cargo test --test designer_tests

use resonator_coefs::designer::{design_channel, design_default, design_table};
use resonator_coefs::dsp::filter_design::{
    BiquadCoeffs, BiquadDesigner, IirPeak, TransferFunction,
};
use resonator_coefs::dsp::quantize::{dequantize, quantize};
use resonator_coefs::{DesignError, FilterSpec, GeneratorConfig, Q15Coeffs};

const FS: f64 = 16_000.0;

fn spec(fc: f64, q: f64) -> FilterSpec {
    FilterSpec::new(fc, q, FS).unwrap()
}

// =============================================================================
// Reference Design Tests
// =============================================================================

#[test]
fn test_reference_300hz_q8() {
    let record = design_channel(&IirPeak, 0, &spec(300.0, 8.0)).unwrap();
    assert_eq!(
        record.coeffs(),
        Q15Coeffs::from_slots([240, 0, -240, -32_768, 32_289])
    );
}

#[test]
fn test_default_bank_values() {
    let table = design_default(&GeneratorConfig::default()).unwrap();
    let coeffs: Vec<[i16; 5]> = table.records().iter().map(|r| *r.coeffs().as_array()).collect();

    assert_eq!(
        coeffs,
        vec![
            [240, 0, -240, -32_768, 32_289],
            [631, 0, -631, -32_768, 31_506],
            [1164, 0, -1164, -32_768, 30_440],
            [1897, 0, -1897, -32_768, 28_975],
        ]
    );
}

#[test]
fn test_feedback_sign_matches_normalized_design() {
    for fc in [300.0, 800.0, 1500.0, 2500.0, 5000.0, 7000.0] {
        let s = spec(fc, 8.0);
        let real = BiquadCoeffs::design(&IirPeak, &s).unwrap();
        let q = design_channel(&IirPeak, 0, &s).unwrap().coeffs();

        assert_eq!(q.a1().signum(), sign_of(real.a1), "{} Hz a1", fc);
        assert_eq!(q.a2().signum(), sign_of(real.a2), "{} Hz a2", fc);
    }
}

fn sign_of(value: f64) -> i16 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

#[test]
fn test_quantized_within_one_lsb_of_design() {
    for fc in [100.0, 440.0, 1000.0, 3000.0, 6000.0] {
        let s = spec(fc, 8.0);
        let real = BiquadCoeffs::design(&IirPeak, &s).unwrap();
        let q = design_channel(&IirPeak, 0, &s).unwrap().coeffs();

        for (slot, (&raw, value)) in q.as_array().iter().zip(real.as_slots()).enumerate() {
            if value.abs() < 1.0 {
                let err = (dequantize(raw) - value).abs() * 32_768.0;
                assert!(err <= 0.5 + 1e-9, "{} Hz slot {} error {} LSB", fc, slot, err);
            }
        }
    }
}

// =============================================================================
// Invariant Tests
// =============================================================================

#[test]
fn test_always_five_values_in_range() {
    let valid = [
        (1.0, 0.75),
        (1.0, 100.0),
        (20.0, 1.0),
        (300.0, 8.0),
        (300.0, 100.0),
        (4000.0, 0.75),
        (4000.0, 8.0),
        (7900.0, 1.0),
        (7900.0, 100.0),
    ];
    for (fc, q) in valid {
        let record = design_channel(&IirPeak, 0, &spec(fc, q)).unwrap();
        let real = BiquadCoeffs::design(&IirPeak, &spec(fc, q)).unwrap();

        assert_eq!(record.coeffs().as_array().len(), 5);
        for (&c, value) in record.coeffs().as_array().iter().zip(real.as_slots()) {
            assert!((i16::MIN..=i16::MAX).contains(&c));
            let expected = (value * 32_768.0).clamp(-32_768.0, 32_767.0);
            assert!(
                (f64::from(c) - expected).abs() <= 0.5 + 1e-9,
                "{} Hz Q {}: {} vs {}",
                fc,
                q,
                c,
                expected
            );
        }
    }
}

#[test]
fn test_bandwidth_reaching_nyquist_rejected() {
    let invalid = [(7900.0, 0.75), (4000.0, 0.5), (1000.0, 0.1), (1000.0, 0.05)];
    for (fc, q) in invalid {
        assert_eq!(
            design_channel(&IirPeak, 0, &spec(fc, q)),
            Err(DesignError::DegenerateDesign(fc)),
            "{} Hz Q {}",
            fc,
            q
        );
    }
}

#[test]
fn test_design_is_deterministic() {
    let config = GeneratorConfig::default();
    let first = design_default(&config).unwrap();
    let second = design_default(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bandwidth_decreases_with_q() {
    let mut previous = f64::INFINITY;
    for q in [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0] {
        let bw = spec(1000.0, q).bandwidth_hz();
        assert!(bw < previous, "Q {} bandwidth {} not below {}", q, bw, previous);
        previous = bw;
    }
}

#[test]
fn test_record_metadata() {
    let record = design_channel(&IirPeak, 2, &spec(1500.0, 8.0)).unwrap();
    assert_eq!(record.channel(), 2);
    assert_eq!(record.center_hz(), 1500.0);
    assert!((record.bandwidth_hz() - 187.5).abs() < 1e-12);
    assert_eq!(record.table_frequency(), 1500);
}

// =============================================================================
// Clipping Tests
// =============================================================================

#[test]
fn test_clip_boundaries() {
    assert_eq!(quantize(1.0).raw, 32_767);
    assert_eq!(quantize(-1.0).raw, -32_768);
}

#[test]
fn test_saturation_recorded_not_fatal() {
    struct Hot;
    impl BiquadDesigner for Hot {
        fn design(&self, _spec: &FilterSpec) -> TransferFunction {
            TransferFunction {
                b: [1.0, -1.0, 0.5],
                a: [1.0, -0.9, 0.2],
            }
        }
    }

    let record = design_channel(&Hot, 0, &spec(300.0, 8.0)).unwrap();
    assert_eq!(
        record.coeffs(),
        Q15Coeffs::from_slots([32_767, -32_768, 16_384, -29_491, 6554])
    );
    assert_eq!(record.saturated_slots(), &["b0"]);
}

#[test]
fn test_default_bank_reports_a1_saturation() {
    let table = design_default(&GeneratorConfig::default()).unwrap();
    assert_eq!(table.saturation_count(), 4);
    for record in table.records() {
        assert_eq!(record.saturated_slots(), &["a1"]);
    }
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_nyquist_fails_fast() {
    let config = GeneratorConfig {
        center_freqs_hz: vec![8000.0],
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        design_default(&config),
        Err(DesignError::AboveNyquist { .. })
    ));

    let config = GeneratorConfig {
        center_freqs_hz: vec![12_000.0],
        ..GeneratorConfig::default()
    };
    assert!(design_default(&config).is_err());
}

#[test]
fn test_invalid_shared_parameters() {
    let bad_q = GeneratorConfig {
        q: -1.0,
        ..GeneratorConfig::default()
    };
    assert_eq!(design_default(&bad_q), Err(DesignError::NonPositiveQ(-1.0)));

    let bad_fs = GeneratorConfig {
        sample_rate_hz: 0.0,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        design_default(&bad_fs),
        Err(DesignError::NonPositiveSampleRate(0.0))
    );
}

#[test]
fn test_empty_frequency_list() {
    let config = GeneratorConfig {
        center_freqs_hz: Vec::new(),
        ..GeneratorConfig::default()
    };
    assert_eq!(design_table(&IirPeak, &config), Err(DesignError::NoChannels));
}
