//! Integration Tests
//!
//! End-to-end tests for the Chanmix session lifecycle, configuration and
//! WAV remixing.

use approx::assert_relative_eq;
use chanmix::engine::{read_wav, remix_wav, write_wav};
use chanmix::{
    ChannelRole, CoefficientTable, Layout, MappingPolicy, MixerConfig, SampleFormat, Session,
};
use hound::{SampleFormat as WavSampleFormat, WavSpec};
use std::f64::consts::FRAC_1_SQRT_2;
use tempfile::TempDir;

use ChannelRole::*;

/// Helper to create an interleaved buffer with a distinct sine per channel
fn create_multichannel(channels: usize, frames: usize) -> Vec<f32> {
    let mut samples = Vec::with_capacity(channels * frames);
    for f in 0..frames {
        for c in 0..channels {
            let t = f as f64 / 48000.0;
            let freq = 220.0 * (c + 1) as f64;
            samples.push((0.5 * (2.0 * std::f64::consts::PI * freq * t).sin()) as f32);
        }
    }
    samples
}

fn wav_spec(channels: u16, format: SampleFormat) -> WavSpec {
    let (bits_per_sample, sample_format) = match format {
        SampleFormat::I16 => (16, WavSampleFormat::Int),
        SampleFormat::I32 => (32, WavSampleFormat::Int),
        _ => (32, WavSampleFormat::Float),
    };
    WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample,
        sample_format,
    }
}

// === Session Lifecycle Tests ===

#[test]
fn test_session_downmix_5_1_to_stereo() {
    let session = Session::create(
        SampleFormat::F32,
        Layout::surround_5_1().roles(),
        Layout::stereo().roles(),
    )
    .unwrap();

    // FL FR FC LFE BL BR
    let input = [0.1_f32, 0.2, 0.4, 0.8, 0.3, 0.5];
    let mut output = [0.0_f32; 2];
    assert_eq!(session.mix(&input, &mut output).unwrap(), 1);

    // Exact matches own the front pair; everything else has nowhere open to fold
    assert_relative_eq!(output[0], 0.1);
    assert_relative_eq!(output[1], 0.2);

    session.destroy();
}

#[test]
fn test_session_upmix_stereo_to_5_1() {
    let session = Session::create(
        SampleFormat::F64,
        Layout::stereo().roles(),
        Layout::surround_5_1().roles(),
    )
    .unwrap();

    let input = [0.5_f64, -0.25];
    let mut output = [9.0_f64; 6];
    session.mix(&input, &mut output).unwrap();

    // Inputs present in the output never fold, so everything else is silent
    assert_eq!(output, [0.5, -0.25, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_session_strict_rejects_unreachable_output() {
    let err = Session::with_config(
        SampleFormat::F32,
        &[FrontLeft, FrontRight],
        &[FrontLeft, FrontRight, LowFrequency],
        &MixerConfig::strict(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_MAPPING");
    assert!(err.is_caller_error());
}

#[test]
fn test_session_rejects_empty_layouts() {
    let err = Session::create(SampleFormat::F32, &[], &[FrontLeft]).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_LAYOUT");
    let err = Session::create(SampleFormat::F32, &[FrontLeft], &[]).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_LAYOUT");
}

#[test]
fn test_independent_sessions_on_threads() {
    let mono_to_stereo =
        Session::create(SampleFormat::F32, &[FrontCenter], &[FrontLeft, FrontRight]).unwrap();
    let swap = Session::create(
        SampleFormat::F32,
        &[FrontLeft, FrontRight],
        &[FrontRight, FrontLeft],
    )
    .unwrap();

    std::thread::scope(|scope| {
        let a = scope.spawn(|| {
            let mut out = [0.0_f32; 2];
            mono_to_stereo.mix(&[1.0_f32], &mut out).unwrap();
            out
        });
        let b = scope.spawn(|| {
            let mut out = [0.0_f32; 2];
            swap.mix(&[1.0_f32, 2.0], &mut out).unwrap();
            out
        });
        let a = a.join().unwrap();
        let b = b.join().unwrap();
        assert_relative_eq!(a[0], FRAC_1_SQRT_2 as f32);
        assert_eq!(b, [2.0, 1.0]);
    });
}

#[test]
fn test_session_integer_formats() {
    let session = Session::create(SampleFormat::I16, &[FrontCenter], &[FrontLeft, FrontRight])
        .unwrap();
    let mut output = [0_i16; 4];
    session.mix(&[i16::MAX, i16::MIN], &mut output).unwrap();
    let expected = (i16::MAX as f64 * FRAC_1_SQRT_2).round() as i16;
    assert_eq!(output[0], expected);
    assert_eq!(output[1], expected);
    assert!(output[2] < 0);

    let session = Session::create(SampleFormat::U8, &[FrontLeft], &[FrontLeft]).unwrap();
    let mut output = [0_u8; 3];
    session.mix(&[0_u8, 128, 255], &mut output).unwrap();
    assert_eq!(output, [0, 128, 255]);
}

// === Configuration Tests ===

#[test]
fn test_config_file_drives_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixer.json");
    std::fs::write(
        &path,
        r#"{
            "policy": "strict",
            "coefficients": {
                "version": 7,
                "exact": 1.0,
                "center": 0.5,
                "surround": 0.5,
                "adjacent": 1.0,
                "lateral": 0.5
            }
        }"#,
    )
    .unwrap();

    let config = MixerConfig::load(&path).unwrap();
    assert_eq!(config.policy, MappingPolicy::Strict);
    assert_eq!(config.coefficients.version, 7);

    let session = Session::with_config(
        SampleFormat::F32,
        &[FrontCenter],
        &[FrontLeft, FrontRight],
        &config,
    )
    .unwrap();
    let mut out = [0.0_f32; 2];
    session.mix(&[2.0_f32], &mut out).unwrap();
    assert_eq!(out, [1.0, 1.0]);
    assert_eq!(session.matrix().table_version(), 7);
}

#[test]
fn test_config_rejects_bad_table() {
    let config = MixerConfig {
        coefficients: CoefficientTable {
            center: f64::NAN,
            ..CoefficientTable::LATEST
        },
        ..MixerConfig::default()
    };
    let err = Session::with_config(
        SampleFormat::F32,
        &[FrontCenter],
        &[FrontLeft],
        &config,
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

// === WAV Remix Tests ===

#[test]
fn test_remix_wav_5_1_float_to_stereo() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("surround.wav");
    let dest = dir.path().join("stereo.wav");

    // Longer than one streaming block
    let frames = 2500;
    let samples = create_multichannel(6, frames);
    write_wav(&source, wav_spec(6, SampleFormat::F32), &samples).unwrap();

    let report = remix_wav(
        &source,
        &dest,
        None,
        Layout::stereo(),
        &MixerConfig::default(),
    )
    .unwrap();
    assert_eq!(report.frames, frames as u64);
    assert_eq!(report.format, SampleFormat::F32);
    assert_eq!(report.sample_rate, 48000);
    assert_eq!(report.input, Layout::surround_5_1());

    let (spec, written) = read_wav::<f32>(&dest).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(written.len(), frames * 2);
    for f in 0..frames {
        assert_eq!(written[f * 2], samples[f * 6]);
        assert_eq!(written[f * 2 + 1], samples[f * 6 + 1]);
    }
}

#[test]
fn test_remix_wav_i16_mono_to_stereo() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("mono.wav");
    let dest = dir.path().join("stereo.wav");

    let samples: Vec<i16> = (0..100).map(|i| (i * 100) as i16).collect();
    write_wav(&source, wav_spec(1, SampleFormat::I16), &samples).unwrap();

    let report = remix_wav(
        &source,
        &dest,
        Some(Layout::mono()),
        Layout::stereo(),
        &MixerConfig::default(),
    )
    .unwrap();
    assert_eq!(report.format, SampleFormat::I16);

    let (_, written) = read_wav::<i16>(&dest).unwrap();
    assert_eq!(written.len(), 200);
    for (i, &s) in samples.iter().enumerate() {
        let expected = (s as f64 * FRAC_1_SQRT_2).round() as i16;
        assert_eq!(written[i * 2], expected);
        assert_eq!(written[i * 2 + 1], expected);
    }
}

#[test]
fn test_remix_wav_layout_channel_mismatch() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("stereo.wav");
    let dest = dir.path().join("out.wav");
    write_wav(&source, wav_spec(2, SampleFormat::F32), &[0.0_f32; 8]).unwrap();

    let err = remix_wav(
        &source,
        &dest,
        Some(Layout::surround_5_1()),
        Layout::mono(),
        &MixerConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_LAYOUT");
    assert!(!dest.exists());
}

#[test]
fn test_remix_wav_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = remix_wav(
        &dir.path().join("missing.wav"),
        &dir.path().join("out.wav"),
        None,
        Layout::stereo(),
        &MixerConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "WAV_ERROR");
}
