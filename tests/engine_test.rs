// tests/engine_test.rs
//
// Full-engine runs over crafted synthetic rasters: each manipulation type
// must surface as its indicator tag without disturbing the others' fields.

mod test_utils;

use imagecheckr::core::{Detect, TamperingDetectionEngine};
use imagecheckr::{ExternalFindings, ImageSample, IndicatorTag, Thresholds};
use test_utils::{copy_block, noise_sample, Lcg};

#[test]
fn test_cloned_blocks_surface_as_clone_tag() {
    let mut sample = noise_sample(256, 256, 101);
    copy_block(&mut sample, (32, 32), (160, 160), 32);

    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    assert!(findings.clone_matches >= 1);
    assert!(findings.indicator_tags.contains(&IndicatorTag::Clone));
}

#[test]
fn test_untouched_noise_has_no_clone_tag() {
    let sample = noise_sample(256, 256, 103);
    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    assert_eq!(findings.clone_matches, 0);
    assert!(!findings.indicator_tags.contains(&IndicatorTag::Clone));
}

#[test]
fn test_periodic_pattern_surfaces_as_resampling_tag() {
    let mut rng = Lcg::new(107);
    let pixels: Vec<u8> = (0..256u32 * 256)
        .flat_map(|i| {
            let x = i % 256;
            let phase = 2.0 * std::f64::consts::PI * 12.0 * x as f64 / 256.0;
            let noise = (rng.next_byte() % 5) as f64;
            let v = (125.0 + 100.0 * phase.sin() + noise) as u8;
            [v, v, v]
        })
        .collect();
    let sample = ImageSample::from_rgb8(pixels, 256, 256, false, None, false).unwrap();

    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    assert!(findings.is_resampled);
    assert!(findings
        .indicator_tags
        .contains(&IndicatorTag::ResamplingDetected));
}

#[test]
fn test_spliced_noise_floor_surfaces_as_noise_tag() {
    let mut rng = Lcg::new(109);
    let pixels: Vec<u8> = (0..400u32 * 400)
        .flat_map(|i| {
            let x = i % 400;
            let v = if x < 200 { rng.next_byte() } else { 128 };
            [v, v, v]
        })
        .collect();
    let sample = ImageSample::from_rgb8(pixels, 400, 400, false, None, false).unwrap();

    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    assert!(findings.noise_ratio > 3.0);
    assert!(findings
        .indicator_tags
        .contains(&IndicatorTag::NoiseInconsistency));
}

#[test]
fn test_heavy_quantization_tables_surface_as_tag() {
    let mut sample = noise_sample(96, 96, 113);
    sample.source_is_jpeg = true;
    sample.quantization_tables = Some([(0u8, vec![55u16; 64]), (1, vec![60; 64])].into());

    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    let signal = findings.quantization_signal.expect("tables present");
    assert!(signal.average > 40.0);
    assert!(findings
        .indicator_tags
        .contains(&IndicatorTag::HighQuantization));
}

#[test]
fn test_flat_color_cast_surfaces_as_temperature_tag() {
    let pixels: Vec<u8> = (0..128u32 * 128).flat_map(|_| [210u8, 120, 120]).collect();
    let sample = ImageSample::from_rgb8(pixels, 128, 128, false, None, false).unwrap();

    let findings = TamperingDetectionEngine::new().detect(&sample, &Thresholds::default());
    assert!(findings.color_temperature_issue);
    assert!(findings
        .indicator_tags
        .contains(&IndicatorTag::ColorTemperature));
}

#[test]
fn test_full_analysis_is_deterministic() {
    let mut sample = noise_sample(256, 256, 127);
    copy_block(&mut sample, (64, 0), (192, 192), 32);

    let analyzer = imagecheckr::CorroborationAnalyzer::new();
    let first = analyzer
        .analyze_sample(&sample, &ExternalFindings::default())
        .unwrap();
    let second = analyzer
        .analyze_sample(&sample, &ExternalFindings::default())
        .unwrap();
    assert_eq!(first, second);
}
