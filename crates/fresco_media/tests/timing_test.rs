//! Tests for subtitle timing and SRT rendering.

use fresco_error::FrescoErrorKind;
use fresco_media::{compute_cues, format_timestamp, render_srt};

const EPS: f64 = 1e-9;

fn words(n: usize) -> String {
    (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_long_segment_splits_proportionally() {
    let text = words(25);
    let cues = compute_cues(&[text], &[10.0], 10, 5.0).unwrap();

    assert_eq!(cues.len(), 3);
    assert_eq!(cues[0].text().split_whitespace().count(), 10);
    assert_eq!(cues[1].text().split_whitespace().count(), 10);
    assert_eq!(cues[2].text().split_whitespace().count(), 5);

    assert!((cues[0].start() - 5.0).abs() < EPS);
    assert!((cues[0].end() - 9.0).abs() < EPS);
    assert!((cues[1].end() - 13.0).abs() < EPS);
    assert!((cues[2].duration() - 2.0).abs() < EPS);
    assert_eq!(*cues[2].end(), 15.0);
}

#[test]
fn test_short_segment_is_one_cue() {
    let cues = compute_cues(&["Plants turn light into sugar."], &[3.0], 10, 5.0).unwrap();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text(), "Plants turn light into sugar.");
    assert_eq!(*cues[0].start(), 5.0);
    assert_eq!(*cues[0].end(), 8.0);
}

#[test]
fn test_cues_are_contiguous_and_end_at_total() {
    let texts = [words(23), words(7), String::new(), words(41)];
    let durations = [7.3, 2.9, 1.1, 13.37];
    let cues = compute_cues(&texts, &durations, 6, 5.0).unwrap();

    assert!((*cues[0].start() - 5.0).abs() < EPS);
    for pair in cues.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
        assert!(pair[0].start() <= pair[0].end());
    }
    let total: f64 = 5.0 + durations.iter().sum::<f64>();
    assert!((cues.last().unwrap().end() - total).abs() < EPS);
}

#[test]
fn test_segment_boundaries_are_exact() {
    // Every chunk split is uneven, so drift would show at boundaries
    let texts = [words(7), words(7)];
    let cues = compute_cues(&texts, &[1.0 / 3.0, 2.0 / 3.0], 3, 0.0).unwrap();
    assert_eq!(cues.len(), 6);
    assert_eq!(*cues[2].end(), 1.0 / 3.0);
    assert_eq!(*cues[5].end(), 1.0 / 3.0 + 2.0 / 3.0);
}

#[test]
fn test_empty_text_still_consumes_duration() {
    let cues = compute_cues(&["", "next line"], &[2.0, 3.0], 10, 5.0).unwrap();
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text(), "");
    assert_eq!(*cues[0].end(), 7.0);
    assert_eq!(*cues[1].start(), 7.0);
    assert_eq!(*cues[1].end(), 10.0);
}

#[test]
fn test_mismatched_lengths_are_alignment_errors() {
    let err = compute_cues(&["a", "b"], &[1.0], 10, 5.0).unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Alignment(_)));
}

#[test]
fn test_zero_chunk_size_rejected() {
    let err = compute_cues(&["a"], &[1.0], 0, 5.0).unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Validation(_)));
}

#[test]
fn test_no_segments_no_cues() {
    let texts: [&str; 0] = [];
    assert!(compute_cues(&texts, &[], 10, 5.0).unwrap().is_empty());
}

#[test]
fn test_timestamp_format() {
    assert_eq!(format_timestamp(0.0), "00:00:00,000");
    assert_eq!(format_timestamp(9.0), "00:00:09,000");
    assert_eq!(format_timestamp(61.2346), "00:01:01,235");
    assert_eq!(format_timestamp(36_000.0), "10:00:00,000");
}

#[test]
fn test_srt_rendering() {
    let cues = compute_cues(&["hello there", "general kenobi"], &[2.0, 1.5], 10, 5.0).unwrap();
    let srt = render_srt(&cues);
    assert_eq!(
        srt,
        "1\n00:00:05,000 --> 00:00:07,000\nhello there\n\n\
         2\n00:00:07,000 --> 00:00:08,500\ngeneral kenobi\n\n"
    );
}
