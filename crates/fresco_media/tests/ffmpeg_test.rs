//! Tests for ffmpeg command construction (no ffmpeg binary needed).

use fresco_core::{FrescoConfig, SubtitleCue};
use fresco_media::{FfmpegEncoder, SegmentInput, Timeline, TitleCard};
use std::path::{Path, PathBuf};

fn timeline(captions: Vec<SubtitleCue>) -> Timeline {
    Timeline::compose(
        TitleCard {
            text: "Tides: the moon's pull".into(),
            background: Some(PathBuf::from("intro.jpg")),
            duration: 5.0,
        },
        vec![SegmentInput {
            image: PathBuf::from("scene_0.png"),
            audio: PathBuf::from("segment_0.wav"),
            duration: 3.0,
        }],
        TitleCard {
            text: "MADE BY TEAM FRAGMENT".into(),
            background: None,
            duration: 5.0,
        },
        1.0,
        captions,
    )
}

fn encoder() -> FfmpegEncoder {
    FfmpegEncoder::new(FrescoConfig::bundled().unwrap().video, None)
}

fn args(timeline: &Timeline, output: &Path) -> Vec<String> {
    encoder()
        .encode_args(timeline, output)
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_one_video_and_one_audio_input_per_clip() {
    let args = args(&timeline(Vec::new()), Path::new("out.mp4"));
    assert_eq!(args.iter().filter(|a| *a == "-i").count(), 6);
    assert!(args.contains(&"intro.jpg".to_string()));
    assert!(args.contains(&"segment_0.wav".to_string()));
    assert!(args.iter().any(|a| a.starts_with("color=c=black:s=1920x1080")));
    assert_eq!(args.last().map(String::as_str), Some("out.mp4"));
}

#[test]
fn test_filter_graph_fades_and_concat() {
    let graph = encoder().filter_graph(&timeline(Vec::new()));
    assert!(graph.contains("fade=t=in:st=0:d=1.000"));
    assert!(graph.contains("fade=t=out:st=2.000:d=1.000"));
    assert!(graph.contains("concat=n=3:v=1:a=1[vcat][aout]"));
    assert!(graph.ends_with("[vcat]null[vout]"));
    // Colon and apostrophe in the title are escaped
    assert!(graph.contains("text='Tides\\: the moon\u{2019}s pull'"));
}

#[test]
fn test_captions_use_half_open_windows() {
    let graph = encoder().filter_graph(&timeline(vec![
        SubtitleCue::new("first", 5.0, 6.5),
        SubtitleCue::new("second", 6.5, 8.0),
    ]));
    assert!(graph.contains("enable='gte(t,5.000)*lt(t,6.500)'"));
    assert!(graph.contains("enable='gte(t,6.500)*lt(t,8.000)'"));
    assert!(graph.ends_with("[vout]"));
}

#[test]
fn test_blank_captions_draw_nothing() {
    let graph = encoder().filter_graph(&timeline(vec![
        SubtitleCue::new("", 5.0, 6.0),
        SubtitleCue::new("  ", 6.0, 7.0),
    ]));
    assert!(!graph.contains("text=''"));
    assert!(graph.ends_with("[vcat]null[vout]"));

    let graph = encoder().filter_graph(&timeline(vec![
        SubtitleCue::new("", 5.0, 6.0),
        SubtitleCue::new("tides", 6.0, 7.0),
    ]));
    assert!(!graph.contains("text=''"));
    assert!(!graph.contains("gte(t,5.000)"));
    assert!(graph.contains("enable='gte(t,6.000)*lt(t,7.000)'"));
}
