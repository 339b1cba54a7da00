//! End-to-end orchestrator tests with fake collaborators.

mod test_utils;

use fresco_core::{JobRequest, Stage};
use fresco_error::FrescoErrorKind;
use fresco_media::Clip;
use fresco_pipeline::Job;
use parking_lot::Mutex;
use std::sync::atomic::Ordering;
use tempfile::TempDir;
use test_utils::{FakeImages, FakeScript, FakeSpeech, harness, test_config};

const THREE_WORDS: &str = "the moon pulls";
const FOUR_WORDS: &str = "the ocean follows along";

fn stage_recorder() -> (std::sync::Arc<Mutex<Vec<Stage>>>, impl Fn(Stage) + Send + Sync) {
    let stages = std::sync::Arc::new(Mutex::new(Vec::new()));
    let sink = stages.clone();
    (stages, move |stage| sink.lock().push(stage))
}

#[tokio::test]
async fn test_job_runs_every_stage_and_publishes() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::new(&[THREE_WORDS, FOUR_WORDS], &["moon", "sea"]),
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));
    let (stages, observe) = stage_recorder();

    let published = h.orchestrator.run(&job, &observe).await.unwrap();

    assert_eq!(published, dir.path().join("videos").join(&job.filename));
    assert_eq!(std::fs::read(&published).unwrap(), b"fake mp4");
    assert_eq!(
        *stages.lock(),
        vec![
            Stage::Cleaning,
            Stage::Scripting,
            Stage::Imaging,
            Stage::Narrating,
            Stage::Timing,
            Stage::Assembling,
            Stage::Publishing,
            Stage::Done,
        ]
    );

    // 5 s intro + 3 s + 4 s + 5 s outro
    let timelines = h.encoder.timelines.lock();
    assert_eq!(timelines.len(), 1);
    assert!((timelines[0].total_duration() - 17.0).abs() < 1e-9);
    assert_eq!(timelines[0].segment_count(), 2);

    // Workspace is reclaimed by default
    assert!(!h.orchestrator.workspace(&job).root().exists());
}

#[tokio::test]
async fn test_one_failed_image_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.keep_workspace = true;
    let h = harness(
        config,
        FakeScript::new(&[THREE_WORDS, FOUR_WORDS, THREE_WORDS], &["a", "b", "c"]),
        FakeImages::failing(&["b"]),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    let images = h.orchestrator.workspace(&job).images_dir();
    let mut names: Vec<String> = std::fs::read_dir(images)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["scene_0-000.png", "scene_2-002.png"]);
    assert_eq!(h.images.calls(), 3);

    // Two images pair with the first two of three clips
    assert_eq!(h.encoder.timelines.lock()[0].segment_count(), 2);
}

#[tokio::test]
async fn test_all_images_failing_fails_imaging() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::new(&[THREE_WORDS], &["a", "b"]),
        FakeImages::failing(&["a", "b"]),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));
    let (stages, observe) = stage_recorder();

    let err = h.orchestrator.run(&job, &observe).await.unwrap_err();

    match err.kind() {
        FrescoErrorKind::Pipeline(p) => {
            assert_eq!(p.stage, "imaging");
            assert!(p.cause.contains("images"));
        }
        other => panic!("expected pipeline error, got {:?}", other),
    }
    assert_eq!(stages.lock().last(), Some(&Stage::Imaging));
    assert!(h.encoder.timelines.lock().is_empty());
    assert!(!dir.path().join("videos").join(&job.filename).exists());
}

#[tokio::test]
async fn test_script_failure_halts_at_scripting() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::failing(),
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    let err = h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        FrescoErrorKind::Pipeline(p) if p.stage == "scripting"
    ));
    assert_eq!(h.images.calls(), 0);
}

#[tokio::test]
async fn test_empty_narration_fails_validation_at_scripting() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::new(&[], &["a"]),
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    let err = h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        FrescoErrorKind::Pipeline(p) if p.stage == "scripting"
    ));
}

#[tokio::test]
async fn test_skipped_narration_keeps_subtitles_aligned() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.keep_workspace = true;
    let h = harness(
        config,
        FakeScript::new(
            &["first line here", "second line", "third and final line"],
            &["a", "b"],
        ),
        FakeImages::default(),
        FakeSpeech::failing(&["second line"]),
    );
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    let srt = std::fs::read_to_string(h.orchestrator.workspace(&job).subtitles_path()).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:05,000 --> 00:00:08,000\nfirst line here\n\n\
         2\n00:00:08,000 --> 00:00:12,000\nthird and final line\n\n"
    );
}

#[tokio::test]
async fn test_subtitles_and_captions_cover_only_paired_clips() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.keep_workspace = true;
    config.video.burn_captions = true;
    let h = harness(
        config,
        FakeScript::new(&[THREE_WORDS, FOUR_WORDS, "two words"], &["only"]),
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    // 5 s intro + one 3 s clip + 5 s outro
    let timelines = h.encoder.timelines.lock();
    let timeline = &timelines[0];
    assert_eq!(timeline.segment_count(), 1);
    assert!((timeline.total_duration() - 13.0).abs() < 1e-9);
    assert!(!timeline.captions().is_empty());
    assert!(timeline.captions().iter().all(|c| *c.end() <= 8.0 + 1e-9));

    let srt = std::fs::read_to_string(h.orchestrator.workspace(&job).subtitles_path()).unwrap();
    assert_eq!(srt, "1\n00:00:05,000 --> 00:00:08,000\nthe moon pulls\n\n");
}

#[tokio::test]
async fn test_timestamp_labels_cannot_reorder_or_escape_images() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.keep_workspace = true;
    let mut script = FakeScript::new(&[THREE_WORDS, FOUR_WORDS], &["moon", "sea"]);
    if let Some(s) = script.script.as_mut() {
        s.visuals[0].timestamp = Some("part_9".into());
        s.visuals[1].timestamp = Some("../x".into());
    }
    let h = harness(config, script, FakeImages::default(), FakeSpeech::default());
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    let images_dir = h.orchestrator.workspace(&job).images_dir();
    let mut names: Vec<String> = std::fs::read_dir(&images_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["scene_0-part-9.png", "scene_1---x.png"]);

    let timelines = h.encoder.timelines.lock();
    let images: Vec<_> = timelines[0]
        .clips()
        .iter()
        .filter_map(|c| match c {
            Clip::Segment { input, .. } => Some(input.image.clone()),
            Clip::Card(_) => None,
        })
        .collect();
    assert_eq!(
        images,
        vec![
            images_dir.join("scene_0-part-9.png"),
            images_dir.join("scene_1---x.png"),
        ]
    );
}

#[tokio::test]
async fn test_all_narration_failing_fails_narrating() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::new(&[THREE_WORDS], &["a"]),
        FakeImages::default(),
        FakeSpeech::failing(&[THREE_WORDS]),
    );
    let job = Job::new(JobRequest::new("Tides"));

    let err = h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        FrescoErrorKind::Pipeline(p) if p.stage == "narrating"
    ));
}

#[tokio::test]
async fn test_no_visual_cues_uses_placeholder() {
    let dir = TempDir::new().unwrap();
    let h = harness(
        test_config(dir.path()),
        FakeScript::new(&[THREE_WORDS, FOUR_WORDS], &["", "   "]),
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    assert_eq!(h.images.calls(), 0);
    assert_eq!(h.encoder.placeholders.load(Ordering::SeqCst), 1);
    let timelines = h.encoder.timelines.lock();
    assert_eq!(timelines[0].segment_count(), 2);
    let images: Vec<_> = timelines[0]
        .clips()
        .iter()
        .filter_map(|c| match c {
            Clip::Segment { input, .. } => Some(input.image.clone()),
            Clip::Card(_) => None,
        })
        .collect();
    assert_eq!(images[0], images[1]);
}

#[tokio::test]
async fn test_speaker_roles_map_to_voices() {
    let dir = TempDir::new().unwrap();
    let mut script = FakeScript::new(&["one", "two", "three"], &["a"]);
    if let Some(s) = script.script.as_mut() {
        s.narration[1].speaker = "narrator_female".into();
        s.narration[2].speaker = "narrator_male".into();
    }
    let h = harness(
        test_config(dir.path()),
        script,
        FakeImages::default(),
        FakeSpeech::default(),
    );
    let job = Job::new(JobRequest::new("Tides"));

    h.orchestrator.run(&job, &|_: Stage| {}).await.unwrap();

    assert_eq!(
        *h.speech.voices.lock(),
        vec!["am_adam".to_string(), "af_heart".to_string(), "am_adam".to_string()]
    );
}
