//! Tests for job workspaces and publishing.

use fresco_core::{NarrationSegment, Script, VisualCue};
use fresco_error::FrescoErrorKind;
use fresco_storage::{JobWorkspace, Publisher, validate_filename};
use tempfile::TempDir;

#[tokio::test]
async fn test_clean_missing_workspace_is_noop() {
    let temp = TempDir::new().unwrap();
    let ws = JobWorkspace::new(temp.path().join("never-created"));

    ws.clean().await.unwrap();
    ws.clean().await.unwrap();

    assert!(ws.images_dir().is_dir());
    assert!(ws.audio_dir().is_dir());
    assert!(ws.output_dir().is_dir());
}

#[tokio::test]
async fn test_clean_wipes_images_and_audio_only() {
    let temp = TempDir::new().unwrap();
    let ws = JobWorkspace::new(temp.path().join("job"));
    ws.clean().await.unwrap();

    ws.write_image("scene_0-000.png", b"img").await.unwrap();
    ws.write_audio("segment_0.wav", b"wav").await.unwrap();
    ws.write_subtitles("1\n").await.unwrap();

    ws.clean().await.unwrap();

    assert_eq!(std::fs::read_dir(ws.images_dir()).unwrap().count(), 0);
    assert_eq!(std::fs::read_dir(ws.audio_dir()).unwrap().count(), 0);
    assert!(ws.subtitles_path().exists());
}

#[tokio::test]
async fn test_script_round_trip() {
    let temp = TempDir::new().unwrap();
    let ws = JobWorkspace::new(temp.path());
    let script = Script::new(
        "Tides",
        vec![NarrationSegment::new("The moon pulls the sea.")],
        vec![VisualCue::new("moon over water")],
    );

    let path = ws.persist_script(&script).await.unwrap();
    assert_eq!(path, ws.script_path());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("audio_script"));
    assert_eq!(ws.load_script().await.unwrap(), script);
}

#[tokio::test]
async fn test_load_missing_script_is_not_found() {
    let temp = TempDir::new().unwrap();
    let ws = JobWorkspace::new(temp.path());
    assert!(ws.load_script().await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_remove_workspace() {
    let temp = TempDir::new().unwrap();
    let ws = JobWorkspace::new(temp.path().join("job"));
    ws.clean().await.unwrap();

    ws.remove().await.unwrap();
    assert!(!ws.root().exists());
    ws.remove().await.unwrap();
}

#[test]
fn test_filename_validation() {
    assert!(validate_filename("Tides_1700000000.mp4").is_ok());
    assert!(validate_filename("").is_err());
    assert!(validate_filename("../etc/passwd").is_err());
    assert!(validate_filename("a/b.mp4").is_err());
    assert!(validate_filename("a\\b.mp4").is_err());
    assert!(validate_filename("..").is_err());
}

#[tokio::test]
async fn test_publish_list_and_retrieve() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("render.mp4");
    std::fs::write(&source, b"video").unwrap();

    let publisher = Publisher::new(temp.path().join("published"));
    assert!(publisher.list_published().await.unwrap().is_empty());

    let b = publisher.publish(&source, "b_2.mp4").await.unwrap();
    publisher.publish(&source, "a_1.webm").await.unwrap();
    std::fs::write(publisher.dir().join("notes.txt"), b"no").unwrap();

    assert_eq!(std::fs::read(&b).unwrap(), b"video");
    assert_eq!(
        publisher.list_published().await.unwrap(),
        vec!["a_1.webm".to_string(), "b_2.mp4".to_string()]
    );
    assert_eq!(publisher.retrieve("b_2.mp4").await.unwrap(), b);
}

#[tokio::test]
async fn test_retrieve_rejects_traversal_and_missing() {
    let temp = TempDir::new().unwrap();
    let publisher = Publisher::new(temp.path());

    let err = publisher.retrieve("../secret.mp4").await.unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Validation(_)));

    let err = publisher.retrieve("missing.mp4").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_failed_publish_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let publisher = Publisher::new(temp.path().join("published"));
    std::fs::create_dir_all(publisher.dir()).unwrap();
    // Left over from an interrupted earlier attempt
    let stale = publisher.dir().join(".intro_1.mp4.tmp");
    std::fs::write(&stale, b"partial").unwrap();

    let err = publisher
        .publish(&temp.path().join("missing.mp4"), "intro_1.mp4")
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), FrescoErrorKind::Storage(_)));
    assert!(!stale.exists());
    assert!(!publisher.path_for("intro_1.mp4").exists());
    assert!(publisher.list_published().await.unwrap().is_empty());
}
