//! Production wiring from configuration.

use fresco::{
    FrescoConfig, FrescoErrorKind, ImageGenerator, ObservabilityConfig, ScriptGenerator,
    SpeechGenerator, build_orchestrator, http_collaborators,
};

fn configured() -> FrescoConfig {
    let mut config = FrescoConfig::bundled().unwrap();
    config.providers.script_url = Some("http://127.0.0.1:9/script".to_string());
    config.providers.image_url = Some("http://127.0.0.1:9/images".to_string());
    config.providers.speech_url = Some("http://127.0.0.1:9/speech".to_string());
    config.providers.api_key_env = None;
    config
}

#[test]
fn test_missing_endpoint_blocks_wiring() {
    let mut config = configured();
    config.providers.speech_url = None;

    let err = http_collaborators(&config.providers).unwrap_err();
    assert!(matches!(err.kind(), FrescoErrorKind::Config(_)));
    assert!(err.to_string().contains("speech_url"));
    assert!(build_orchestrator(config).is_err());
}

#[test]
fn test_full_wiring() {
    let collaborators = http_collaborators(&configured().providers).unwrap();
    assert_eq!(collaborators.script.provider_name(), "http");
    assert_eq!(collaborators.image.provider_name(), "http");
    assert_eq!(collaborators.speech.provider_name(), "http");

    let orchestrator = build_orchestrator(configured()).unwrap();
    assert_eq!(orchestrator.config().timing.chunk_size, 10);
}

#[test]
fn test_observability_builder() {
    let config = ObservabilityConfig::new()
        .with_log_level("warn,fresco_pipeline=trace")
        .with_json_logs(true);
    assert_eq!(config.log_level, "warn,fresco_pipeline=trace");
    assert!(config.json_logs);
}
