//! A queue whose jobs fail at scripting, and a server to reach it.

#![allow(dead_code)]

use async_trait::async_trait;
use fresco_core::{FrescoConfig, MediaSource, Script};
use fresco_error::{AssemblyError, AssemblyErrorKind, FrescoResult, GenerationError, GenerationErrorKind};
use fresco_interface::{ImageGenerator, ScriptGenerator, SpeechGenerator};
use fresco_media::{Encoder, Timeline};
use fresco_pipeline::{Collaborators, JobQueue, Orchestrator};
use fresco_server::{ApiState, create_router};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct Offline;

#[async_trait]
impl ScriptGenerator for Offline {
    async fn generate(&self, _: &str, _: u32, _: &[String]) -> FrescoResult<Script> {
        Err(GenerationError::new(GenerationErrorKind::Script("offline".into())).into())
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}

#[async_trait]
impl ImageGenerator for Offline {
    async fn generate(&self, _: &str) -> FrescoResult<Option<MediaSource>> {
        Ok(None)
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}

#[async_trait]
impl SpeechGenerator for Offline {
    async fn synthesize(&self, _: &str, _: &str, _: f32) -> FrescoResult<Vec<u8>> {
        Err(GenerationError::new(GenerationErrorKind::Speech("offline".into())).into())
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }
}

#[async_trait]
impl Encoder for Offline {
    async fn render_placeholder(&self, _: &str, _: &Path) -> FrescoResult<PathBuf> {
        Err(AssemblyError::new(AssemblyErrorKind::Encode("offline".into())).into())
    }

    async fn encode(&self, _: &Timeline, _: &Path) -> FrescoResult<PathBuf> {
        Err(AssemblyError::new(AssemblyErrorKind::Encode("offline".into())).into())
    }
}

/// Serve the router on an ephemeral port; returns the base URL.
pub async fn spawn_server(dir: &Path) -> String {
    let mut config = FrescoConfig::bundled().unwrap();
    config.paths.scratch_root = dir.join("jobs");
    config.paths.publish_dir = dir.join("videos");

    let collaborators = Collaborators::new(Arc::new(Offline), Arc::new(Offline), Arc::new(Offline));
    let orchestrator = Orchestrator::new(config, collaborators, Arc::new(Offline)).unwrap();
    let queue = Arc::new(JobQueue::start(Arc::new(orchestrator), 1));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(ApiState::new(queue)))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}
