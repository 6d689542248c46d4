use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::OcrConfig;
use crate::error::{AppError, Result};
use crate::scratch::ScratchArtifact;

use super::api::TogetherOcrClient;

/// The external OCR capability: an image on disk plus a credential in, raw
/// markdown text out. The call may suspend for the length of a remote
/// round-trip; [`OcrProvider`] bounds it.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, path: &Path, credential: &str, language: &str) -> Result<String>;
}

/// Timeout-enforcing front over an [`OcrEngine`].
#[derive(Clone)]
pub struct OcrProvider {
    engine: Arc<dyn OcrEngine>,
    language: String,
    timeout_ms: u64,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let client = TogetherOcrClient::new(config)?;
        Ok(Self::with_engine(Arc::new(client), config))
    }

    /// Builds a provider around an arbitrary engine. Production code goes
    /// through [`OcrProvider::new`]; tests substitute a fake here.
    pub fn with_engine(engine: Arc<dyn OcrEngine>, config: &OcrConfig) -> Self {
        Self {
            engine,
            language: config.language.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Runs recognition against the artifact, bounded by the configured
    /// timeout. Empty text is a legitimate result (e.g. a blank image).
    pub async fn recognize(&self, artifact: &ScratchArtifact, credential: &str) -> Result<String> {
        let deadline = Duration::from_millis(self.timeout_ms);
        let call = self.engine.recognize(artifact.path(), credential, &self.language);

        match tokio::time::timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::ProviderTimeout(self.timeout_ms)),
        }
    }
}
