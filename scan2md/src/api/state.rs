use std::sync::Arc;

use crate::config::Config;
use crate::ocr::OcrProvider;
use crate::scratch::ScratchStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: OcrProvider,
    pub scratch: ScratchStore,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider) -> Self {
        let scratch = ScratchStore::new(config.upload.scratch_dir.clone());
        Self {
            config: Arc::new(config),
            ocr,
            scratch,
        }
    }
}
