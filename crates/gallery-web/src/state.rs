use std::sync::Arc;

use gallery_core::{CoreResult, FsStore, GalleryRepository, ImageRepository, ResizeService};

use crate::config::ServerConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: FsStore,
    pub galleries: GalleryRepository,
    pub images: ImageRepository,
    pub resizer: ResizeService,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = FsStore::new(&config.store.root);
        Self {
            galleries: GalleryRepository::new(store.clone()),
            images: ImageRepository::new(store.clone()),
            resizer: ResizeService::new(store.clone(), config.resize.jpeg_quality),
            store,
            config: Arc::new(config),
        }
    }

    /// Runs a core operation on the blocking thread pool.
    ///
    /// Core calls do synchronous filesystem and codec work; keeping them off
    /// the async workers lets other requests proceed meanwhile.
    pub async fn run<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&AppState) -> CoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || op(&state))
            .await
            .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
            .map_err(AppError::from)
    }
}
