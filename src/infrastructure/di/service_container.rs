// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::{BookmarkServiceImpl, ClockPoller};
use crate::config::Settings;
use crate::domain::repositories::storage::KeyValueStorage;
use crate::domain::services::confirmation::Confirmation;
use crate::domain::services::notification::Notifier;
use crate::infrastructure::html::PageRenderer;
use crate::infrastructure::repositories::json_bookmark_store::JsonBookmarkStore;
use crate::infrastructure::storage::file_storage::FileStorage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub type BookmarkController = BookmarkServiceImpl<JsonBookmarkStore>;

/// Production service container - single source of truth for service creation
#[derive(Debug)]
pub struct ServiceContainer {
    pub storage: Arc<dyn KeyValueStorage>,
    pub bookmark_store: Arc<JsonBookmarkStore>,
    pub clock_poller: ClockPoller,
    pub drag_delay: Duration,
    default_icon: String,
}

impl ServiceContainer {
    /// Wire file storage, store and clocks from the settings.
    #[instrument(level = "debug", skip(config))]
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let storage_dir = config.storage_path();
        debug!(?storage_dir, "using file storage");
        let storage: Arc<dyn KeyValueStorage> =
            Arc::new(FileStorage::new(storage_dir, Some(config.quota_bytes)));
        Self::with_storage(config, storage)
    }

    /// Same wiring over a caller supplied storage backend
    pub fn with_storage(config: &Settings, storage: Arc<dyn KeyValueStorage>) -> ApplicationResult<Self> {
        let bookmark_store = Arc::new(JsonBookmarkStore::new(
            storage.clone(),
            config.seed,
            &config.default_icon,
        ));
        let clock_poller = ClockPoller::new(config.clock_zones()?);

        Ok(Self {
            storage,
            bookmark_store,
            clock_poller,
            drag_delay: config.drag_delay(),
            default_icon: config.default_icon.clone(),
        })
    }

    /// A controller loaded from storage, asking `confirmation` before deletes and
    /// reporting through `notifier`.
    pub fn bookmark_service(
        &self,
        confirmation: Arc<dyn Confirmation>,
        notifier: Arc<dyn Notifier>,
    ) -> BookmarkController {
        BookmarkServiceImpl::new(
            self.bookmark_store.clone(),
            confirmation,
            notifier,
            &self.default_icon,
        )
    }

    pub fn page_renderer(&self) -> ApplicationResult<PageRenderer> {
        PageRenderer::new().map_err(|e| ApplicationError::Other(e.to_string()))
    }
}
