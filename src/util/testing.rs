// src/util/testing.rs

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::bookmark::Bookmark;
use crate::domain::services::notification::{Notification, Notifier, Severity};
use crate::domain::services::observer::ListObserver;

pub use crate::config::{ENV_SEED, ENV_STORAGE_DIR};

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    pub log_filter: String,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes logging for tests exactly once.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
        setup_test_logging(&log_filter);
        info!("Test environment initialized");
        TestEnv { log_filter }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging(filter: &str) {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(filter)),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the `NEWTAB_*` environment variables on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    storage_dir: Option<String>,
    seed: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            storage_dir: env::var(ENV_STORAGE_DIR).ok(),
            seed: env::var(ENV_SEED).ok(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        env::remove_var(ENV_STORAGE_DIR);
        env::remove_var(ENV_SEED);
        if let Some(val) = &self.storage_dir {
            env::set_var(ENV_STORAGE_DIR, val);
        }
        if let Some(val) = &self.seed {
            env::set_var(ENV_SEED, val);
        }
    }
}

/// Notifier that keeps every message for later assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.all().iter().filter(|n| n.severity == severity).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

/// Observer counting re-renders and keeping the last list it was shown
#[derive(Debug, Default)]
pub struct RecordingObserver {
    renders: AtomicUsize,
    last: Mutex<Vec<Bookmark>>,
}

impl RecordingObserver {
    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub fn last_list(&self) -> Vec<Bookmark> {
        self.last.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ListObserver for RecordingObserver {
    fn list_changed(&self, bookmarks: &[Bookmark]) {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = bookmarks.to_vec();
        }
    }
}
