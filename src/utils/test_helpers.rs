use anyhow::Result;
use std::sync::{Arc, Mutex, Once};

use crate::app::HeadlessController;
use crate::config::{AppConfig, MemorySettings};
use crate::core::{Collaborators, HostShell, IdentityTranslator, MainAction};

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// This function is wrapped in a `Once` block to ensure that the global
/// subscriber is set exactly one time, even when tests are run in parallel.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A host that remembers what it was asked to do.
#[derive(Default)]
pub struct RecordingHost {
    pub forwarded: Mutex<Vec<MainAction>>,
    pub opened: Mutex<Vec<String>>,
    pub clipboard: Mutex<String>,
}

impl HostShell for RecordingHost {
    fn forward(&self, action: MainAction) -> Result<()> {
        self.forwarded.lock().unwrap().push(action);
        Ok(())
    }

    fn open_external(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn read_clipboard(&self) -> Result<String> {
        Ok(self.clipboard.lock().unwrap().clone())
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        *self.clipboard.lock().unwrap() = text.to_string();
        Ok(())
    }
}

/// Collaborators backed by test doubles, with handles to inspect them.
pub struct Fixture {
    pub controller: Arc<HeadlessController>,
    pub settings: Arc<MemorySettings>,
    pub host: Arc<RecordingHost>,
    pub collaborators: Collaborators,
}

impl Fixture {
    pub fn new() -> Self {
        setup_test_logging();
        let config = AppConfig::default();
        let controller = Arc::new(HeadlessController::default());
        let settings = Arc::new(MemorySettings::from_config(&config));
        let host = Arc::new(RecordingHost::default());
        let collaborators = Collaborators {
            controller: controller.clone(),
            settings: settings.clone(),
            translator: Arc::new(IdentityTranslator),
            host: host.clone(),
            identity: config.identity(),
        };
        Self {
            controller,
            settings,
            host,
            collaborators,
        }
    }
}
