//! Persistence boundary — the core hands its current config to a
//! caller-supplied sink and never serializes to any storage medium itself.

use std::sync::{Arc, Mutex};

use admit_core::AdmitResult;

use crate::types::BuilderConfig;

/// Trait for receiving saved configurations. Implementations route configs
/// to the backend API, local storage, or a test capture.
pub trait SaveSink: Send + Sync {
    fn save(&self, config: &BuilderConfig) -> AdmitResult<()>;
}

/// No-op sink for tests and sessions that don't persist.
pub struct NoOpSink;

impl SaveSink for NoOpSink {
    fn save(&self, _config: &BuilderConfig) -> AdmitResult<()> {
        Ok(())
    }
}

/// In-memory sink that captures saved configs for testing.
#[derive(Default)]
pub struct CaptureSink {
    saved: Mutex<Vec<BuilderConfig>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<BuilderConfig> {
        self.saved.lock().expect("save sink mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.saved.lock().expect("save sink mutex poisoned").len()
    }
}

impl SaveSink for CaptureSink {
    fn save(&self, config: &BuilderConfig) -> AdmitResult<()> {
        self.saved
            .lock()
            .expect("save sink mutex poisoned")
            .push(config.clone());
        Ok(())
    }
}

/// Convenience: a no-op sink for sessions that don't need persistence.
pub fn noop_sink() -> Arc<dyn SaveSink> {
    Arc::new(NoOpSink)
}

/// Convenience: a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}
