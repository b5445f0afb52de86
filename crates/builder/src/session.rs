//! Multi-session workspace — owns the open editing sessions and the
//! persistence sink. The caller guarantees a single in-flight edit session
//! per configuration; the workspace only keys sessions by config id.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};
use uuid::Uuid;

use admit_core::{AdmitError, AdmitResult, BuilderType};

use crate::save::{noop_sink, SaveSink};
use crate::store::{BuilderCommand, BuilderSession};
use crate::types::BuilderConfig;
use crate::validate::{is_save_ready, validate};

pub struct BuilderWorkspace {
    sessions: DashMap<Uuid, BuilderSession>,
    save_sink: Arc<dyn SaveSink>,
}

impl BuilderWorkspace {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            save_sink: noop_sink(),
        }
    }

    /// Attach a persistence sink for saved configurations.
    pub fn with_save_sink(mut self, sink: Arc<dyn SaveSink>) -> Self {
        self.save_sink = sink;
        self
    }

    /// Opens a session on a fresh config. Returns the config id, which
    /// also keys the session.
    pub fn open_session(&self, builder_type: BuilderType) -> Uuid {
        let session = BuilderSession::new(builder_type);
        let id = session.config().id;
        info!(config_id = %id, %builder_type, "Opened builder session");
        self.sessions.insert(id, session);
        id
    }

    /// Opens a session on an existing configuration (load/import path).
    pub fn open_config(&self, config: BuilderConfig) -> Uuid {
        let id = config.id;
        info!(config_id = %id, name = %config.name, "Opened builder session on existing config");
        self.sessions.insert(id, BuilderSession::from_config(config));
        id
    }

    /// Dispatches a command to the session with the given id. Unknown
    /// session ids are warned no-ops, like any other malformed command.
    pub fn apply(&self, session_id: &Uuid, command: BuilderCommand) {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => session.apply(command),
            None => warn!(config_id = %session_id, "Ignoring command for unknown session"),
        }
    }

    /// Returns a clone of the session's current configuration.
    pub fn config(&self, session_id: &Uuid) -> Option<BuilderConfig> {
        self.sessions.get(session_id).map(|s| s.config().clone())
    }

    pub fn list_sessions(&self) -> Vec<Uuid> {
        self.sessions.iter().map(|s| *s.key()).collect()
    }

    pub fn close_session(&self, session_id: &Uuid) -> Option<BuilderConfig> {
        info!(config_id = %session_id, "Closing builder session");
        self.sessions
            .remove(session_id)
            .map(|(_, s)| s.config().clone())
    }

    /// Validates the session's config and hands it to the save sink.
    /// Blocking validation issues fail the save without touching the sink.
    pub fn save_session(&self, session_id: &Uuid) -> AdmitResult<()> {
        let config = self
            .config(session_id)
            .ok_or_else(|| AdmitError::Persistence(format!("Unknown session {session_id}")))?;

        let issues = validate(&config);
        if !is_save_ready(&issues) {
            let blocking: Vec<_> = issues.iter().map(|i| i.message.as_str()).collect();
            return Err(AdmitError::Validation(blocking.join("; ")));
        }

        info!(config_id = %config.id, name = %config.name, "Saving builder config");
        self.save_sink.save(&config)
    }
}

impl Default for BuilderWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
