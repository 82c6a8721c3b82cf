//! Application state for the Gratuity Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClosedEvent, ClosedEventFilter};

/// Shared application state.
///
/// Holds the loaded restaurant configuration and the closed events recorded
/// since startup. Events are append-only.
#[derive(Clone)]
pub struct AppState {
    /// The loaded restaurant configuration.
    config: Arc<ConfigLoader>,
    /// Closed events in the order they were recorded.
    events: Arc<RwLock<Vec<ClosedEvent>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Records a closed event.
    ///
    /// A closed event is created exactly once: recording a second event with
    /// the same report id fails with [`EngineError::DuplicateEvent`].
    pub async fn record(&self, event: ClosedEvent) -> EngineResult<()> {
        let mut events = self.events.write().await;
        if events.iter().any(|stored| stored.report_id == event.report_id) {
            return Err(EngineError::DuplicateEvent {
                report_id: event.report_id,
            });
        }
        events.push(event);
        Ok(())
    }

    /// Returns the recorded events matching `filter`.
    pub async fn events(&self, filter: &ClosedEventFilter) -> Vec<ClosedEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect()
    }

    /// Looks up a recorded event by report id.
    pub async fn find(&self, report_id: &str) -> EngineResult<ClosedEvent> {
        self.events
            .read()
            .await
            .iter()
            .find(|event| event.report_id == report_id)
            .cloned()
            .ok_or_else(|| EngineError::EventNotFound {
                report_id: report_id.to_string(),
            })
    }
}
