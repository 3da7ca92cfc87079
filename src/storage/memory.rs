use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::MonthlyLog;

use super::MonthlyLogStore;

/// Keeps the log in process memory. Used by tests and ephemeral servers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    log: RwLock<MonthlyLog>,
}

impl InMemoryStore {
    /// Creates a store holding `log`.
    pub fn new(log: MonthlyLog) -> Self {
        Self {
            log: RwLock::new(log),
        }
    }
}

impl MonthlyLogStore for InMemoryStore {
    fn load(&self) -> EngineResult<MonthlyLog> {
        self.log.read().map(|log| *log).map_err(|_| poisoned())
    }

    fn save(&self, log: &MonthlyLog) -> EngineResult<()> {
        let mut guard = self.log.write().map_err(|_| poisoned())?;
        *guard = *log;
        Ok(())
    }
}

fn poisoned() -> EngineError {
    EngineError::Storage {
        message: "in-memory log lock poisoned".to_string(),
    }
}
