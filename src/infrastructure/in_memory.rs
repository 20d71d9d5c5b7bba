use crate::domain::ports::{AttendanceStore, ConfigStore};
use crate::domain::session::SessionColumn;
use crate::error::{AttendanceError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory attendance table.
///
/// Rows are keyed by identifier; each row maps session-column names to
/// flags. `Clone` shares the underlying `Arc`, so clones observe each
/// other's writes, which is what the concurrent-scan tests rely on. Used
/// for tests and roster-seeded dry runs.
#[derive(Default, Clone)]
pub struct InMemoryAttendanceStore {
    rows: Arc<RwLock<HashMap<String, HashMap<String, bool>>>>,
}

impl InMemoryAttendanceStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the flag for one identifier and column,
    /// creating the row if needed.
    pub async fn insert(&self, id: impl Into<String>, column: &SessionColumn, present: bool) {
        let mut rows = self.rows.write().await;
        rows.entry(id.into())
            .or_default()
            .insert(column.to_string(), present);
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn attendance(&self, id: &str, column: &SessionColumn) -> Result<Option<bool>> {
        let rows = self.rows.read().await;
        // A registered row without the column reads as not yet present
        Ok(rows
            .get(id)
            .map(|row| row.get(&column.to_string()).copied().unwrap_or(false)))
    }

    async fn mark_present(&self, id: &str, column: &SessionColumn) -> Result<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| AttendanceError::UnknownId(id.to_string()))?;
        row.insert(column.to_string(), true);
        Ok(())
    }
}

/// In-memory configuration store holding the active session.
#[derive(Default, Clone)]
pub struct InMemoryConfigStore {
    active: Arc<RwLock<Option<SessionColumn>>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn active_session(&self) -> Result<Option<SessionColumn>> {
        Ok(*self.active.read().await)
    }

    async fn set_active_session(&self, column: SessionColumn) -> Result<()> {
        *self.active.write().await = Some(column);
        Ok(())
    }
}
