use super::scan::ScanPayload;
use super::session::SessionColumn;
use crate::error::Result;
use async_trait::async_trait;

/// The remote attendance table: one row per registered identifier, one
/// boolean column per session.
///
/// Each call is assumed strongly consistent on its own; nothing coordinates
/// a lookup with a later update.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Selects the flag stored for `id` in `column`. `None` when no row
    /// matches the identifier.
    async fn attendance(&self, id: &str, column: &SessionColumn) -> Result<Option<bool>>;

    /// Sets the flag for `id` in `column` to true.
    async fn mark_present(&self, id: &str, column: &SessionColumn) -> Result<()>;
}

/// Local store holding the single active-session value.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn active_session(&self) -> Result<Option<SessionColumn>>;
    async fn set_active_session(&self, column: SessionColumn) -> Result<()>;
}

/// Operator-facing feedback channel: `toast` for transient notices, `alert`
/// for messages that demand attention.
pub trait Notifier: Send + Sync {
    fn toast(&self, message: &str);
    fn alert(&self, title: &str, body: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// Asks the operator whether a scanned payload should be marked present.
#[async_trait]
pub trait ConfirmGate: Send + Sync {
    async fn decide(&self, payload: &ScanPayload) -> Decision;
}

pub type AttendanceStoreBox = Box<dyn AttendanceStore>;
pub type ConfigStoreBox = Box<dyn ConfigStore>;
pub type NotifierBox = Box<dyn Notifier>;
