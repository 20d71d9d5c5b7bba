use crate::domain::ports::{
    AttendanceStoreBox, ConfigStoreBox, ConfirmGate, Decision, NotifierBox,
};
use crate::domain::scan::ScanPayload;
use crate::error::{AttendanceError, Result};
use std::time::Duration;
use tracing::debug;

/// Pause before scanning re-arms after a rejected payload.
pub const REARM_DELAY: Duration = Duration::from_secs(3);

/// What became of one raw payload fed into [`ScanWorkflow::intake`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intake {
    /// A prior scan is still in flight; the payload was dropped silently.
    Suppressed,
    /// The payload was empty after cleaning; scanning re-armed after the
    /// fixed delay.
    Rejected,
    /// The payload is valid and awaits a confirm/cancel decision. Scanning
    /// stays suspended until the payload is resolved.
    Pending(ScanPayload),
}

/// Terminal outcome of one scan cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Suppressed,
    Rejected,
    Cancelled,
    MarkedPresent,
    AlreadyPresent,
    Failed(String),
}

/// The scan-to-attendance workflow.
///
/// A linear protocol with no cycles: armed, scanned, confirmed or
/// cancelled, then checked and possibly updated, then re-armed. The backend
/// call is the only suspension point and is awaited sequentially; re-entrant
/// scans are kept out by the armed flag alone, not by backend locking.
pub struct ScanWorkflow {
    store: AttendanceStoreBox,
    config: ConfigStoreBox,
    notifier: NotifierBox,
    rearm_delay: Duration,
    armed: bool,
}

impl ScanWorkflow {
    pub fn new(store: AttendanceStoreBox, config: ConfigStoreBox, notifier: NotifierBox) -> Self {
        Self {
            store,
            config,
            notifier,
            rearm_delay: REARM_DELAY,
            armed: true,
        }
    }

    pub fn with_rearm_delay(mut self, delay: Duration) -> Self {
        self.rearm_delay = delay;
        self
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Accepts one raw payload.
    ///
    /// Rapid repeat scans are deduplicated: while a payload is pending or a
    /// backend call is in flight the workflow is disarmed and anything fed
    /// in is suppressed without feedback. An empty payload is reported and
    /// scanning re-arms after [`REARM_DELAY`]; a valid one suspends scanning
    /// and is handed back for a confirm/cancel decision. No backend action
    /// happens here.
    pub async fn intake(&mut self, raw: &str) -> Intake {
        if !self.armed {
            return Intake::Suppressed;
        }

        match ScanPayload::clean(raw) {
            Ok(payload) => {
                debug!(payload = %payload, "scan accepted, awaiting decision");
                self.armed = false;
                Intake::Pending(payload)
            }
            Err(_) => {
                self.notifier.toast("Invalid QR code");
                self.notifier.alert("Invalid QR Code", "Please scan a valid QR code.");
                tokio::time::sleep(self.rearm_delay).await;
                self.notifier.toast("Ready to scan again");
                Intake::Rejected
            }
        }
    }

    /// Resolves a pending payload with the operator's decision.
    ///
    /// Every failure past this point is caught here and surfaced through
    /// the notifier; nothing is retried. The workflow re-arms no matter how
    /// the backend round trip went.
    pub async fn resolve(&mut self, payload: &ScanPayload, decision: Decision) -> ScanOutcome {
        let outcome = match decision {
            Decision::Cancel => {
                self.notifier.toast("Attendance not given");
                self.notifier.alert("Attendance Not Given", "Scan again when ready.");
                ScanOutcome::Cancelled
            }
            Decision::Confirm => match self.mark(payload).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.notifier.alert("Error", &e.to_string());
                    self.notifier.toast(&format!("Error: {e}"));
                    ScanOutcome::Failed(e.to_string())
                }
            },
        };

        self.armed = true;
        outcome
    }

    /// Drives one full scan cycle: intake, operator decision, resolution.
    pub async fn process_scan(&mut self, raw: &str, gate: &dyn ConfirmGate) -> ScanOutcome {
        match self.intake(raw).await {
            Intake::Suppressed => ScanOutcome::Suppressed,
            Intake::Rejected => ScanOutcome::Rejected,
            Intake::Pending(payload) => {
                let decision = gate.decide(&payload).await;
                self.resolve(&payload, decision).await
            }
        }
    }

    // Sequential read-then-write, not transactional: an update failing after
    // a successful read is reported, never compensated.
    async fn mark(&self, payload: &ScanPayload) -> Result<ScanOutcome> {
        // The active session is re-read on every attempt, never cached.
        let column = self
            .config
            .active_session()
            .await?
            .ok_or(AttendanceError::MissingSession)?;
        let id = payload.as_str();

        debug!(%id, %column, "looking up attendance flag");
        let present = self
            .store
            .attendance(id, &column)
            .await?
            .ok_or_else(|| AttendanceError::UnknownId(id.to_string()))?;

        if present {
            self.notifier.toast("Already Marked Present!");
            self.notifier
                .alert("Already Present", "This team has already been marked present.");
            return Ok(ScanOutcome::AlreadyPresent);
        }

        self.store.mark_present(id, &column).await?;
        debug!(%id, %column, "attendance flag set");
        self.notifier.toast("Attendance marked successfully!");
        Ok(ScanOutcome::MarkedPresent)
    }
}
