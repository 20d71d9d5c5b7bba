//! Application layer containing the scan-to-attendance workflow.
//!
//! This module defines the `ScanWorkflow`, which sequences one scan at a
//! time from intake through the backend round trip and back to the armed
//! state, surfacing operator feedback at each step.

pub mod workflow;
