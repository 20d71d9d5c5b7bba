use crate::error::AttendanceError;
use std::fmt;

/// Text decoded from a QR code, cleaned of whitespace.
///
/// Decoders pass through whatever the code encodes, so cleaning strips every
/// whitespace character, interior runs included. A payload that is empty
/// after cleaning carries no identifier and is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPayload(String);

impl ScanPayload {
    pub fn clean(raw: &str) -> Result<Self, AttendanceError> {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() {
            Err(AttendanceError::EmptyPayload)
        } else {
            Ok(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ScanPayload {
    type Error = AttendanceError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        Self::clean(raw)
    }
}

impl fmt::Display for ScanPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
