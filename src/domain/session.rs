use crate::error::AttendanceError;
use std::fmt;
use std::str::FromStr;

/// Half-day session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Forenoon,
    Afternoon,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Forenoon => f.write_str("fn"),
            Session::Afternoon => f.write_str("an"),
        }
    }
}

impl FromStr for Session {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fn" => Ok(Session::Forenoon),
            "an" => Ok(Session::Afternoon),
            other => Err(AttendanceError::InvalidSession(other.to_string())),
        }
    }
}

/// Direction of passage at the venue gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    In,
    Out,
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::In => f.write_str("in"),
            Gate::Out => f.write_str("out"),
        }
    }
}

impl FromStr for Gate {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Gate::In),
            "out" => Ok(Gate::Out),
            other => Err(AttendanceError::InvalidSession(other.to_string())),
        }
    }
}

/// The backend column holding the "present" flag for one (day, session, gate)
/// combination.
///
/// The rendered form, `day{d}_{fn|an}_{in|out}`, doubles as the persisted
/// configuration value and as the column name sent to the backend, so the
/// two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionColumn {
    day: u8,
    session: Session,
    gate: Gate,
}

/// Event days run 1 through 5.
pub const MAX_DAY: u8 = 5;

impl SessionColumn {
    pub fn new(day: u8, session: Session, gate: Gate) -> Result<Self, AttendanceError> {
        if day == 0 || day > MAX_DAY {
            return Err(AttendanceError::InvalidSession(format!("day{day}")));
        }
        Ok(Self { day, session, gate })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }
}

impl fmt::Display for SessionColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day{}_{}_{}", self.day, self.session, self.gate)
    }
}

impl FromStr for SessionColumn {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AttendanceError::InvalidSession(s.to_string());

        let mut parts = s.split('_');
        let day_part = parts.next().ok_or_else(invalid)?;
        let session_part = parts.next().ok_or_else(invalid)?;
        let gate_part = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let day: u8 = day_part
            .strip_prefix("day")
            .and_then(|d| d.parse().ok())
            .ok_or_else(invalid)?;
        let session = session_part.parse().map_err(|_| invalid())?;
        let gate = gate_part.parse().map_err(|_| invalid())?;

        Self::new(day, session, gate).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_round_trip() {
        let column = SessionColumn::new(2, Session::Forenoon, Gate::In).unwrap();
        assert_eq!(column.to_string(), "day2_fn_in");

        let parsed: SessionColumn = "day2_fn_in".parse().unwrap();
        assert_eq!(parsed, column);
    }

    #[test]
    fn test_parse_all_sessions_and_gates() {
        let parsed: SessionColumn = "day5_an_out".parse().unwrap();
        assert_eq!(parsed.day(), 5);
        assert_eq!(parsed.session(), Session::Afternoon);
        assert_eq!(parsed.gate(), Gate::Out);
    }

    #[test]
    fn test_day_out_of_range() {
        assert!(SessionColumn::new(0, Session::Forenoon, Gate::In).is_err());
        assert!(SessionColumn::new(6, Session::Forenoon, Gate::In).is_err());
        assert!("day6_fn_in".parse::<SessionColumn>().is_err());
    }

    #[test]
    fn test_malformed_columns_rejected() {
        for input in ["", "day1", "day1_fn", "day1_xx_in", "day1_fn_sideways", "d1_fn_in", "day1_fn_in_extra"] {
            assert!(
                input.parse::<SessionColumn>().is_err(),
                "'{input}' should not parse"
            );
        }
    }
}
