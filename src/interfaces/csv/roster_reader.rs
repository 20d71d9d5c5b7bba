use crate::domain::session::SessionColumn;
use crate::error::{AttendanceError, Result};
use std::io::Read;

/// One roster line: an identifier plus its per-session flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub id: String,
    pub flags: Vec<(SessionColumn, bool)>,
}

/// Reads registration rosters from a CSV source.
///
/// The header row names the identifier column first, then one session
/// column per remaining header (`id,day1_fn_in,day1_fn_out,…`). Flag cells
/// accept `true`/`false`/`1`/`0`; anything else, including an empty cell,
/// reads as false. Wraps `csv::Reader` with whitespace trimming and
/// flexible record lengths, and yields rows lazily so large rosters stream.
pub struct RosterReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RosterReader<R> {
    /// Creates a new `RosterReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Parses the header and returns an iterator over `Result<RosterRow>`.
    ///
    /// Fails up front when a header names a column that is not a valid
    /// session column.
    pub fn rows(mut self) -> Result<impl Iterator<Item = Result<RosterRow>>> {
        let headers = self.reader.headers()?.clone();
        let columns: Vec<SessionColumn> = headers
            .iter()
            .skip(1)
            .map(str::parse)
            .collect::<Result<_>>()?;

        Ok(self.reader.into_records().map(move |record| {
            let record = record?;
            let id = record.get(0).unwrap_or("").to_string();
            if id.is_empty() {
                return Err(AttendanceError::InvalidRoster(
                    "missing identifier cell".to_string(),
                ));
            }
            let flags = columns
                .iter()
                .enumerate()
                .map(|(i, column)| (*column, parse_flag(record.get(i + 1).unwrap_or(""))))
                .collect();
            Ok(RosterRow { id, flags })
        }))
    }
}

fn parse_flag(cell: &str) -> bool {
    matches!(cell, "1" | "true" | "TRUE" | "True")
}
