use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// Writes a single-session roster keyed on `day1_fn_in`.
pub fn write_roster(path: &Path, rows: &[(&str, bool)]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    writeln!(file, "id,day1_fn_in")?;
    for (id, present) in rows {
        writeln!(file, "{},{}", id, present)?;
    }
    Ok(())
}

/// Writes scan payloads, one per line.
pub fn write_scans(path: &Path, lines: &[&str]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
