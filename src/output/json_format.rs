//! JSON output formatting.

use serde::Serialize;
use std::io::{self, Write};

/// Write any serializable value as pretty JSON followed by a newline.
pub fn write_json<W, T>(out: &mut W, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScanRecord;

    #[test]
    fn test_write_json_list() {
        let records = vec![ScanRecord::new("u1").with_crop("Tomato")];
        let mut buf = Vec::new();
        write_json(&mut buf, &records).unwrap();

        let parsed: Vec<ScanRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records);
    }
}
