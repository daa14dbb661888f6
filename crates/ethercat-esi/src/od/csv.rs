// crates/ethercat-esi/src/od/csv.rs

//! CSV rendering of the object dictionary.

use super::record::{FieldRegistry, ObjectRecord};
use crate::error::EsiError;
use alloc::string::String;
use core::fmt::Write;

const LINE_TERMINATOR: &str = "\r\n";

/// Writes a header row from `fields` followed by one row per record.
/// Fields a record does not have are left empty.
pub fn write_csv<'a>(
    fields: &FieldRegistry,
    records: impl IntoIterator<Item = &'a ObjectRecord>,
) -> Result<String, EsiError> {
    let mut out = String::new();
    write_row(&mut out, fields.fields().iter().map(String::as_str))?;
    for record in records {
        write_row(
            &mut out,
            fields
                .fields()
                .iter()
                .map(|f| record.get(f).unwrap_or_default()),
        )?;
    }
    Ok(out)
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) -> Result<(), EsiError> {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_cell(out, cell)?;
    }
    out.push_str(LINE_TERMINATOR);
    Ok(())
}

/// Quotes a cell when it contains a delimiter, quote or line break,
/// doubling embedded quotes.
fn write_cell(out: &mut String, cell: &str) -> Result<(), EsiError> {
    if cell.contains([',', '"', '\r', '\n']) {
        write!(out, "\"{}\"", cell.replace('"', "\"\""))?;
    } else {
        out.push_str(cell);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_quoting_rules() {
        let mut out = String::new();
        write_cell(&mut out, "plain").unwrap();
        assert_eq!(out, "plain");

        out.clear();
        write_cell(&mut out, "a, b").unwrap();
        assert_eq!(out, "\"a, b\"");

        out.clear();
        write_cell(&mut out, "say \"hi\"").unwrap();
        assert_eq!(out, "\"say \"\"hi\"\"\"");

        out.clear();
        write_cell(&mut out, "two\nlines").unwrap();
        assert_eq!(out, "\"two\nlines\"");
    }

    #[test]
    fn test_rows_follow_registry_order() {
        let mut fields = FieldRegistry::new();
        fields.register("Extra");

        let mut record = ObjectRecord::default();
        record.set("Extra", "x");
        record.set("Index", "#x1000");
        record.set("Name", "Device type");

        let csv = write_csv(&fields, vec![&record]).unwrap();
        let mut lines = csv.split("\r\n");
        assert_eq!(
            lines.next().unwrap(),
            "Index,SubIdx,Name,Type,BitSize,BitOffs,DefaultValue,MinValue,MaxValue,Access,Comment,Extra"
        );
        assert_eq!(lines.next().unwrap(), "#x1000,,Device type,,,,,,,,,x");
        assert_eq!(lines.next().unwrap(), "");
        assert!(lines.next().is_none());
    }
}
