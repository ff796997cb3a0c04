use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::roster::*;

/// Writes the table to the first sheet of a new workbook, with the header in bold.
pub fn write_table(table: &Table, path: &str) -> RosterIoResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, table).context(WritingExcelSnafu { path })?;
    workbook.save(path).context(WritingExcelSnafu { path })?;
    info!("write_table: {} rows written to {:?}", table.rows.len(), path);
    Ok(())
}

fn write_sheet(ws: &mut Worksheet, table: &Table) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    for (col, label) in table.header.iter().enumerate() {
        ws.write_string_with_format(0, col as u16, label, &bold)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        // The header takes the first line.
        let lineno = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Number(x) => {
                    ws.write_number(lineno, col, *x)?;
                }
                Cell::Text(s) if !s.is_empty() => {
                    ws.write_string(lineno, col, s)?;
                }
                Cell::Text(_) | Cell::Empty => {}
            }
        }
    }
    Ok(())
}
