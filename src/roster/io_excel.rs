// Primitives for reading the roster spreadsheet.

use calamine::{open_workbook_auto, DataType, Range, Reader};
use std::collections::HashSet;

use crate::roster::*;

/// Reads all the rows below the header, with the cells keyed by the (normalized) header labels.
///
/// The line numbers start at 1 at the top of the sheet, even if the first lines are empty.
pub fn read_roster_rows(
    path: &str,
    worksheet_name: Option<&str>,
    header_row: usize,
) -> RosterIoResult<Vec<RawRow>> {
    let wrange = get_range(path, worksheet_name)?;
    let first_line = wrange
        .start()
        .map(|(row, _)| row as usize + 1)
        .unwrap_or(1);
    debug!(
        "read_roster_rows: path: {:?} first line: {} header line: {}",
        path, first_line, header_row
    );

    let mut lines = wrange
        .rows()
        .enumerate()
        .map(|(idx, row)| (first_line + idx, row))
        .skip_while(|(lineno, _)| *lineno < header_row);

    let (_, header) = lines
        .next()
        .filter(|(lineno, _)| *lineno == header_row)
        .context(MissingHeaderRowSnafu {
            path,
            row: header_row,
        })?;
    let labels = header_labels(header);
    debug!("read_roster_rows: header: {:?}", labels);
    let present: Vec<String> = labels.iter().flatten().cloned().collect();
    validate_header(&present)?;

    let mut res: Vec<RawRow> = Vec::new();
    for (lineno, row) in lines {
        let mut raw = RawRow::new(lineno);
        for (cell, label) in row.iter().zip(labels.iter()) {
            if let Some(label) = label {
                raw.insert(label, cell_text(cell, lineno)?);
            }
        }
        res.push(raw);
    }
    Ok(res)
}

// The label of each column. Only the required columns are read: the other columns,
// and the repetitions of a required label, map to None.
fn header_labels(header: &[DataType]) -> Vec<Option<String>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut labels: Vec<Option<String>> = Vec::new();
    for cell in header {
        let label = match cell {
            DataType::String(s) => normalize_label(s),
            _ => String::new(),
        };
        if !REQUIRED_COLUMNS.contains(&label.as_str()) {
            if !label.is_empty() {
                debug!("read_roster_rows: column {:?} is not read", label);
            }
            labels.push(None);
        } else if !seen.insert(label.clone()) {
            warn!(
                "read_roster_rows: column {:?} appears twice, only the first one is read",
                label
            );
            labels.push(None);
        } else {
            labels.push(Some(label));
        }
    }
    labels
}

/// The text of a cell. Numbers are rendered without a trailing ".0" when they are integral.
pub fn cell_text(cell: &DataType, lineno: usize) -> RosterIoResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(float_text(*f)),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::Empty => Ok(String::new()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> RosterIoResult<Range<DataType>> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it. Otherwise, the first sheet holds the roster.
    if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(MissingWorksheetSnafu {
                path,
                name: "(first sheet)",
            })?
            .context(OpeningExcelSnafu { path })
    }
}
