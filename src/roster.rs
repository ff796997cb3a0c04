use log::{debug, info, warn};

use member_roster::*;
use rand::Rng;
use snafu::prelude::*;

use std::collections::BTreeSet;

use serde_json::Map as JSMap;

mod io_excel;
mod io_json;
mod io_xlsx;

use crate::roster::io_json::MemberJson;

#[derive(Debug, Snafu)]
pub enum RosterIoError {
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Header row {row} not found in {path}"))]
    MissingHeaderRow { path: String, row: usize },
    #[snafu(display("Line {lineno}: unexpected cell content {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error reading file {path}"))]
    ReadingJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the members in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the members"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing spreadsheet {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(context(false), display("Invalid roster data"))]
    Roster { source: RosterError },
}

pub type RosterIoResult<T> = Result<T, RosterIoError>;

/// Text of a number read from a spreadsheet or a JSON file.
/// Integral values are written without decimals: 9876543210.0 -> "9876543210".
pub(crate) fn float_text(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Reads the roster spreadsheet and writes the members as JSON.
///
/// `header_row` is the line of the header in the sheet, starting at 1.
pub fn run_convert(
    input: &str,
    output: &str,
    worksheet: Option<&str>,
    header_row: usize,
) -> RosterIoResult<usize> {
    info!("run_convert: reading roster {:?}", input);
    let rows = io_excel::read_roster_rows(input, worksheet, header_row)?;
    debug!("run_convert: {} rows below the header", rows.len());
    let records = group_rows(&rows)?;
    info!(
        "run_convert: {} members found in {} rows",
        records.len(),
        rows.len()
    );

    let members: Vec<MemberJson> = records
        .into_iter()
        .map(|r| MemberJson::from_parts(r, JSMap::new()))
        .collect();
    io_json::write_members(output, &members)?;
    Ok(members.len())
}

/// Gives a unique OTP to all the members of a JSON file.
///
/// The fields that are not part of the member records are kept as they are.
pub fn run_assign_otp<R: Rng + ?Sized>(
    input: &str,
    output: &str,
    rng: &mut R,
) -> RosterIoResult<usize> {
    info!("run_assign_otp: reading members {:?}", input);
    let members = io_json::read_members(input)?;
    let (mut records, extras): (Vec<MemberRecord>, Vec<_>) =
        members.into_iter().map(MemberJson::into_parts).unzip();

    assign_otps(&mut records, rng)?;

    let members: Vec<MemberJson> = records
        .into_iter()
        .zip(extras)
        .map(|(r, extra)| MemberJson::from_parts(r, extra))
        .collect();
    io_json::write_members(output, &members)?;
    Ok(members.len())
}

/// Writes the members of a JSON file to a spreadsheet, with the columns of EXPORT_COLUMNS.
pub fn run_export(input: &str, output: &str) -> RosterIoResult<usize> {
    info!("run_export: reading members {:?}", input);
    let members = io_json::read_members(input)?;

    {
        let dropped: BTreeSet<&String> = members.iter().flat_map(|m| m.extra.keys()).collect();
        if !dropped.is_empty() {
            warn!("run_export: fields not exported: {:?}", dropped);
        }
    }

    let records: Vec<MemberRecord> = members
        .into_iter()
        .map(|m| m.into_parts().0)
        .collect();
    let table = project(&records, &EXPORT_COLUMNS);
    info!(
        "run_export: writing {} rows with columns {:?}",
        table.rows.len(),
        table.header
    );
    io_xlsx::write_table(&table, output)?;
    Ok(records.len())
}
