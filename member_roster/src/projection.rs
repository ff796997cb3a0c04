use log::debug;

pub use crate::config::*;

/// A field of the member records, with the label it gets in the exported sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ExportColumn {
    pub field: Field,
    pub label: &'static str,
}

const fn column(field: Field, label: &'static str) -> ExportColumn {
    ExportColumn { field, label }
}

/// The columns of the exported sheet, in order.
pub const EXPORT_COLUMNS: [ExportColumn; 11] = [
    column(Field::SlNo, "SL NO"),
    column(Field::Name, "NAME"),
    column(Field::Address, "ADDRESS"),
    column(Field::FamilyMembers, "FAMILY MEMBERS"),
    column(Field::MobileNo, "MOBILE NO"),
    column(Field::Occupation, "OCCUPATION"),
    column(Field::BloodGroup, "BLOOD GROUP"),
    column(Field::NativePlace, "NATIVE PLACE"),
    column(Field::Email, "EMAIL"),
    column(Field::CurrentStatus, "CURRENT STATUS"),
    column(Field::OtpPassword, "OTP PASSWORD"),
];

/// A rectangular table: every row has as many cells as the header.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Selects and renames the fields of the records.
///
/// A column is kept if at least one record carries this field. The columns
/// stay in the order in which they are declared. A record that does not
/// carry a kept field gets an empty cell.
///
/// ```
/// use member_roster::projection::{project, EXPORT_COLUMNS};
/// use member_roster::MemberRecord;
///
/// let records = vec![MemberRecord { sl_no: 1, ..Default::default() }];
/// let table = project(&records, &EXPORT_COLUMNS);
/// // No OTP was assigned yet.
/// assert_eq!(table.header.len(), 10);
/// assert_eq!(table.header[0], "SL NO");
/// ```
pub fn project(records: &[MemberRecord], columns: &[ExportColumn]) -> Table {
    let kept: Vec<&ExportColumn> = columns
        .iter()
        .filter(|c| records.iter().any(|r| r.field(c.field).is_some()))
        .collect();
    debug!(
        "project: kept columns: {:?}",
        kept.iter().map(|c| c.label).collect::<Vec<_>>()
    );

    let header: Vec<String> = kept.iter().map(|c| c.label.to_string()).collect();
    let rows: Vec<Vec<Cell>> = records
        .iter()
        .map(|r| {
            kept.iter()
                .map(|c| r.field(c.field).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect();
    Table { header, rows }
}
