// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

// Normalized labels of the columns in the membership spreadsheet.
// The spelling follows the source sheet ("OCUPATION" is not a typo here).
pub const COL_SL_NO: &str = "SL NO";
pub const COL_NAME: &str = "NAME OF THE MEMBER";
pub const COL_ADDRESS: &str = "ADDRESS";
pub const COL_FAMILY_MEMBERS: &str = "FAMILY MEMBERS";
pub const COL_MOBILE_NO: &str = "MOBILE NO";
pub const COL_OCCUPATION: &str = "OCUPATION";
pub const COL_BLOOD_GROUP: &str = "BLOOD GROUP";
pub const COL_NATIVE_PLACE: &str = "NATIVE PLACE";
pub const COL_EMAIL: &str = "EMAIL";
pub const COL_CURRENT_STATUS: &str = "CURRENT STATUS";

/// The columns that must all be found in the header of the input sheet.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_SL_NO,
    COL_NAME,
    COL_ADDRESS,
    COL_FAMILY_MEMBERS,
    COL_MOBILE_NO,
    COL_OCCUPATION,
    COL_BLOOD_GROUP,
    COL_NATIVE_PLACE,
    COL_EMAIL,
    COL_CURRENT_STATUS,
];

/// Normalizes a column label: newlines become spaces, the label is trimmed and upper-cased.
///
/// ```
/// assert_eq!(member_roster::normalize_label(" Name of the\nmember "), "NAME OF THE MEMBER");
/// ```
pub fn normalize_label(label: &str) -> String {
    label.replace('\n', " ").trim().to_uppercase()
}

/// One row of the spreadsheet, already converted to text.
///
/// Lookups are done on normalized labels. A cell that is not present reads as
/// the empty string.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawRow {
    /// The line number in the spreadsheet (1-based), used for error reporting.
    pub lineno: usize,
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new(lineno: usize) -> RawRow {
        RawRow {
            lineno,
            cells: HashMap::new(),
        }
    }

    pub fn with_cell(mut self, label: &str, value: &str) -> RawRow {
        self.insert(label, value.to_string());
        self
    }

    pub fn insert(&mut self, label: &str, value: String) {
        self.cells.insert(normalize_label(label), value);
    }

    pub fn get(&self, label: &str) -> &str {
        self.cells
            .get(&normalize_label(label))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

// ******** Output data structures *********

/// A single member of the roster.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MemberRecord {
    pub sl_no: u32,
    pub name: String,
    /// All the address lines of the member, joined with ", ".
    pub address: String,
    pub family_members: String,
    pub mobile_no: String,
    pub occupation: String,
    pub blood_group: String,
    pub native_place: String,
    pub email: String,
    pub current_status: String,
    /// Only set after the OTP assignment.
    pub otp_password: Option<String>,
}

/// The fields of a member record, as they can be selected for export.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Field {
    SlNo,
    Name,
    Address,
    FamilyMembers,
    MobileNo,
    Occupation,
    BloodGroup,
    NativePlace,
    Email,
    CurrentStatus,
    OtpPassword,
}

impl Field {
    /// The key of the field in the JSON documents.
    pub fn key(&self) -> &'static str {
        match self {
            Field::SlNo => "sl_no",
            Field::Name => "name",
            Field::Address => "address",
            Field::FamilyMembers => "family_members",
            Field::MobileNo => "mobile_no",
            Field::Occupation => "occupation",
            Field::BloodGroup => "blood_group",
            Field::NativePlace => "native_place",
            Field::Email => "email",
            Field::CurrentStatus => "current_status",
            Field::OtpPassword => "otp_password",
        }
    }
}

/// The content of an exported cell.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Cell {
    Number(u32),
    Text(String),
    Empty,
}

impl MemberRecord {
    /// The value of a field, or None if this record does not carry it.
    pub fn field(&self, field: Field) -> Option<Cell> {
        let text = |s: &String| Some(Cell::Text(s.clone()));
        match field {
            Field::SlNo => Some(Cell::Number(self.sl_no)),
            Field::Name => text(&self.name),
            Field::Address => text(&self.address),
            Field::FamilyMembers => text(&self.family_members),
            Field::MobileNo => text(&self.mobile_no),
            Field::Occupation => text(&self.occupation),
            Field::BloodGroup => text(&self.blood_group),
            Field::NativePlace => text(&self.native_place),
            Field::Email => text(&self.email),
            Field::CurrentStatus => text(&self.current_status),
            Field::OtpPassword => self.otp_password.as_ref().and_then(text),
        }
    }
}

/// Errors that stop a conversion. None of them is recoverable: the run is aborted
/// and nothing is written.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterError {
    MissingColumn {
        column: String,
    },
    MalformedSequenceNumber {
        lineno: usize,
        content: String,
    },
    DuplicateSequenceNumber {
        lineno: usize,
        sl_no: u32,
    },
    /// An address line was found before the first member.
    OrphanContinuationRow {
        lineno: usize,
    },
    OtpCapacityExceeded {
        requested: usize,
        capacity: usize,
    },
}

impl Error for RosterError {}

impl Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::MissingColumn { column } => {
                write!(f, "required column {:?} not found in the header", column)
            }
            RosterError::MalformedSequenceNumber { lineno, content } => write!(
                f,
                "line {}: cannot read the sequence number {:?}",
                lineno, content
            ),
            RosterError::DuplicateSequenceNumber { lineno, sl_no } => write!(
                f,
                "line {}: sequence number {} was already used by another member",
                lineno, sl_no
            ),
            RosterError::OrphanContinuationRow { lineno } => write!(
                f,
                "line {}: address line found before the first member",
                lineno
            ),
            RosterError::OtpCapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "cannot generate {} unique OTPs, at most {} are available",
                requested, capacity
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_row_lookup_is_normalized() {
        let row = RawRow::new(4).with_cell("Mobile\nNo ", "98765");
        assert_eq!(row.get("MOBILE NO"), "98765");
        assert_eq!(row.get("mobile no"), "98765");
        assert_eq!(row.get(COL_EMAIL), "");
    }

    #[test]
    fn otp_field_absent_until_assigned() {
        let mut record = MemberRecord {
            sl_no: 7,
            ..Default::default()
        };
        assert_eq!(record.field(Field::OtpPassword), None);
        assert_eq!(record.field(Field::SlNo), Some(Cell::Number(7)));
        record.otp_password = Some("4821".to_string());
        assert_eq!(
            record.field(Field::OtpPassword),
            Some(Cell::Text("4821".to_string()))
        );
    }
}
