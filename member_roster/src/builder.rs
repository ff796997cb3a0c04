use log::debug;
use std::collections::HashSet;

pub use crate::config::*;

const ADDRESS_SEPARATOR: &str = ", ";

// The state of the row scan.
#[derive(Eq, PartialEq, Debug, Clone)]
enum State {
    Idle,
    Accumulating {
        record: MemberRecord,
        address_lines: Vec<String>,
    },
}

/// A builder that assembles member records from the rows of the roster, one row at a time.
///
/// A row with a sequence number opens a new member. The address cells of that row
/// and of all the following rows without a sequence number are the address lines
/// of this member.
///
/// ```
/// use member_roster::builder::RosterBuilder;
/// use member_roster::RawRow;
/// # use member_roster::RosterError;
///
/// let mut builder = RosterBuilder::new();
/// builder.add_row(&RawRow::new(4).with_cell("SL NO", "1").with_cell("ADDRESS", "Flat 2"))?;
/// builder.add_row(&RawRow::new(5).with_cell("ADDRESS", "Vasai East"))?;
/// let records = builder.finish();
///
/// assert_eq!(records[0].address, "Flat 2, Vasai East");
/// # Ok::<(), RosterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RosterBuilder {
    state: State,
    records: Vec<MemberRecord>,
    seen: HashSet<u32>,
}

impl Default for RosterBuilder {
    fn default() -> Self {
        RosterBuilder::new()
    }
}

impl RosterBuilder {
    pub fn new() -> RosterBuilder {
        RosterBuilder {
            state: State::Idle,
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn add_row(&mut self, row: &RawRow) -> Result<(), RosterError> {
        let sl_no_cell = row.get(COL_SL_NO).trim();
        if !sl_no_cell.is_empty() {
            let sl_no = parse_sequence_number(sl_no_cell).ok_or_else(|| {
                RosterError::MalformedSequenceNumber {
                    lineno: row.lineno,
                    content: sl_no_cell.to_string(),
                }
            })?;
            if !self.seen.insert(sl_no) {
                return Err(RosterError::DuplicateSequenceNumber {
                    lineno: row.lineno,
                    sl_no,
                });
            }
            self.flush();
            debug!("add_row: line {}: new member {}", row.lineno, sl_no);
            self.state = State::Accumulating {
                record: record_from_row(sl_no, row),
                address_lines: Vec::new(),
            };
        }

        // Only the address is read from the continuation rows.
        let address = row.get(COL_ADDRESS).trim();
        if !address.is_empty() {
            match &mut self.state {
                State::Accumulating { address_lines, .. } => {
                    address_lines.push(address.to_string());
                }
                State::Idle => {
                    return Err(RosterError::OrphanContinuationRow { lineno: row.lineno });
                }
            }
        }
        Ok(())
    }

    /// Closes the last member and returns all the members, in the order of the rows.
    pub fn finish(mut self) -> Vec<MemberRecord> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if let State::Accumulating {
            mut record,
            address_lines,
        } = std::mem::replace(&mut self.state, State::Idle)
        {
            record.address = address_lines.join(ADDRESS_SEPARATOR);
            self.records.push(record);
        }
    }
}

fn record_from_row(sl_no: u32, row: &RawRow) -> MemberRecord {
    MemberRecord {
        sl_no,
        name: row.get(COL_NAME).trim().to_string(),
        address: String::new(),
        family_members: row.get(COL_FAMILY_MEMBERS).to_string(),
        mobile_no: row.get(COL_MOBILE_NO).to_string(),
        occupation: row.get(COL_OCCUPATION).to_string(),
        blood_group: row.get(COL_BLOOD_GROUP).to_string(),
        native_place: row.get(COL_NATIVE_PLACE).to_string(),
        email: row.get(COL_EMAIL).to_string(),
        current_status: row.get(COL_CURRENT_STATUS).to_string(),
        otp_password: None,
    }
}

/// Groups all the rows of a roster into member records.
pub fn group_rows(rows: &[RawRow]) -> Result<Vec<MemberRecord>, RosterError> {
    let mut builder = RosterBuilder::new();
    for row in rows {
        builder.add_row(row)?;
    }
    Ok(builder.finish())
}

/// Checks that every required column is present in the header.
pub fn validate_header(labels: &[String]) -> Result<(), RosterError> {
    let present: HashSet<String> = labels.iter().map(|l| normalize_label(l)).collect();
    for column in REQUIRED_COLUMNS {
        if !present.contains(column) {
            return Err(RosterError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Reads a sequence number.
///
/// The cell is trimmed and read as an integer. Spreadsheets often store these numbers as
/// decimals, so "3.0" is also accepted and truncated to 3. Numbers below 1 are rejected.
pub fn parse_sequence_number(cell: &str) -> Option<u32> {
    let s = cell.trim();
    if let Ok(x) = s.parse::<u32>() {
        return if x >= 1 { Some(x) } else { None };
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => {
            let t = f.trunc();
            if t >= 1.0 && t <= u32::MAX as f64 {
                Some(t as u32)
            } else {
                None
            }
        }
        _ => None,
    }
}
