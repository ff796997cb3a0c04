/*!
Building blocks to process the membership roster of an association.

The roster is maintained as a spreadsheet in which a member spans several rows:
the first row carries the sequence number and the details of the member, and the
next rows only carry the extra lines of the address. This crate turns such rows into
[`MemberRecord`]s ([`builder`]), assigns a unique one-time password to each member ([`otp`])
and selects the columns to export back to a spreadsheet ([`projection`]).

```
use member_roster::*;

let rows = vec![
    RawRow::new(4).with_cell("SL NO", "1").with_cell("NAME OF THE MEMBER", "A").with_cell("ADDRESS", "Line1"),
    RawRow::new(5).with_cell("ADDRESS", "Line2"),
    RawRow::new(6).with_cell("SL NO", "2").with_cell("NAME OF THE MEMBER", "B").with_cell("ADDRESS", "Line3"),
];
let mut records = group_rows(&rows)?;
assert_eq!(records[0].address, "Line1, Line2");

assign_otps(&mut records, &mut rand::thread_rng())?;
let table = project(&records, &EXPORT_COLUMNS);
assert_eq!(table.rows.len(), 2);
# Ok::<(), RosterError>(())
```

No file is read or written here: the callers are in charge of the input and output formats.
*/

mod config;
pub mod builder;
pub mod otp;
pub mod projection;

pub use crate::builder::{group_rows, parse_sequence_number, validate_header};
pub use crate::config::*;
pub use crate::otp::{assign_otps, sample_otps, OTP_CAPACITY};
pub use crate::projection::{project, ExportColumn, Table, EXPORT_COLUMNS};
