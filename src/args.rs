use clap::{Parser, Subcommand};

/// Converts the membership roster between the spreadsheet and JSON formats and assigns
/// the one-time passwords of the members.
///
/// The jobs are meant to be run in order: convert, assign-otp, export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, global = true, takes_value = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reads the roster spreadsheet and writes one JSON record per member.
    Convert {
        /// (file path) The roster spreadsheet (xls, xlsx, xlsb or ods).
        #[clap(
            short,
            long,
            value_parser,
            default_value = "VASAI EAST KERALA SAMAJAM MEMBERSHIP.xls"
        )]
        input: String,
        /// (file path) The JSON file to create.
        #[clap(short, long, value_parser, default_value = "members.json")]
        output: String,
        /// (default 3) The line of the header in the sheet, starting at 1. The lines above are titles.
        #[clap(long, value_parser, default_value_t = 3)]
        header_row: usize,
        /// (default: the first sheet) The name of the worksheet holding the roster.
        #[clap(long, value_parser)]
        worksheet: Option<String>,
    },
    /// Gives a unique 4-digit one-time password to every member.
    AssignOtp {
        /// (file path) The JSON file created by the convert step.
        #[clap(short, long, value_parser, default_value = "members.json")]
        input: String,
        /// (file path) The JSON file to create.
        #[clap(short, long, value_parser, default_value = "members_with_otp.json")]
        output: String,
    },
    /// Writes the members of a JSON file to a spreadsheet.
    Export {
        /// (file path) The JSON file with the members.
        #[clap(short, long, value_parser, default_value = "members_with_otp.json")]
        input: String,
        /// (file path) The spreadsheet to create (xlsx).
        #[clap(short, long, value_parser, default_value = "members_with_otp.xlsx")]
        output: String,
    },
}
