mod args;
mod roster;

use clap::Parser;
use log::{debug, LevelFilter};
use std::error::Error;

use crate::args::{Args, Command};
use crate::roster::RosterIoResult;

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

// Runs the job and returns the line to show to the operator.
fn run(command: &Command) -> RosterIoResult<String> {
    match command {
        Command::Convert {
            input,
            output,
            header_row,
            worksheet,
        } => {
            roster::run_convert(input, output, worksheet.as_deref(), *header_row)?;
            Ok(format!("JSON created: {}", output))
        }
        Command::AssignOtp { input, output } => {
            roster::run_assign_otp(input, output, &mut rand::thread_rng())?;
            Ok(format!("OTPs added successfully → {}", output))
        }
        Command::Export { input, output } => {
            roster::run_export(input, output)?;
            Ok(format!("Excel file created successfully → {}", output))
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("args: {:?}", args);

    match run(&args.command) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            eprintln!("An error occured: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
