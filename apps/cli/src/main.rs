#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod handlers;
pub mod models;

use crate::handlers::add;
use crate::models::args::Cli;

use clap::Parser;
use std::process::ExitCode;

// Exit codes are mapped by hand. Usage errors exit with 1 like every other failure
// (clap alone exits with 2), and handler errors print one `error: <msg>` line instead of
// the debug chain an `anyhow::Result` main would print.
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        },
    };

    match add::add_minigame(&cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}
