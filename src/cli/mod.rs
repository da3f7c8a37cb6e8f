//! Command-line interface for the booking engine.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

mod book;
mod bookings;

#[derive(Debug, Parser)]
#[command(name = "dhobi", about = "Laundry booking CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a booking through the wizard.
    Book(book::BookArgs),

    /// Inspect and manage the booking ledger.
    Bookings(bookings::BookingsCommand),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Book(args) => book::run(args),
            Commands::Bookings(command) => bookings::run(command),
        }
    }
}

/// Prompt on stdout and read one line from stdin; `y` or `yes` confirms.
pub(crate) fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N] ");

    io::stdout()
        .flush()
        .map_err(|error| format!("failed to flush stdout: {error}"))?;

    let mut answer = String::new();

    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|error| format!("failed to read confirmation: {error}"))?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
