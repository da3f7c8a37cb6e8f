use std::path::Path;

use clap::{Args, Subcommand};
use dhobi::store::FileStore;

mod clear;
mod delete;
mod export;
mod list;
mod show;

#[derive(Debug, Args)]
pub(crate) struct BookingsCommand {
    #[command(subcommand)]
    command: BookingsSubcommand,
}

#[derive(Debug, Subcommand)]
enum BookingsSubcommand {
    /// Show the statistics strip and the booking table.
    List(list::ListArgs),

    /// Show one booking in full.
    Show(show::ShowArgs),

    /// Export the ledger as CSV.
    Export(export::ExportArgs),

    /// Delete one booking.
    Delete(delete::DeleteArgs),

    /// Delete the entire ledger.
    Clear(clear::ClearArgs),
}

pub(crate) fn run(command: BookingsCommand) -> Result<(), String> {
    match command.command {
        BookingsSubcommand::List(args) => list::run(args),
        BookingsSubcommand::Show(args) => show::run(args),
        BookingsSubcommand::Export(args) => export::run(args),
        BookingsSubcommand::Delete(args) => delete::run(args),
        BookingsSubcommand::Clear(args) => clear::run(args),
    }
}

/// The file-backed store every command reads and writes.
pub(crate) fn data_store(dir: &Path) -> FileStore {
    FileStore::new(dir)
}
