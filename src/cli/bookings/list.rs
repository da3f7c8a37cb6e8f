use std::{io, path::PathBuf};

use clap::Args;
use dhobi::{
    ledger::Ledger,
    render::{write_bookings_table, write_stats},
    viewer::{SortMode, compute_stats, filter, sort},
};

use crate::cli::bookings::data_store;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// Case-insensitive text filter over ids, customers and items
    #[arg(long, short)]
    query: Option<String>,

    /// Sort order for the table
    #[arg(long, value_enum, default_value_t = SortMode::Newest)]
    sort: SortMode,
}

pub(crate) fn run(args: ListArgs) -> Result<(), String> {
    let ledger = Ledger::new(data_store(&args.data_dir));
    let all = ledger.load();

    // The statistics always cover the full ledger; the filter only narrows
    // the table.
    let stats = compute_stats(&all);

    let mut bookings = filter(&all, args.query.as_deref().unwrap_or(""));

    sort(&mut bookings, args.sort);

    let stdout = io::stdout();

    write_stats(stdout.lock(), &stats).map_err(|error| error.to_string())?;

    if bookings.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }

    write_bookings_table(stdout.lock(), &bookings).map_err(|error| error.to_string())
}
