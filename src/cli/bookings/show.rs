use std::{io, path::PathBuf};

use clap::Args;
use dhobi::{ledger::Ledger, render::write_booking_detail};

use crate::cli::bookings::data_store;

#[derive(Debug, Args)]
pub(crate) struct ShowArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// Id of the booking to show
    id: String,
}

pub(crate) fn run(args: ShowArgs) -> Result<(), String> {
    let ledger = Ledger::new(data_store(&args.data_dir));
    let bookings = ledger.load();

    let booking = bookings
        .iter()
        .find(|booking| booking.id == args.id)
        .ok_or_else(|| format!("no booking with id {:?}", args.id))?;

    write_booking_detail(io::stdout().lock(), booking).map_err(|error| error.to_string())
}
