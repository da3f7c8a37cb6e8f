use std::path::PathBuf;

use clap::Args;
use dhobi::ledger::Ledger;

use crate::cli::{bookings::data_store, confirm};

#[derive(Debug, Args)]
pub(crate) struct ClearArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

pub(crate) fn run(args: ClearArgs) -> Result<(), String> {
    if !args.yes && !confirm("Clear ALL bookings? Cannot be undone.")? {
        println!("aborted");
        return Ok(());
    }

    let mut ledger = Ledger::new(data_store(&args.data_dir));

    ledger.clear().map_err(|error| error.to_string())?;

    println!("cleared the booking ledger");

    Ok(())
}
