use std::path::PathBuf;

use clap::Args;
use dhobi::ledger::Ledger;

use crate::cli::{bookings::data_store, confirm};

#[derive(Debug, Args)]
pub(crate) struct DeleteArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// Id of the booking to delete
    id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

pub(crate) fn run(args: DeleteArgs) -> Result<(), String> {
    if !args.yes && !confirm(&format!("Delete booking {} ?", args.id))? {
        println!("aborted");
        return Ok(());
    }

    let mut ledger = Ledger::new(data_store(&args.data_dir));

    let removed = ledger
        .remove(&args.id)
        .map_err(|error| error.to_string())?;

    if removed {
        println!("deleted booking {}", args.id);
    } else {
        println!("no booking with id {:?}", args.id);
    }

    Ok(())
}
