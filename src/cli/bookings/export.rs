use std::{fs, path::PathBuf};

use clap::Args;
use dhobi::{
    export::{EXPORT_FILE_NAME, export_csv},
    ledger::Ledger,
};

use crate::cli::bookings::data_store;

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// File to write; defaults to `bookings_export.csv` in the working
    /// directory. Pass `-` to print to stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub(crate) fn run(args: ExportArgs) -> Result<(), String> {
    let ledger = Ledger::new(data_store(&args.data_dir));

    let csv = export_csv(&ledger.load()).map_err(|error| error.to_string())?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));

    if output.as_os_str() == "-" {
        println!("{csv}");
        return Ok(());
    }

    fs::write(&output, csv).map_err(|error| format!("failed to write {output:?}: {error}"))?;

    println!("exported to {}", output.display());

    Ok(())
}
