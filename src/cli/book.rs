use std::path::PathBuf;

use clap::Args;
use dhobi::{
    booking::Customer, catalog::ServiceCatalog, ledger::Ledger, notify::LogNotifier,
    wizard::BookingWizard,
};

use crate::cli::bookings::data_store;

#[derive(Debug, Args)]
pub(crate) struct BookArgs {
    /// Directory holding the persisted ledger
    #[arg(long, env = "DHOBI_DATA_DIR", default_value = ".dhobi")]
    data_dir: PathBuf,

    /// Optional YAML service catalog; the built-in one is used when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Service to book, as `service[:cloth[:qty]]`; repeatable
    #[arg(long = "item", value_name = "ITEM", required = true)]
    items: Vec<String>,

    /// Customer name
    #[arg(long)]
    name: String,

    /// Customer email
    #[arg(long)]
    email: String,

    /// Customer phone number
    #[arg(long)]
    phone: String,

    /// Pickup address
    #[arg(long)]
    address: String,

    /// Preferred pickup date
    #[arg(long, default_value = "")]
    date: String,

    /// Preferred pickup time
    #[arg(long, default_value = "")]
    time: String,

    /// Note for the pickup crew
    #[arg(long, default_value = "")]
    note: String,
}

pub(crate) fn run(args: BookArgs) -> Result<(), String> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut ledger = Ledger::new(data_store(&args.data_dir));
    let mut wizard = BookingWizard::new();

    for raw in &args.items {
        let (service, cloth, qty) = parse_item(raw)?;

        wizard
            .add_selection(&catalog, service, cloth, qty)
            .map_err(|error| error.to_string())?;
    }

    wizard.advance().map_err(|error| error.to_string())?;

    println!("Cart:");

    for line in wizard.cart().lines() {
        println!(
            "  {} - {} × {} = {}",
            line.service_name, line.cloth, line.qty, line.line_total
        );
    }

    println!("Subtotal: {}", wizard.cart().subtotal());
    println!("Total:    {}", wizard.cart().total());

    wizard.advance().map_err(|error| error.to_string())?;

    let customer = Customer {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        pickup_date: args.date,
        pickup_time: args.time,
        note: args.note,
    };

    let booking = wizard
        .submit(customer, &mut ledger, &LogNotifier)
        .map_err(|error| error.to_string())?;

    if let Some(confirmation) = wizard.confirmation() {
        println!("{confirmation}");
    }

    println!("booking_id: {}", booking.id);
    println!("created_at: {}", booking.created_at_iso());
    println!("total: {}", booking.total);

    Ok(())
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<ServiceCatalog, String> {
    match path {
        Some(path) => ServiceCatalog::from_path(path)
            .map_err(|error| format!("failed to load the catalog: {error}")),
        None => Ok(ServiceCatalog::standard()),
    }
}

/// Parse one `service[:cloth[:qty]]` argument.
fn parse_item(raw: &str) -> Result<(&str, Option<&str>, i64), String> {
    let mut parts = raw.splitn(3, ':');

    let service = parts
        .next()
        .filter(|part| !part.is_empty())
        .ok_or_else(|| format!("invalid item {raw:?}: missing service id"))?;

    let cloth = parts.next();

    let qty = match parts.next() {
        Some(qty) => qty
            .parse()
            .map_err(|_error| format!("invalid item {raw:?}: quantity is not a number"))?,
        None => 1,
    };

    Ok((service, cloth, qty))
}
