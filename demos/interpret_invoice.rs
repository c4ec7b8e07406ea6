use std::path::PathBuf;

use peppol_interpreter::loader::{LocalFile, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> peppol_interpreter::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "peppol_interpreter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Usage: cargo run --example interpret_invoice [path/to/invoice.xml]
    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/peppol_bis_invoice.xml")
    });

    let mut session = Session::new();
    session.load(LocalFile::open(&path).await?).await?;
    let view = session.interpret()?;

    println!("=== Invoice {} ===\n", view.header.id);
    println!("  Issue date:      {}", view.header.issue_date);
    println!("  Due date:        {}", view.header.due_date);
    println!("  Currency:        {}", view.header.currency);
    println!("  Buyer reference: {}", view.header.buyer_reference);

    println!("\n=== Parties ===\n");
    for (role, party) in [("Supplier", &view.supplier), ("Customer", &view.customer)] {
        println!("  {role}: {} (VAT {})", party.name, party.vat_id);
        println!("    E-mail: {}", party.email);
    }

    println!("\n=== Lines ===\n");
    if view.lines.is_empty() {
        println!("  No invoice lines.");
    }
    for line in &view.lines {
        println!(
            "  {:>3}  {:<30} {:>8} x {:>10} = {:>10}",
            line.id.display(),
            line.name.display(),
            line.quantity.display(),
            line.unit_price.display(),
            line.line_total.display(),
        );
    }

    println!("\n=== Totals ===\n");
    println!("  Subtotal: {}", view.totals.tax_exclusive);
    println!("  Tax:      {}", view.totals.tax_amount);
    println!("  Total:    {}", view.totals.tax_inclusive);
    println!("  Payable:  {}", view.totals.payable);

    println!("\n=== Embedded PDF ===\n");
    match session.pdf() {
        Some(handle) => println!("  {} ({} bytes) at {}", handle.filename(), handle.len(), handle.url()),
        None => println!("  No embedded PDF."),
    }

    session.reset();
    Ok(())
}
