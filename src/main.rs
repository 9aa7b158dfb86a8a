//! Command-line entry point for the clinic desk.

use clinicdesk::{Clinic, ClinicCli, ClinicConfig};
use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the menu.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ClinicConfig::from_env();
    info!(?config, "starting clinic desk");

    let clinic = Clinic::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut cli = ClinicCli::new(clinic, stdin.lock(), stdout.lock());
    cli.run()?;

    info!("clinic desk closed");
    Ok(())
}
