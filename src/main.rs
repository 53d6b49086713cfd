//! pagesim binary: runs the fixed 1000-trial experiment and prints the
//! average fault count per working-set size and policy.

use tracing::info;

use pagesim::{Simulation, SimulationConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagesim=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("pagesim v{}", env!("CARGO_PKG_VERSION"));

    let mut simulation = Simulation::new(SimulationConfig::default())?;
    let table = simulation.run();

    println!("{table}");
    Ok(())
}
