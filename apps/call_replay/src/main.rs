use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use call_layout::{load_settings, LayoutSettings};
use clap::{Parser, Subcommand};
use experience_upgrades::{
    ExperienceUpgradeFinder, PlatformCapabilities, PlatformCapability, UpgradeCatalog,
};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod scenario;

#[derive(Parser, Debug)]
#[command(about = "Replay group call scenarios through the layout reconciler")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario file and print every renderer callback as a JSON line.
    Replay {
        #[arg(long)]
        scenario: PathBuf,
        /// Layout settings file (defaults to ./call_layout.toml when present).
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        grid_max_items: Option<usize>,
    },
    /// List unseen experience upgrades, optionally marking them all as seen.
    Upgrades {
        #[arg(long, default_value = "sqlite://./data/upgrades.db")]
        database_url: String,
        #[arg(long)]
        system_call_integration: bool,
        #[arg(long)]
        mark_seen: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    match args.command {
        Command::Replay {
            scenario,
            settings,
            grid_max_items,
        } => {
            let mut layout = load_settings(settings.as_deref())?;
            if let Some(grid_max_items) = grid_max_items {
                layout = LayoutSettings::with_grid_max_items(grid_max_items)?;
            }
            let scenario = scenario::load_scenario(&scenario)?;
            let mut stdout = scenario::replay(scenario, layout, io::stdout().lock())?;
            stdout.flush().context("failed to flush replay output")?;
            Ok(())
        }
        Command::Upgrades {
            database_url,
            system_call_integration,
            mark_seen,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to build tokio runtime")?;
            runtime.block_on(upgrades(&database_url, system_call_integration, mark_seen))
        }
    }
}

async fn upgrades(database_url: &str, system_call_integration: bool, mark_seen: bool) -> Result<()> {
    let mut capabilities = PlatformCapabilities::none();
    if system_call_integration {
        capabilities = capabilities.with(PlatformCapability::SystemCallIntegration);
    }

    let storage = Storage::new(database_url).await?;
    info!(database_url, "opened upgrade store");
    let finder = ExperienceUpgradeFinder::new(UpgradeCatalog::for_platform(&capabilities), storage);

    for upgrade in finder.all_unseen().await? {
        println!("{} {} ({})", upgrade.id, upgrade.title_key, upgrade.image);
    }

    if mark_seen {
        let inserted = finder.mark_all_as_seen().await?;
        println!("Marked {inserted} upgrade(s) as seen");
    }

    Ok(())
}
