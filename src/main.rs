//! switch-route: compile a route file into a dispatch structure.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml
//!       │
//!       ▼
//!  ┌─────────┐    ┌────────────┐    ┌──────────────┐    ┌──────────────┐
//!  │ config  │───▶│ RouteTable │───▶│   build()    │───▶│  RouteNode   │───▶ renderer
//!  │ loader  │    │ (ordered)  │    │ key + path   │    │ trie of      │     (outline,
//!  └─────────┘    └────────────┘    │ parsing      │    │ Endpoints    │      JSON, ...)
//!       ▲                           └──────────────┘    └──────────────┘
//!       │
//!  ┌─────────┐
//!  │ watcher │  (watch mode: rebuild on change)
//!  └─────────┘
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use switch_route::config::watcher::ConfigWatcher;
use switch_route::config::{load_config, RoutesConfig};
use switch_route::observability::logging::{init_logging, DEFAULT_FILTER};
use switch_route::report::{summarize, BuildStats};
use switch_route::routing::{CompiledRoutes, RouteTable};

#[derive(Parser)]
#[command(name = "switch-route")]
#[command(about = "Compile METHOD /path routes into a segment dispatch tree", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = DEFAULT_FILTER)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a route file and report counts
    Check { file: PathBuf },
    /// Print the compiled structure
    Show {
        file: PathBuf,
        /// One JSON object per unique route instead of an outline
        #[arg(long)]
        json: bool,
    },
    /// Rebuild whenever the route file changes
    Watch { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;

    match cli.command {
        Commands::Check { file } => {
            let table = load_table(&file)?;
            let tree = table.structure()?;
            print_stats(&file, BuildStats::of(&tree));
        }
        Commands::Show { file, json } => {
            let tree = load_table(&file)?.structure()?;
            if json {
                for route in summarize(&tree) {
                    println!("{}", serde_json::to_string(&route)?);
                }
            } else {
                print!("{}", tree.outline());
            }
        }
        Commands::Watch { file } => watch(&file).await?,
    }

    Ok(())
}

fn load_table(file: &Path) -> Result<RouteTable<Value>, Box<dyn std::error::Error>> {
    let config = load_config(file)?;
    Ok(config.into_table()?)
}

fn print_stats(file: &Path, stats: BuildStats) {
    println!(
        "{}: {} endpoints, {} routes, {} unique{}",
        file.display(),
        stats.endpoints,
        stats.routes,
        stats.unique_routes,
        if stats.has_default { ", default route set" } else { "" }
    );
}

async fn watch(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let compiled = CompiledRoutes::new(&load_table(file)?)?;
    print_stats(file, BuildStats::of(compiled.load().as_ref()));

    let (watcher, mut updates) = ConfigWatcher::new(file);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(config) = updates.recv() => rebuild(&compiled, file, config),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(compiled: &CompiledRoutes<Value>, file: &Path, config: RoutesConfig) {
    // failures are logged by the registry
    if let Ok(tree) = compiled.reload_config(config) {
        print_stats(file, BuildStats::of(tree.as_ref()));
    }
}
