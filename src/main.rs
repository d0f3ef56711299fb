//! CLI entry point for woetflow

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "woetflow")]
#[command(version)]
#[command(about = "Static site builder for the Woet Flow blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List the routes published in the sitemap
    Routes {
        /// Print absolute URLs instead of paths
        #[arg(short, long)]
        absolute: bool,
    },

    /// Generate, then serve the public folder
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured host)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "woetflow=debug,info"
    } else {
        "woetflow=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            woetflow::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate { watch } => {
            let site = woetflow::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                tokio::task::spawn_blocking(move || woetflow::commands::generate::watch(&site))
                    .await??;
            }
        }

        Commands::Routes { absolute } => {
            let site = woetflow::Site::new(&base_dir)?;
            woetflow::commands::routes::run(&site, absolute)?;
        }

        Commands::Server { port, ip } => {
            let site = woetflow::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;

            let ip = ip.unwrap_or_else(|| site.config.server.host.clone());
            let port = port.unwrap_or(site.config.server.port);
            woetflow::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = woetflow::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Config => {
            let site = woetflow::Site::new(&base_dir)?;
            woetflow::commands::config::run(&site)?;
        }
    }

    Ok(())
}
