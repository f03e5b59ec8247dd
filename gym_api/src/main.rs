use clap::{Parser, Subcommand};
use gym_core::{Config, Error, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gym-api")]
#[command(about = "Workout tracking HTTP API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, global = true)]
    host: Option<String>,

    /// Override the listen port
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Write a config file containing the defaults
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config, force),
        Some(Commands::Serve) | None => {
            let config = gym_core::logging::with_bootstrap(|| {
                load_config(cli.config, cli.host, cli.port)
            })?;
            cmd_serve(config)
        }
    }
}

fn load_config(
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    Ok(config)
}

fn cmd_serve(config: Config) -> Result<()> {
    // Initialize logging
    gym_core::logging::init_with_level(&config.logging.level);

    tracing::info!(
        deadline_ms = config.server.request_deadline_ms,
        origins = ?config.cors.allowed_origins,
        "Starting Gym API"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(gym_api::serve(config))
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}
