use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ideaforge::logging::{self, LogFormat};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "ideaforge")]
#[command(version, about = "AI-powered hackathon idea generator")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Path to ideaforge.toml (defaults to ./ideaforge.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one idea from community problem discovery
    Independent {
        /// Hackathon track or domain
        #[arg(short, long)]
        track: String,

        /// Additional requirements
        #[arg(short, long, default_value = "")]
        requirements: String,
    },
    /// Iterate propose/critique until an idea passes the threshold
    Depth {
        /// Hackathon track or domain
        #[arg(short, long)]
        track: String,

        /// Problem statement to solve
        #[arg(short, long)]
        problem: String,

        /// Score needed to pass, 1-9 (overrides ideaforge.toml)
        #[arg(long)]
        threshold: Option<u8>,

        /// Maximum iterations, 1-20 (overrides ideaforge.toml)
        #[arg(short = 'm', long = "max-iter")]
        max_iter: Option<u32>,
    },
    /// Serve the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable permissive CORS
        #[arg(long, conflicts_with = "no_cors")]
        cors: bool,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },
    /// View, validate or create ideaforge.toml
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default ideaforge.toml
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = std::env::current_dir().context("Failed to get current directory")?;

    let serving = matches!(cli.command, Commands::Serve { .. });
    let _log_guard = logging::init(
        cli.log_format,
        logging::default_level(cli.verbose, serving),
    );

    match &cli.command {
        Commands::Independent {
            track,
            requirements,
        } => {
            cmd::cmd_independent(&cli, &project_dir, track, requirements).await?;
        }
        Commands::Depth {
            track,
            problem,
            threshold,
            max_iter,
        } => {
            cmd::cmd_depth(&cli, &project_dir, track, problem, *threshold, *max_iter).await?;
        }
        Commands::Serve {
            host,
            port,
            cors,
            no_cors,
        } => {
            let cors = match (*cors, *no_cors) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            cmd::cmd_serve(&cli, &project_dir, host.clone(), *port, cors).await?;
        }
        Commands::Config { command } => {
            cmd::cmd_config(&cli, &project_dir, command.clone())?;
        }
    }

    Ok(())
}
