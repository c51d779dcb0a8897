mod cli;
mod engine;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Skip the simulated typing pause before coach replies
    #[arg(long)]
    no_delay: bool,

    /// Directory to save finished goals into
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a goal-setting chat session
    Chat {
        /// Skip the simulated typing pause before coach replies
        #[arg(long)]
        no_delay: bool,

        /// Directory to save finished goals into
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let (verbose, no_delay, save_dir) = match cli.command {
        Some(Commands::Chat {
            verbose,
            no_delay,
            save_dir,
        }) => (verbose, no_delay, save_dir.or(cli.save_dir)),
        None => (cli.verbose, cli.no_delay, cli.save_dir),
    };

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Starting Tandem Goal Coach");

    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        true,
        no_delay,
        save_dir,
    );
    chat_context.run().await
}
