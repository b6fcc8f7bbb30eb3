use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ailife::cli;

#[derive(Parser)]
#[command(name = "ailife")]
#[command(about = "Character life simulation with learning memory", version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance the character by exactly one simulated day
    Live {
        /// Character name
        #[arg(default_value = "Alex")]
        name: String,
        /// Data directory (default: config dir)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// AI provider (ollama/openai)
        #[arg(long)]
        provider: Option<String>,
        /// AI model to use
        #[arg(long)]
        model: Option<String>,
        /// Seed for reproducible randomness
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show character stats, personality, goals and inventory
    Status {
        #[arg(default_value = "Alex")]
        name: String,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// List the character's relationships
    Relationships {
        #[arg(default_value = "Alex")]
        name: String,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Show recent day summaries
    Logs {
        #[arg(default_value = "Alex")]
        name: String,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// How many days to show
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Live {
            name,
            data_dir,
            provider,
            model,
            seed,
        } => cli::handle_live(name, data_dir, provider, model, seed).await,
        Commands::Status { name, data_dir } => cli::handle_status(name, data_dir).await,
        Commands::Relationships { name, data_dir } => {
            cli::handle_relationships(name, data_dir).await
        }
        Commands::Logs {
            name,
            data_dir,
            limit,
        } => cli::handle_logs(name, data_dir, limit).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
