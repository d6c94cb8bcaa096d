use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "daily-creator", version, about = "Daily Creator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current streak (resets it if a day was missed)
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark today's creation
    Mark {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a random motivational phrase
    Phrase,
    /// Show or change the daily reminder time
    Time {
        /// New time, HH:MM
        time: Option<String>,
    },
    /// Send one reminder notification now
    Notify,
    /// Enable notifications and run the daily reminder until Ctrl-C
    Remind {
        /// Reminder time, HH:MM (saved for next runs)
        #[arg(long)]
        time: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DAILY_CREATOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json } => commands::streak::status(json),
        Commands::Mark { json } => commands::streak::mark(json),
        Commands::Phrase => commands::streak::phrase(),
        Commands::Time { time } => commands::streak::time(time),
        Commands::Notify => commands::remind::notify(),
        Commands::Remind { time } => commands::remind::remind(time),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
