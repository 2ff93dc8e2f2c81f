use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod adapters;
mod commands;

#[derive(Parser)]
#[command(name = "campus-safety-cli", version, about = "Campus Safety CLI")]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emergency contact management
    Contacts {
        #[command(subcommand)]
        action: commands::contacts::ContactsAction,
    },
    /// Incident feed
    Feed {
        #[command(subcommand)]
        action: commands::feed::FeedAction,
    },
    /// Send the SOS message to every emergency contact
    Sos(commands::sos::SosArgs),
    /// Volume-down triple-press shortcut
    Shortcut {
        #[command(subcommand)]
        action: commands::shortcut::ShortcutAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Contacts { action } => commands::contacts::run(action),
        Commands::Feed { action } => commands::feed::run(action),
        Commands::Sos(args) => commands::sos::run(args),
        Commands::Shortcut { action } => commands::shortcut::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
