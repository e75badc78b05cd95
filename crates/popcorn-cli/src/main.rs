use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, search, show, watched, AppContext};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod views;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - search movies, rate them, and keep a list of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie database
    #[command(long_about = "Search OMDb by title. Queries shorter than the configured minimum (3 characters by default) are not sent.")]
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show the full record for one movie
    Show {
        /// IMDb id, e.g. tt0133093
        id: String,
    },
    /// Rate a movie and add it to your watched list
    Add {
        /// IMDb id, e.g. tt0133093
        id: String,

        /// Your rating
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a movie from your watched list
    Remove {
        /// IMDb id, e.g. tt0133093
        id: String,
    },
    /// Show your watched list and its averages
    Watched,
    /// Interactive search, rate and add loop
    Browse,
    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print where config, data and logs live
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let ctx = AppContext::load(cli.config)?;

    logging::init_logging(cli.verbose, cli.quiet, ctx.config.logging.file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&ctx, query.join(" "), &output).await,
        Commands::Show { id } => show::run_show(&ctx, id, &output).await,
        Commands::Add { id, rating } => watched::run_add(&ctx, id, rating, &output).await,
        Commands::Remove { id } => watched::run_remove(&ctx, id, &output).await,
        Commands::Watched => watched::run_list(&ctx, &output).await,
        Commands::Browse => browse::run_browse(&ctx, &output).await,
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
            ConfigCommands::Show { full } => config::run_show(&ctx, full, &output),
            ConfigCommands::Init { force } => config::run_init(&ctx, force, &output),
            ConfigCommands::Path => config::run_paths(&ctx, &output),
        },
    }
}
