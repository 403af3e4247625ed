use crate::listings::{run_profiles, ProfilesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use macro_menu::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Macro Menu",
    about = "Serve scored restaurant menu data and inspect diet-profile picks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a menu export and print the per-restaurant picks for a profile
    Profiles(ProfilesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve the web artifact from this path instead of MENU_ARTIFACT_PATH
    #[arg(long)]
    pub(crate) artifact: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Profiles(args) => run_profiles(args),
    }
}
