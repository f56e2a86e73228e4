use crate::prelude::*;
use clap::Parser;

mod browse;
mod directory;
mod error;
mod list;
mod mcp;
mod prelude;
mod specialties;
mod suggest;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, filter and sort a doctor directory from the terminal"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Doctor directory endpoint (JSON array of doctors)
    #[clap(
        long,
        env = "DOCFINDER_URL",
        global = true,
        default_value = directory::DEFAULT_DIRECTORY_URL
    )]
    url: String,

    /// Whether to display additional information.
    #[clap(long, env = "DOCFINDER_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List doctors matching the given filters
    List(crate::list::ListOptions),

    /// List the specialties present in the directory
    Specialties(crate::specialties::SpecialtiesOptions),

    /// Suggest doctor names for a partial search term
    Suggest(crate::suggest::SuggestOptions),

    /// Browse the directory interactively
    Browse(crate::browse::BrowseOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Specialties(options) => crate::specialties::run(options, app.global).await,
        SubCommands::Suggest(options) => crate::suggest::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
