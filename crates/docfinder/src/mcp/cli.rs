#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Serve the doctor directory over the Model Context Protocol")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serve JSON-RPC requests line by line on stdin/stdout
    #[clap(name = "stdio")]
    Stdio,

    /// Serve JSON-RPC requests over HTTP
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "DOCFINDER_MCP_PORT")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "DOCFINDER_MCP_HOST")]
    pub host: String,
}
