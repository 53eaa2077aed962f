use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rtfm-mcp")]
#[command(about = "Link into library and language documentation for AI assistants", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $RTFM_MCP_CONFIG, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Look up a symbol once and print the links
    Lookup {
        /// Documentation source name or alias
        doc: String,
        /// Symbol to look up; omit for the landing page
        query: Vec<String>,
    },
    /// List documentation sources
    Sources,
    /// Show details for one source
    Info { doc: String },
}

impl Cli {
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}
