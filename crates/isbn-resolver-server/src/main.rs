//! ISBN resolver server: entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use isbn_resolver_server::config::ServerConfig;

#[derive(Parser)]
#[command(
    name = "isbn-resolver-server",
    about = "Resolve book title and author by ISBN across catalog sources",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(flatten)]
    config: ServerConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,

    /// Resolve one ISBN and print the JSON a search route would return.
    Lookup {
        /// ISBN to resolve.
        isbn: String,

        /// Use the NCL-first chain with provenance tags.
        #[arg(long)]
        ncl: bool,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   isbn-resolver-server completions bash > ~/.local/share/bash-completion/completions/isbn-resolver-server
    ///   isbn-resolver-server completions zsh > ~/.zfunc/_isbn-resolver-server
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            isbn_resolver_server::serve(&cli.config).await?;
        }

        Commands::Lookup { isbn, ncl } => {
            let resolver = cli.config.build_resolver();
            let records = if ncl {
                resolver.search_with_provenance(&isbn).await
            } else {
                resolver.search(&isbn).await
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "isbn-resolver-server",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
