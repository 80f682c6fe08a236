use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use remesa::application::RemittanceService;
use remesa::infrastructure::in_memory::{
    InMemoryCorridorStore, InMemoryRecipientStore, InMemoryRemittanceStore, InMemorySenderStore,
};
use remesa::interfaces::{demo, http};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. `remesa=debug`
    #[arg(long, env = "REMESA_LOG", default_value = "remesa=info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "REMESA_BIND", default_value = "127.0.0.1")]
        bind: IpAddr,

        /// Port to listen on
        #[arg(long, env = "REMESA_PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Run the seeded console walkthrough
    Demo {
        /// Also write the final transfer collection to this file as JSON
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn service() -> RemittanceService {
    RemittanceService::new(
        Box::new(InMemoryRemittanceStore::new()),
        Box::new(InMemorySenderStore::new()),
        Box::new(InMemoryRecipientStore::new()),
        Box::new(InMemoryCorridorStore::new()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_env_filter(cli.log).init();

    match cli.command {
        Command::Serve { bind, port } => {
            let listener = tokio::net::TcpListener::bind((bind, port))
                .await
                .into_diagnostic()?;
            http::run_with_listener(Arc::new(service()), listener)
                .await
                .into_diagnostic()?;
        }
        Command::Demo { export } => {
            demo::run(&service(), export.as_deref())
                .await
                .into_diagnostic()?;
        }
    }

    Ok(())
}
