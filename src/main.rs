use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roadmap_visualizer::config::{ServerConfig, StoreArgs};
use roadmap_visualizer::{api, check, mcp};

#[derive(Parser)]
#[command(name = "roadmap")]
#[command(about = "Roadmap upload server with cross-roadmap dependency checks")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServerConfig,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve(ServerConfig),
    /// Start MCP server via stdio
    Mcp(StoreArgs),
    /// Check local roadmap files and their external dependencies
    Check {
        /// Roadmap YAML files; each may hold several `---` separated documents
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check whether a server is running
    Status {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "roadmap_visualizer=debug,roadmap_core=debug,tower_http=debug".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(config)) => serve(config).await?,
        Some(Commands::Mcp(store)) => {
            mcp::run_stdio_server(store.open_store()?).await?;
        }
        Some(Commands::Check { files }) => {
            let report = check::check_files(&files);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Status { host, port }) => {
            let url = format!("http://{}:{}/health", host, port);
            match reqwest::get(&url).await {
                Ok(response) if response.status().is_success() => {
                    println!("Roadmap server is running at http://{}:{}", host, port);
                }
                Ok(response) => {
                    println!("Roadmap server responded with {}", response.status());
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => {
                    println!("Roadmap server is not reachable at {}: {}", url, err);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        None => serve(cli.serve).await?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting roadmap server on {}", config.addr());

    let store = config.store.open_store()?;
    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("Roadmap server listening on http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
