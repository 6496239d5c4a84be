//! Persona CLI
//!
//! Entry point for the Person-graph API server.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use persona_core::AppConfig;
use persona_db::DbPool;
use persona_graph::GraphClient;
use persona_web::state::AppState;

#[derive(Parser)]
#[command(name = "persona", version, about = "Persona Person-graph API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve(ServeArgs),
    /// Apply relational migrations and initialize graph constraints, then exit
    Migrate,
}

#[derive(Args)]
struct ServeArgs {
    /// Listen host (overrides PERSONA_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides PERSONA_PORT)
    #[arg(long)]
    port: Option<u16>,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "persona=info,persona_web=debug,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Migrate => migrate().await,
    }
}

async fn open_stores(config: &AppConfig) -> Result<(DbPool, GraphClient)> {
    let db = DbPool::open(&config.database_path)?;
    persona_db::migrations::run_migrations(&db)?;
    info!("User store ready at {}", config.database_path);

    let graph = GraphClient::connect(&config.graph).await?;
    persona_graph::schema::initialize_schema(&graph).await?;
    info!("Graph store ready at {}", config.graph.uri);

    Ok((db, graph))
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let (db, graph) = open_stores(&config).await?;
    let state = AppState::new(db, graph, config);

    persona_web::run_server(state).await
}

async fn migrate() -> Result<()> {
    let config = AppConfig::from_env();
    open_stores(&config).await?;
    info!("Migrations complete");
    Ok(())
}
