use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use arcade_admin::build_app;
use arcade_admin::config::{AdminConfig, DEFAULT_CONFIG_FILE};
use arcade_admin::store::CatalogStore;
use arcade_admin::writer::{FileStatus, SiteWriter};
use arcade_core::render::RenderContext;
use arcade_core::site::plan_site;

/// Catalog admin server and static site builder
#[derive(Parser, Debug)]
#[command(name = "arcade-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file
    #[arg(long, global = true, env = "ARCADE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the admin HTTP server (default)
    Serve,
    /// Write the whole site tree once and exit
    Build,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AdminConfig::load(&cli.config);
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{problem}");
        }
        return ExitCode::FAILURE;
    }

    let store = match CatalogStore::load(&config.catalog_path).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            return ExitCode::FAILURE;
        },
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, store).await,
        Command::Build => build(&config, &store).await,
    }
}

async fn serve(config: AdminConfig, store: CatalogStore) -> ExitCode {
    let addr = config.listen_addr.clone();
    let (app, _state) = build_app(config, store);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {addr}: {e}");
            return ExitCode::FAILURE;
        },
    };
    tracing::info!("Arcade admin listening on {addr}");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn build(config: &AdminConfig, store: &CatalogStore) -> ExitCode {
    let ctx = RenderContext::new(store.catalog(), config.base_url.as_deref(), &config.site);
    let pages = plan_site(&ctx);
    let writer = SiteWriter::new(&config.site_root);
    tracing::info!(pages = pages.len(), root = %config.site_root.display(), "Building site");

    let report = writer.write_all(&pages).await;
    for file in &report.files {
        if let FileStatus::Failed { reason } = &file.status {
            tracing::error!(path = %file.path, "Failed: {reason}");
        }
    }
    println!("{}", report.summary());

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
