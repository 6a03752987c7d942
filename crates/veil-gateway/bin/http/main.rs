mod cli;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use veil_gateway::{App, AppState};
use veil_generator::RandomGenerator;
use veil_storage::{InMemoryRepository, MySqlRepository, Repository};
use veil_tokenizer::TokenizerService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryRepository::new()).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            if config.migrate {
                repository.migrate().await?;
            }
            run_server(config.listen_addr, repository).await?;
        }
    }

    Ok(())
}

async fn run_server<R: Repository>(listen_addr: SocketAddr, repository: R) -> std::io::Result<()> {
    let tokenizer = TokenizerService::new(repository, RandomGenerator::default());
    let router = App::router(AppState::new(Arc::new(tokenizer)));

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
