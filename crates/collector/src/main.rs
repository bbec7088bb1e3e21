// Copyright 2025 Alexandre D. Díaz
mod config;
mod error;
mod fetcher;
mod ingest;
mod opentdb;
mod token_store;

use std::env;
use std::fs;
use std::path::Path;

use r2d2_sqlite::SqliteConnectionManager;

use triviadb::{models, Pool};

use config::{CollectorConfig, Command};
use error::CollectorError;
use fetcher::BatchFetcher;
use ingest::IngestStats;
use opentdb::OpenTdbClient;
use token_store::TokenRecord;

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args: Vec<String> = env::args().collect();
    if let Err(err) = run(&args).await {
        log::error!("{err}");
        std::process::exit(err.exit_code());
    }
}

async fn run(args: &[String]) -> Result<(), CollectorError> {
    let config = CollectorConfig::new(args)?;
    let client = OpenTdbClient::new(config.get_base_url());
    match config.get_command() {
        Command::Token => acquire_token(&client, config.get_token_path()).await,
        Command::Fetch => fetch_questions(&client, &config).await,
    }
}

async fn acquire_token(client: &OpenTdbClient, token_path: &str) -> Result<(), CollectorError> {
    log::info!("Requesting token from {}...", client.base_url());
    let raw = client.request_token().await?;
    let record = TokenRecord::from_response(raw)?;
    record.save(token_path)?;
    log::info!("Token saved to '{token_path}'");
    log::info!("Token: {}", record.token);
    Ok(())
}

async fn fetch_questions(
    client: &OpenTdbClient,
    config: &CollectorConfig,
) -> Result<(), CollectorError> {
    // the token is read once here and threaded down as a plain value
    let record = TokenRecord::load(config.get_token_path())?;
    let query = fetcher::normalize_query(config.get_query(), config.get_base_url())?;

    let db_path = config.get_db_path();
    if let Some(parent) = Path::new(db_path).parent() {
        fs::create_dir_all(parent)?;
    }
    let manager = SqliteConnectionManager::file(db_path);
    let pool = Pool::new(manager)?;
    let mut conn = pool.get()?;
    models::prepare_schema(&conn)?;
    models::populate_basics(&conn)?;

    let mut batch_fetcher = BatchFetcher::new(client, query, &record.token);
    let mut stats = IngestStats::default();
    while let Some(page) = batch_fetcher.next_page().await? {
        ingest::write_page(&mut conn, &page, &mut stats)?;
    }

    log::info!(
        "Done. Inserted: {}, Skipped (duplicates): {}",
        stats.inserted,
        stats.skipped
    );
    Ok(())
}
