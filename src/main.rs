mod config;
mod logging;
mod models;
mod report;
mod run;
mod state;
mod storage;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_data_dir()?;
    logging::init(&config)?;
    let store = storage::SqliteStore::open(&config.db_path())?;

    match args.len() {
        1 => run::as_tui(&store, &config),
        2.. => run::as_cli(&args, &store, &config),
        _ => {
            eprintln!("Usage: hisabkitab [command]");
            Ok(())
        }
    }
}
