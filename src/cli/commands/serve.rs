use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::server;
use crate::store::SqliteStore;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { host, port } = cmd {
        let mut store = SqliteStore::open(&cfg.database)?;
        server::serve(&mut store, cfg, &format!("{}:{}", host, port))?;
    }

    Ok(())
}
