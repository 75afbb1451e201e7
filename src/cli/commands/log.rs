use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::store::SqliteStore;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        // opening the store also brings the schema up to date
        let mut store = SqliteStore::open(&cfg.database)?;
        LogLogic::print_log(store.pool())?;
    }

    Ok(())
}
