use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::SqliteStore;
use crate::utils::path::absolute_output;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let path = absolute_output(file, "Output file")?;
        let mut store = SqliteStore::open(&cfg.database)?;
        ExportLogic::export(&mut store, cfg, *format, &path, range, *force)?;
    }

    Ok(())
}
