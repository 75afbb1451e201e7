use crate::errors::AppResult;

use crate::cli::parser::Commands;
use crate::core::config::ConfigLogic;
use std::path::Path;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, config_path: &Path) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            ConfigLogic::print(config_path)?;
        }

        if *check {
            ConfigLogic::check(config_path)?;
        }

        if *migrate {
            ConfigLogic::migrate(config_path)?;
        }

        if *edit_config {
            ConfigLogic::edit(config_path, editor)?;
        }
    }

    Ok(())
}
