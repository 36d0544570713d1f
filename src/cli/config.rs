//! `config` command: show paths and settings, change a setting

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and current settings
    Show,
    /// Change a setting (currency_symbol, export_include_totals, chart_width, audit_enabled)
    Set { key: String, value: String },
}

pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> LedgerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:       {}", settings.currency_symbol);
            println!("  export_include_totals: {}", settings.export_include_totals);
            println!("  chart_width:           {}", settings.chart_width);
            println!("  audit_enabled:         {}", settings.audit_enabled);
        }
        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }
    Ok(())
}
