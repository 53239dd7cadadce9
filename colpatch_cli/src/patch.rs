use anyhow::Context;
use colpatch_core::config::{Config, ConfigDbType};
use colpatch_core::{display_table_info, Patcher, Report};

use crate::cli::Cli;
use crate::util::{columns, config};

pub fn handle_patch_command(args: Cli) -> anyhow::Result<()> {
    let mut config = config(
        args.db_path.as_deref(),
        args.config.as_deref(),
        args.env_var.as_deref(),
    )?;
    let columns = columns(&args.columns, &config)?;
    let table_name = args
        .table_name
        .unwrap_or_else(|| config.table_name().to_string());
    if table_name.is_empty() {
        anyhow::bail!("table name must not be empty");
    }

    log::debug!("patching table {} of {:?}", table_name, config.db_path());

    let patcher = Patcher::new(&columns).set_table_name(&table_name);
    let report = run_patch(&patcher, &mut config)
        .with_context(|| format!("could not patch table {}", table_name))?;

    for outcome in report.outcomes() {
        println!("{}", outcome);
    }
    println!("{}", display_table_info(report.schema()));

    Ok(())
}

fn run_patch(patcher: &Patcher, config: &mut Config) -> anyhow::Result<Report> {
    match config.db_type() {
        ConfigDbType::Sqlite => {
            cfg_if::cfg_if! {
                if #[cfg(feature = "sqlite")] {
                    Ok(patcher.run(config)?)
                } else {
                    let _ = patcher;
                    anyhow::bail!("tried to patch a sqlite database, but the sqlite feature was not enabled!")
                }
            }
        }
    }
}
