use std::path::{Path, PathBuf};

use anyhow::Context;
use colpatch_core::config::{Config, ConfigDbType};
use colpatch_core::{parse_column_spec, Column};

pub const DEFAULT_DB_PATH: &str = "backend/habits.db";

/// Resolve the database to patch, the positional path wins over the environment variable,
/// which wins over the config file, which wins over ./backend/habits.db
pub fn config(
    db_path: Option<&Path>,
    config_location: Option<&Path>,
    env_var_opt: Option<&str>,
) -> anyhow::Result<Config> {
    let config = match config_location {
        Some(location) => Some(Config::from_file_location(location).with_context(|| {
            format!("could not parse the config file {}", location.display())
        })?),
        None => None,
    };

    let db_path = match (db_path, env_var_opt) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(env_var)) => {
            let env_config = Config::from_env_var(env_var)
                .context("could not load database path from environment variable")?;
            env_config.db_path().map(Path::to_path_buf)
        }
        (None, None) => None,
    };

    let config = match (config, db_path) {
        (Some(config), None) => config,
        (Some(config), Some(path)) => config.set_db_path(&path_str(&path)?),
        (None, path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
            Config::new(ConfigDbType::Sqlite).set_db_path(&path_str(&path)?)
        }
    };

    Ok(config)
}

fn path_str(path: &Path) -> anyhow::Result<String> {
    path.to_str()
        .map(str::to_string)
        .with_context(|| format!("database path {} is not valid UTF-8", path.display()))
}

/// The columns given on the command line, or the ones from the config when none were given
pub fn columns(specs: &[String], config: &Config) -> anyhow::Result<Vec<Column>> {
    if specs.is_empty() {
        return Ok(config.columns()?);
    }

    specs
        .iter()
        .map(|spec| parse_column_spec(spec).map_err(anyhow::Error::from))
        .collect()
}
