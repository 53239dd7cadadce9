use crate::error::Kind;
use crate::{default_columns, parse_column_spec, Column, Error, DEFAULT_TABLE_NAME};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// colpatch config file, Config can either be instanced with [`Config::new`],
// retrieved from a config file with [`Config::from_file_location`]
// or from an environment variable with [`Config::from_env_var`]
#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    main: Main,
    #[serde(default)]
    table: Table,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug)]
pub enum ConfigDbType {
    Sqlite,
}

impl Config {
    /// create a new config instance
    pub fn new(db_type: ConfigDbType) -> Config {
        Config {
            main: Main {
                db_type,
                db_path: None,
            },
            table: Table::default(),
        }
    }

    /// create a new config instance from an environment variable holding the database path,
    /// optionally prefixed with `sqlite://`
    pub fn from_env_var(name: &str) -> Result<Config, Error> {
        let value = std::env::var(name).map_err(|_| {
            Error::new(
                Kind::ConfigError(format!(
                    "Couldn't find {} environment variable",
                    name
                )),
                None,
            )
        })?;

        let db_path = value.strip_prefix("sqlite://").unwrap_or(&value);
        if db_path.is_empty() {
            return Err(Error::new(
                Kind::ConfigError(format!("{} environment variable is empty", name)),
                None,
            ));
        }

        Ok(Config::new(ConfigDbType::Sqlite).set_db_path(db_path))
    }

    /// create a new Config instance from a config file located on the file system
    pub fn from_file_location<T: AsRef<Path>>(location: T) -> Result<Config, Error> {
        let file = std::fs::read_to_string(&location).map_err(|err| {
            Error::new(
                Kind::ConfigError(format!("could not open config file, {}", err)),
                None,
            )
        })?;

        let mut config: Config = toml::from_str(&file).map_err(|err| {
            Error::new(
                Kind::ConfigError(format!("could not parse config file, {}", err)),
                None,
            )
        })?;

        //replace relative path with canonical path in case of Sqlite db
        if config.main.db_type == ConfigDbType::Sqlite {
            let mut config_db_path = config.main.db_path.ok_or_else(|| {
                Error::new(
                    Kind::ConfigError("field path must be present for Sqlite database type".into()),
                    None,
                )
            })?;

            if config_db_path.is_relative() {
                let config_db_dir = match location.as_ref().parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                let config_db_dir = fs::canonicalize(config_db_dir).map_err(|err| {
                    Error::new(
                        Kind::ConfigError(format!("invalid config file directory, {}", err)),
                        None,
                    )
                })?;
                config_db_path = config_db_dir.join(&config_db_path)
            }

            let config_db_path = config_db_path.canonicalize().map_err(|err| {
                Error::new(
                    Kind::ConfigError(format!("invalid sqlite db path, {}", err)),
                    None,
                )
            })?;

            config.main.db_path = Some(config_db_path);
        }

        // fail early on malformed column specs
        config.columns()?;

        Ok(config)
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.main.db_path.as_deref()
    }

    pub fn db_type(&self) -> ConfigDbType {
        self.main.db_type
    }

    /// The table to patch, `users` unless set
    pub fn table_name(&self) -> &str {
        self.table.name.as_deref().unwrap_or(DEFAULT_TABLE_NAME)
    }

    /// The columns to ensure, `name` and `avatar` unless set
    pub fn columns(&self) -> Result<Vec<Column>, Error> {
        match &self.table.columns {
            Some(specs) => specs.iter().map(|spec| parse_column_spec(spec)).collect(),
            None => Ok(default_columns()),
        }
    }

    pub fn set_db_path(self, db_path: &str) -> Config {
        Config {
            main: Main {
                db_path: Some(db_path.into()),
                ..self.main
            },
            ..self
        }
    }

    pub fn set_table_name(self, table_name: &str) -> Config {
        Config {
            table: Table {
                name: Some(table_name.into()),
                ..self.table
            },
            ..self
        }
    }

    /// Set the column specs, each in the `name[:TYPE]` format
    pub fn set_columns(self, columns: &[&str]) -> Config {
        Config {
            table: Table {
                columns: Some(columns.iter().map(|c| c.to_string()).collect()),
                ..self.table
            },
            ..self
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct Main {
    db_type: ConfigDbType,
    db_path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Table {
    name: Option<String>,
    columns: Option<Vec<String>>,
}
