//! Defines the CLI application

use std::path::PathBuf;

use clap::Parser;

/// Ensure a table of a sqlite database has a set of nullable columns
#[derive(Parser)]
#[clap(version)]
pub struct Cli {
    /// Database path, defaults to ./backend/habits.db
    pub db_path: Option<PathBuf>,

    /// Config file location
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Load database path from the given environment variable
    #[clap(short, long)]
    pub env_var: Option<String>,

    /// Table to patch
    #[clap(short, long)]
    pub table_name: Option<String>,

    /// Column to ensure, in the format name[:TYPE], the type defaults to TEXT.
    /// Can be repeated, defaults to name and avatar
    #[clap(long = "column", value_name = "SPEC")]
    pub columns: Vec<String>,
}
