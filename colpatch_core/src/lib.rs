mod column;
#[cfg(feature = "config")]
pub mod config;
mod drivers;
pub mod error;
mod patcher;
pub mod traits;
mod util;

pub use crate::column::{display_table_info, Column, ColumnInfo};
pub use crate::error::Error;
pub use crate::patcher::{
    default_columns, ColumnOutcome, ColumnReport, Patcher, Report, DEFAULT_TABLE_NAME,
};
pub use crate::traits::sync::Patch;
pub use crate::util::parse_column_spec;

#[cfg(feature = "rusqlite")]
pub use crate::drivers::rusqlite::ensure_columns;

#[cfg(feature = "rusqlite")]
pub use rusqlite;
