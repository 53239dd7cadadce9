use std::fmt;

use crate::traits::sync::Patch;
use crate::{Column, ColumnInfo, Error};

/// The table patched when none is set
pub const DEFAULT_TABLE_NAME: &str = "users";

/// The columns ensured when none are given: `name TEXT` and `avatar TEXT`
pub fn default_columns() -> Vec<Column> {
    vec![Column::text("name"), Column::text("avatar")]
}

/// What happened when adding a single column
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnOutcome {
    /// The column was added to the table
    Added,
    /// The table already had a column with this name, holds the database message
    AlreadyExists(String),
    /// The database refused the column for any other reason, holds the database message
    Rejected(String),
}

impl ColumnOutcome {
    /// Whether the column is on the table after the run
    pub fn is_present(&self) -> bool {
        matches!(self, ColumnOutcome::Added | ColumnOutcome::AlreadyExists(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnReport {
    column: Column,
    outcome: ColumnOutcome,
}

impl ColumnReport {
    pub(crate) fn new(column: Column, outcome: ColumnOutcome) -> ColumnReport {
        ColumnReport { column, outcome }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn outcome(&self) -> &ColumnOutcome {
        &self.outcome
    }
}

// one line per column: `added avatar` or `err name duplicate column name: name`
impl fmt::Display for ColumnReport {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ColumnOutcome::Added => write!(fmt, "added {}", self.column.name()),
            ColumnOutcome::AlreadyExists(msg) | ColumnOutcome::Rejected(msg) => {
                write!(fmt, "err {} {}", self.column.name(), msg)
            }
        }
    }
}

/// Struct that represents the report of a patch run.
/// A `Report` instance is returned by [`Patcher::run`] via [`Result`]`<Report, Error>`.
/// If the final table introspection fails, the column outcomes are still available
/// through [`Error::report`], with an empty schema.
#[derive(Clone, Debug)]
pub struct Report {
    outcomes: Vec<ColumnReport>,
    schema: Vec<ColumnInfo>,
}

impl Report {
    /// Instantiate a new Report
    pub(crate) fn new(outcomes: Vec<ColumnReport>, schema: Vec<ColumnInfo>) -> Report {
        Report { outcomes, schema }
    }

    /// The outcome of every requested column, in the order they were attempted
    pub fn outcomes(&self) -> &[ColumnReport] {
        &self.outcomes
    }

    /// The names of the columns added during this run
    pub fn added_columns(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|r| r.outcome == ColumnOutcome::Added)
            .map(|r| r.column.name())
            .collect()
    }

    /// The column descriptors of the table after the run
    pub fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }
}

/// Struct that represents the entrypoint to patch a table,
/// it ensures every given column exists on it.
pub struct Patcher {
    columns: Vec<Column>,
    table_name: String,
}

impl Patcher {
    /// instantiate a new Patcher targeting the `users` table
    pub fn new(columns: &[Column]) -> Patcher {
        Patcher {
            columns: columns.to_vec(),
            table_name: DEFAULT_TABLE_NAME.into(),
        }
    }

    /// Get the columns this patcher ensures.
    pub fn get_columns(&self) -> &Vec<Column> {
        &self.columns
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Set the table to patch. The default name is `users`
    ///
    /// # Panics
    ///
    /// If the provided `table_name` is empty
    pub fn set_table_name<S: AsRef<str>>(self, table_name: S) -> Patcher {
        if table_name.as_ref().is_empty() {
            panic!("Table name must not be empty");
        }

        Patcher {
            table_name: table_name.as_ref().to_string(),
            ..self
        }
    }

    /// Queries the database for the current columns of the table
    pub fn get_table_info<C>(&self, conn: &'_ mut C) -> Result<Vec<ColumnInfo>, Error>
    where
        C: Patch,
    {
        Patch::get_table_info(conn, &self.table_name)
    }

    /// Adds every missing column to the table, then reads the table back.
    /// Columns that can't be added are reported, they don't fail the run.
    pub fn run<C>(&self, connection: &mut C) -> Result<Report, Error>
    where
        C: Patch,
    {
        Patch::ensure_columns(connection, &self.columns, &self.table_name)
    }
}
