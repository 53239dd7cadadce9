use crate::error::{Kind, WrapPatchError};
use crate::traits::sync::{Patch, Query, Transaction};
use crate::{Column, ColumnInfo, Error, Patcher, Report};

use rusqlite::{Connection as RqlConnection, Error as RqlError, OpenFlags};
use std::path::Path;

fn query_table_info(conn: &RqlConnection, query: &str) -> Result<Vec<ColumnInfo>, RqlError> {
    let mut stmt = conn.prepare(query)?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let not_null: i64 = row.get(3)?;
        columns.push(ColumnInfo::new(
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            not_null != 0,
            row.get(4)?,
            row.get(5)?,
        ));
    }
    Ok(columns)
}

impl Transaction for RqlConnection {
    type Error = RqlError;
    fn execute_each(
        &mut self,
        queries: &[&str],
    ) -> Result<Vec<Result<(), Self::Error>>, Self::Error> {
        let transaction = self.transaction()?;
        let results: Vec<Result<(), RqlError>> = queries
            .iter()
            .map(|query| transaction.execute_batch(query))
            .collect();
        transaction.commit()?;
        Ok(results)
    }
}

impl Query<Vec<ColumnInfo>> for RqlConnection {
    fn query(&mut self, query: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
        query_table_info(self, query)
    }
}

impl Patch for RqlConnection {
    fn is_duplicate_column(err: &RqlError) -> bool {
        match err {
            RqlError::SqliteFailure(_, Some(message)) => {
                message.contains("duplicate column name")
            }
            _ => false,
        }
    }
}

/// Open an existing sqlite database for reading and writing.
/// A missing file or a file that isn't a sqlite database is an error
pub(crate) fn open(path: &Path) -> Result<RqlConnection, Error> {
    let conn = RqlConnection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
        .patch_err("could not open database", None)?;
    // sqlite reads the header lazily, make it happen now
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
        .patch_err("could not open database", None)?;
    Ok(conn)
}

/// Ensure `table_name` in the sqlite database at `store_path` has every one of `columns`.
///
/// The connection is opened here and closed when this returns.
/// An empty `table_name` is an error, the database is left untouched.
pub fn ensure_columns(
    store_path: impl AsRef<Path>,
    table_name: &str,
    columns: &[Column],
) -> Result<Report, Error> {
    if table_name.is_empty() {
        return Err(Error::new(
            Kind::ConfigError("table name must not be empty".into()),
            None,
        ));
    }

    let mut conn = open(store_path.as_ref())?;
    Patcher::new(columns)
        .set_table_name(table_name)
        .run(&mut conn)
}
