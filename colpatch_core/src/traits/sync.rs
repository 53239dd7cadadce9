use crate::error::WrapPatchError;
use crate::traits::{classify_outcomes, quote_identifier, ADD_COLUMN_QUERY, TABLE_INFO_QUERY};
use crate::{Column, ColumnInfo, Error, Report};

pub trait Transaction {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run every query inside a single transaction and commit it once all of them were attempted.
    /// A failing query doesn't stop the following ones, its error is returned at its position.
    /// The outer error is reserved for failures to open or commit the transaction.
    fn execute_each(&mut self, queries: &[&str])
        -> Result<Vec<Result<(), Self::Error>>, Self::Error>;
}

pub trait Query<T>: Transaction {
    fn query(&mut self, query: &str) -> Result<T, Self::Error>;
}

pub trait Patch: Query<Vec<ColumnInfo>>
where
    Self: Sized,
{
    /// Whether an ALTER statement failed because the column is already on the table
    fn is_duplicate_column(err: &<Self as Transaction>::Error) -> bool;

    fn add_column_query(table_name: &str, column: &Column) -> String {
        ADD_COLUMN_QUERY
            .replace("%TABLE_NAME%", &quote_identifier(table_name))
            .replace("%COLUMN_NAME%", &quote_identifier(column.name()))
            .replace("%COLUMN_TYPE%", column.sql_type())
    }

    fn table_info_query(table_name: &str) -> String {
        TABLE_INFO_QUERY.replace("%TABLE_NAME%", &quote_identifier(table_name))
    }

    fn get_table_info(&mut self, table_name: &str) -> Result<Vec<ColumnInfo>, Error> {
        self.query(Self::table_info_query(table_name).as_str())
            .patch_err("error querying table info", None)
    }

    fn ensure_columns(&mut self, columns: &[Column], table_name: &str) -> Result<Report, Error> {
        let queries: Vec<String> = columns
            .iter()
            .map(|column| Self::add_column_query(table_name, column))
            .collect();
        for query in queries.iter() {
            log::debug!("executing: {}", query);
        }
        let refs: Vec<&str> = queries.iter().map(AsRef::as_ref).collect();

        let results = self
            .execute_each(&refs)
            .patch_err("error applying column changes", None)?;
        let outcomes = classify_outcomes(columns, results, Self::is_duplicate_column);

        let schema = self
            .query(Self::table_info_query(table_name).as_str())
            .patch_err("error querying table info", Some(&outcomes))?;
        if schema.is_empty() {
            log::warn!("table {} has no columns, does it exist?", table_name);
        }

        Ok(Report::new(outcomes, schema))
    }
}
