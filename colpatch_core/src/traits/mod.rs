pub mod sync;

use crate::{Column, ColumnOutcome, ColumnReport};

pub(crate) const ADD_COLUMN_QUERY: &str =
    "ALTER TABLE %TABLE_NAME% ADD COLUMN %COLUMN_NAME% %COLUMN_TYPE%;";

pub(crate) const TABLE_INFO_QUERY: &str = "PRAGMA table_info(%TABLE_NAME%);";

// wraps an identifier in double quotes, doubling the ones it contains
pub(crate) fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

// pairs every requested column with the result of its ALTER statement, logging each one.
// statement errors are turned into outcomes, they never abort the patch run
pub(crate) fn classify_outcomes<E, F>(
    columns: &[Column],
    results: Vec<Result<(), E>>,
    is_duplicate_column: F,
) -> Vec<ColumnReport>
where
    E: std::error::Error,
    F: Fn(&E) -> bool,
{
    columns
        .iter()
        .zip(results)
        .map(|(column, result)| {
            let outcome = match result {
                Ok(()) => {
                    log::info!("added column {}", column);
                    ColumnOutcome::Added
                }
                Err(err) if is_duplicate_column(&err) => {
                    log::info!("column {} already exists, {}", column.name(), err);
                    ColumnOutcome::AlreadyExists(err.to_string())
                }
                Err(err) => {
                    log::warn!("could not add column {}, {}", column.name(), err);
                    ColumnOutcome::Rejected(err.to_string())
                }
            };
            ColumnReport::new(column.clone(), outcome)
        })
        .collect()
}
