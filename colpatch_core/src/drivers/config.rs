use crate::config::Config;
use crate::traits::sync::{Query, Transaction};
use crate::ColumnInfo;
use std::convert::Infallible;

#[cfg(feature = "rusqlite")]
use crate::config::ConfigDbType;
#[cfg(feature = "rusqlite")]
use crate::error::Kind;
#[cfg(feature = "rusqlite")]
use crate::{Column, Error, Report};

// we impl all the dependent traits as noop's and then override the methods that call them on Patch
impl Transaction for Config {
    type Error = Infallible;

    fn execute_each(
        &mut self,
        _queries: &[&str],
    ) -> Result<Vec<Result<(), Self::Error>>, Self::Error> {
        Ok(Vec::new())
    }
}

impl Query<Vec<ColumnInfo>> for Config {
    fn query(&mut self, _query: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
        Ok(Vec::new())
    }
}

// this is written as macro so that we don't have to deal with type signatures
#[cfg(feature = "rusqlite")]
macro_rules! with_connection {
    ($config:ident, $op: expr) => {
        match $config.db_type() {
            ConfigDbType::Sqlite => {
                // an empty path would make sqlite open a private temporary database
                let path = $config.db_path().ok_or_else(|| {
                    Error::new(
                        Kind::ConfigError("field path must be present for Sqlite database type".into()),
                        None,
                    )
                })?;
                let conn = crate::drivers::rusqlite::open(path)?;
                $op(conn)
            }
        }
    };
}

// rewrite all the default methods as we overrode Transaction and Query
#[cfg(feature = "rusqlite")]
impl crate::Patch for Config {
    fn is_duplicate_column(err: &Infallible) -> bool {
        match *err {}
    }

    fn get_table_info(&mut self, table_name: &str) -> Result<Vec<ColumnInfo>, Error> {
        with_connection!(self, |mut conn| {
            crate::Patch::get_table_info(&mut conn, table_name)
        })
    }

    fn ensure_columns(&mut self, columns: &[Column], table_name: &str) -> Result<Report, Error> {
        with_connection!(self, |mut conn| {
            crate::Patch::ensure_columns(&mut conn, columns, table_name)
        })
    }
}
