use crate::patcher::{ColumnReport, Report};
use std::fmt;
use thiserror::Error as TError;

/// An Error occurred during a patch run
#[derive(Debug)]
pub struct Error {
    kind: Box<Kind>,
    report: Option<Report>,
}

impl Error {
    /// Instantiate a new Error
    pub(crate) fn new(kind: Kind, report: Option<Report>) -> Error {
        Error {
            kind: Box::new(kind),
            report,
        }
    }

    /// Return the Report of the patch run if any, it holds the outcome of every
    /// column attempted before the run failed
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Return the kind of error occurred
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

/// Enum listing possible fatal errors from colpatch.
///
/// Column level failures are not listed here, they are reported through
/// [`ColumnOutcome`](crate::ColumnOutcome) and never abort a run.
#[derive(Debug, TError)]
pub enum Kind {
    /// An Error from a column spec that isn't in the `name[:TYPE]` format
    #[error("invalid column spec `{0}`, expected name[:TYPE]")]
    InvalidColumnSpec(String),
    /// An Error parsing colpatch Config
    #[error("Error parsing config: {0}")]
    ConfigError(String),
    /// An Error from an underlying database connection Error
    #[error("`{0}`, `{1}`")]
    Connection(String, #[source] Box<dyn std::error::Error + Sync + Send>),
}

// Helper trait for adding custom messages and the column outcomes gathered so far to Connection error's.
pub trait WrapPatchError<T, E> {
    fn patch_err(self, msg: &str, outcomes: Option<&[ColumnReport]>) -> Result<T, Error>;
}

impl<T, E> WrapPatchError<T, E> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn patch_err(self, msg: &str, outcomes: Option<&[ColumnReport]>) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error {
                kind: Box::new(Kind::Connection(msg.into(), Box::new(err))),
                report: outcomes.map(|o| Report::new(o.to_vec(), Vec::new())),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Kind, WrapPatchError};
    use crate::{Column, ColumnOutcome, ColumnReport};
    use std::io;

    #[test]
    fn wraps_driver_error_as_connection() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "disk gone"));
        let err = res.patch_err("could not open database", None).unwrap_err();
        match err.kind() {
            Kind::Connection(msg, source) => {
                assert_eq!("could not open database", msg);
                assert_eq!("disk gone", source.to_string());
            }
            _ => panic!("test failed"),
        }
        assert!(err.report().is_none());
    }

    #[test]
    fn keeps_gathered_outcomes_on_report() {
        let outcomes = vec![ColumnReport::new(
            Column::new("name", "TEXT"),
            ColumnOutcome::Added,
        )];
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "locked"));
        let err = res
            .patch_err("error querying table info", Some(&outcomes))
            .unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(1, report.outcomes().len());
        assert!(report.schema().is_empty());
    }

    #[test]
    fn displays_kind() {
        let err = Error::new(Kind::InvalidColumnSpec("1abc".into()), None);
        assert_eq!(
            "invalid column spec `1abc`, expected name[:TYPE]",
            err.to_string()
        );
    }
}
