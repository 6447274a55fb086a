use thiserror::Error;

/// Failure categories surfaced by a report run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Connection,
    Query,
    Formatting,
}

/// Errors raised while loading configuration, talking to Postgres or writing the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
    #[error("could not write report: {0}")]
    Formatting(String),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Configuration(_) => ErrorKind::Configuration,
            ReportError::Connection(_) => ErrorKind::Connection,
            ReportError::Query(_) => ErrorKind::Query,
            ReportError::Formatting(_) => ErrorKind::Formatting,
        }
    }

    /// Sort a driver error into a connection or query failure.
    ///
    /// A missing table is reported as a connection failure: the report cannot
    /// reach its data at all, as opposed to asking for columns that don't exist.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Configuration(e) => ReportError::Configuration(e.to_string()),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => ReportError::Connection(err),
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
                if is_connection_sqlstate(&code) {
                    ReportError::Connection(err)
                } else {
                    ReportError::Query(err)
                }
            }
            _ => ReportError::Query(err),
        }
    }
}

/// SQLSTATE codes that mean the report's data is unreachable rather than mis-queried
fn is_connection_sqlstate(code: &str) -> bool {
    // 08: connection exception, 28: invalid authorization, 3D: invalid catalog name
    code.starts_with("08") || code.starts_with("28") || code.starts_with("3D") || code == "42P01"
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Formatting(err.to_string())
    }
}
