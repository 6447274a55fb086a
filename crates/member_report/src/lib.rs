pub mod database;
pub mod error;
pub mod render;
pub mod reporter;
pub mod types;

pub use database::{Database, MemberStore};
pub use error::{ErrorKind, ReportError};
pub use render::{format_amount, format_timestamp, render};
pub use reporter::{VerificationReporter, run, run_with};
pub use types::{
    Config, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT, MemberRecord, ReportResult, load_env,
    load_env_file,
};
