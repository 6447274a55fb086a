use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::{debug, info};

use crate::error::ReportError;

/// Upper bound on recent members in a report
pub const MAX_RECENT_LIMIT: u32 = 10;

/// Number of recent members shown when nothing else is configured
pub const DEFAULT_RECENT_LIMIT: u32 = MAX_RECENT_LIMIT;

/// One row of the gym_members table, limited to the reported columns
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
    pub name: Option<String>,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub last_payment_amount: Option<BigDecimal>,
    pub created_at: Option<NaiveDateTime>,
}

/// Outcome of a single report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    pub total_count: u64,
    pub recent_records: Vec<MemberRecord>,
}

impl ReportResult {
    pub fn new(total_count: u64, recent_records: Vec<MemberRecord>) -> Self {
        Self {
            total_count,
            recent_records,
        }
    }

    /// Checks the size bound and the newest-first ordering (missing timestamps last).
    pub fn is_consistent(&self) -> bool {
        let bound = self.total_count.min(u64::from(MAX_RECENT_LIMIT));
        if self.recent_records.len() as u64 > bound {
            return false;
        }

        self.recent_records
            .windows(2)
            .all(|pair| match (pair[0].created_at, pair[1].created_at) {
                (Some(a), Some(b)) => a >= b,
                (Some(_), None) | (None, None) => true,
                (None, Some(_)) => false,
            })
    }
}

/// Configuration for a report run
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub recent_limit: u32,
}

impl Config {
    pub fn new(database_url: impl Into<String>) -> Result<Self, ReportError> {
        let database_url = database_url.into();
        let trimmed = database_url.trim();

        if trimmed.is_empty() {
            return Err(ReportError::Configuration("DATABASE_URL is empty".to_string()));
        }
        if !(trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://")) {
            return Err(ReportError::Configuration(
                "DATABASE_URL must start with postgres:// or postgresql://".to_string(),
            ));
        }

        Ok(Self {
            database_url: trimmed.to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        })
    }

    /// Capped at [`MAX_RECENT_LIMIT`].
    pub fn with_recent_limit(mut self, limit: u32) -> Self {
        self.recent_limit = limit.min(MAX_RECENT_LIMIT);
        self
    }

    pub fn from_env() -> Result<Self, ReportError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ReportError::Configuration("DATABASE_URL not set".to_string()))?;

        let config = Self::new(database_url)?;

        match std::env::var("MEMBER_REPORT_LIMIT") {
            Ok(raw) => Ok(config.with_recent_limit(parse_limit(&raw)?)),
            Err(_) => Ok(config),
        }
    }
}

fn parse_limit(raw: &str) -> Result<u32, ReportError> {
    match raw.trim().parse::<u32>() {
        Ok(limit) if (1..=MAX_RECENT_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ReportError::Configuration(format!(
            "MEMBER_REPORT_LIMIT must be between 1 and {}, got '{}'",
            MAX_RECENT_LIMIT, raw
        ))),
    }
}

/// Load a dotenv file into the process environment.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    dotenvy::from_path(path).map_err(|e| {
        ReportError::Configuration(format!(
            "failed to load env file {}: {}",
            path.display(),
            e
        ))
    })?;
    info!("📄 Loaded environment from {}", path.display());
    Ok(())
}

/// Load `MEMBER_REPORT_ENV_FILE` if set, otherwise a `.env` in the working directory when present.
pub fn load_env() -> Result<(), ReportError> {
    if let Ok(path) = std::env::var("MEMBER_REPORT_ENV_FILE") {
        return load_env_file(path);
    }

    match dotenvy::dotenv() {
        Ok(path) => info!("📄 Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found, using process environment"),
        Err(e) => {
            return Err(ReportError::Configuration(format!(
                "failed to load .env: {}",
                e
            )));
        }
    }
    Ok(())
}
