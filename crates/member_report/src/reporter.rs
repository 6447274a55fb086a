use std::io::Write;
use tracing::{info, warn};

use crate::database::{Database, MemberStore};
use crate::error::ReportError;
use crate::render::render;
use crate::types::{Config, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT, MemberRecord, ReportResult};

/// Builds the member report from any [`MemberStore`]
pub struct VerificationReporter<S> {
    store: S,
    limit: u32,
}

impl<S: MemberStore> VerificationReporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Capped at [`MAX_RECENT_LIMIT`].
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_RECENT_LIMIT);
        self
    }

    pub async fn count_records(&self) -> Result<u64, ReportError> {
        self.store.count_records().await
    }

    pub async fn fetch_recent_records(
        &self,
        limit: u32,
    ) -> Result<Vec<MemberRecord>, ReportError> {
        let mut records = self.store.fetch_recent_records(limit).await?;
        records.truncate(limit as usize);
        Ok(records)
    }

    /// Count and list; both must succeed before anything is rendered.
    pub async fn build_report(&self) -> Result<ReportResult, ReportError> {
        let total_count = self.count_records().await?;
        let recent_records = self.fetch_recent_records(self.limit).await?;

        let report = ReportResult::new(total_count, recent_records);
        if !report.is_consistent() {
            // count and list are separate statements; concurrent writes can skew them
            warn!("⚠️ Member count and recent list disagree, table changed during the run");
        }
        Ok(report)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

/// One report run: connect, query, release the connection, then write the report to `out`.
pub async fn run(config: &Config, out: &mut impl Write) -> Result<(), ReportError> {
    info!("🚀 Starting member verification report");

    let database = Database::connect(config).await?;
    run_with(database, config.recent_limit, out).await
}

/// Build the report from an open store, close it on every path, then render.
pub async fn run_with<S: MemberStore>(
    store: S,
    limit: u32,
    out: &mut impl Write,
) -> Result<(), ReportError> {
    let reporter = VerificationReporter::new(store).with_limit(limit);

    let outcome = reporter.build_report().await;
    reporter.store.close().await;

    let report = outcome?;
    render(&report, out)?;

    info!(
        "✨ Report complete: {} members, {} shown",
        report.total_count,
        report.recent_records.len()
    );
    Ok(())
}
