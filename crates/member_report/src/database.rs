use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::{PgPool, Row};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::types::{Config, MemberRecord};

/// Read-only access to the member table
#[async_trait]
pub trait MemberStore {
    /// Total number of rows at query time
    async fn count_records(&self) -> Result<u64, ReportError>;

    /// At most `limit` members, newest first
    async fn fetch_recent_records(&self, limit: u32) -> Result<Vec<MemberRecord>, ReportError>;

    /// Release the underlying session; later queries fail
    async fn close(&self);
}

/// Single scoped Postgres session used for one report run
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a TLS connection to the database named in `config`.
    pub async fn connect(config: &Config) -> Result<Self, ReportError> {
        let options = PgConnectOptions::from_str(&config.database_url)
            .map_err(|e| {
                ReportError::Configuration(format!("malformed DATABASE_URL: {}", e))
            })?
            .ssl_mode(PgSslMode::Require);

        debug!("🔌 Connecting to {}:{}", options.get_host(), options.get_port());

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| match ReportError::from_sqlx(e) {
                ReportError::Query(e) => ReportError::Connection(e),
                other => other,
            })?;

        info!("✅ Database connection established");
        Ok(Self { pool })
    }
}

fn member_from_row(row: &PgRow) -> Result<MemberRecord, sqlx::Error> {
    Ok(MemberRecord {
        name: row.try_get::<Option<String>, _>("name")?,
        plan: row.try_get::<Option<String>, _>("plan")?,
        status: row.try_get::<Option<String>, _>("status")?,
        last_payment_amount: row.try_get::<Option<BigDecimal>, _>("last_payment_amount")?,
        created_at: row.try_get::<Option<NaiveDateTime>, _>("created_at")?,
    })
}

#[async_trait]
impl MemberStore for Database {
    async fn count_records(&self) -> Result<u64, ReportError> {
        debug!("🔍 Counting gym members");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM gym_members")
            .fetch_one(&self.pool)
            .await
            .map_err(ReportError::from_sqlx)?;

        info!("📊 Total members: {}", count);
        Ok(count.max(0) as u64)
    }

    async fn fetch_recent_records(&self, limit: u32) -> Result<Vec<MemberRecord>, ReportError> {
        debug!("🔍 Fetching {} most recent gym members", limit);

        let rows = sqlx::query(
            r#"
            SELECT
                name,
                plan,
                status,
                last_payment_amount,
                created_at
            FROM gym_members
            ORDER BY created_at DESC NULLS LAST
            LIMIT $1
            "#
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(ReportError::from_sqlx)?;

        let members = rows
            .iter()
            .map(member_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ReportError::Query)?;

        info!("✅ Fetched {} members", members.len());
        Ok(members)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("🔒 Database connection closed");
    }
}
