//! SQLite-backed registration store.

use super::RegistrationStore;
use crate::error::StoreError;
use crate::types::{NewRegistration, Registration};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info, instrument};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    company_name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    mobile_number TEXT NOT NULL,
    office_phone TEXT,
    email TEXT NOT NULL UNIQUE,
    website TEXT,
    office_address TEXT NOT NULL,
    country TEXT NOT NULL,
    industry TEXT NOT NULL,
    source_event TEXT NOT NULL,
    follow_up_date TEXT,
    follow_up BOOLEAN NOT NULL DEFAULT 0,
    comment TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const INSERT_REGISTRATION: &str = r#"
INSERT INTO registrations (
    id, name, company_name, job_title, mobile_number, office_phone, email, website,
    office_address, country, industry, source_event, follow_up_date, follow_up, comment,
    created_at, updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Registration store over a pooled SQLite database.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and ensure the schema exists.
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TABLE).execute(&pool).await?;

        info!(max_connections, "SQLite registration store ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RegistrationStore for SqliteStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError> {
        let row = sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    #[instrument(skip(self, new), fields(email = %new.email))]
    async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError> {
        let r = new.into_registration(Utc::now());

        sqlx::query(INSERT_REGISTRATION)
            .bind(&r.id)
            .bind(&r.name)
            .bind(&r.company_name)
            .bind(&r.job_title)
            .bind(&r.mobile_number)
            .bind(&r.office_phone)
            .bind(&r.email)
            .bind(&r.website)
            .bind(&r.office_address)
            .bind(&r.country)
            .bind(&r.industry)
            .bind(&r.source_event)
            .bind(&r.follow_up_date)
            .bind(r.follow_up)
            .bind(&r.comment)
            .bind(r.created_at)
            .bind(r.updated_at)
            .execute(&self.pool)
            .await?;

        debug!(id = %r.id, "Inserted registration");
        Ok(r)
    }

    #[instrument(skip(self))]
    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError> {
        let rows = sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("SQLite registration store closed");
    }
}
