//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;

/// Embedded schema migrations creating `url_mappings` and its unique constraints.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness of `short_url_path` and `long_url` is enforced by table
/// constraints; visit counting is a single atomic `UPDATE`.
pub struct PgUrlMappingRepository {
    pool: Arc<PgPool>,
}

impl PgUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMappingRepository for PgUrlMappingRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        MIGRATOR.run(self.pool.as_ref()).await.map_err(|e| {
            AppError::internal(format!("Failed to apply migrations: {e}"), json!({}))
        })
    }

    async fn find_long_url_by_path(
        &self,
        short_url_path: &str,
    ) -> Result<Option<String>, AppError> {
        let long_url = sqlx::query_scalar::<_, String>(
            "SELECT long_url FROM url_mappings WHERE short_url_path = $1",
        )
        .bind(short_url_path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(long_url)
    }

    async fn find_path_by_long_url(&self, long_url: &str) -> Result<Option<String>, AppError> {
        let path = sqlx::query_scalar::<_, String>(
            "SELECT short_url_path FROM url_mappings WHERE long_url = $1",
        )
        .bind(long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(path)
    }

    async fn find_visits_by_path(&self, short_url_path: &str) -> Result<Option<i64>, AppError> {
        let visits = sqlx::query_scalar::<_, i64>(
            "SELECT visits FROM url_mappings WHERE short_url_path = $1",
        )
        .bind(short_url_path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(visits)
    }

    async fn find_by_path(&self, short_url_path: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT short_url_path, long_url, visits
            FROM url_mappings
            WHERE short_url_path = $1
            "#,
        )
        .bind(short_url_path)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(path, long_url, visits)| UrlMapping::new(path, long_url, visits)))
    }

    async fn path_exists(&self, short_url_path: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM url_mappings WHERE short_url_path = $1)",
        )
        .bind(short_url_path)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert_mapping(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let (path, long_url, visits) = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            INSERT INTO url_mappings (short_url_path, long_url)
            VALUES ($1, $2)
            RETURNING short_url_path, long_url, visits
            "#,
        )
        .bind(&new_mapping.short_url_path)
        .bind(&new_mapping.long_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlMapping::new(path, long_url, visits))
    }

    async fn increment_visits(&self, short_url_path: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE url_mappings SET visits = visits + 1 WHERE short_url_path = $1")
                .bind(short_url_path)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
