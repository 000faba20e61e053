use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::RefreshSession;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::RefreshSessionRepository;

pub struct PostgresRefreshSessionRepository {
    pool: PgPool,
}

impl PostgresRefreshSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> AuthError {
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl RefreshSessionRepository for PostgresRefreshSessionRepository {
    async fn create(&self, session: RefreshSession) -> Result<(), AuthError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(session.user_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.user_id.as_i64())
        .bind(&session.token)
        .bind(session.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }

    async fn consume(&self, token: &str) -> Result<Option<RefreshSession>, AuthError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Row lock so two concurrent refreshes cannot both consume the token.
        let row = sqlx::query(
            r#"
            SELECT user_id, token, expires_at
            FROM refresh_tokens
            WHERE token = $1
            FOR UPDATE
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session = RefreshSession {
            user_id: UserId::new(row.get("user_id"))?,
            token: row.get("token"),
            expires_at: row.get("expires_at"),
        };

        sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(session.user_id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(Some(session))
    }
}
