/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (資格情報ストア)
 * - email は小文字で保存し、小文字化して検索する
 * - reset token はダイジェストのみ保存する ("resetTokenHash" BYTEA)
 *
 * 想定スキーマ:
 *   users."userId"              uuid PK DEFAULT gen_random_uuid()
 *   users.name                  text NOT NULL
 *   users.email                 text NOT NULL UNIQUE
 *   users."passwordHash"        text NOT NULL
 *   users."resetTokenHash"      bytea NULL
 *   users."resetTokenExpiresAt" timestamptz NULL
 *   users."createdAt"           timestamptz NOT NULL DEFAULT now()
 *   users."updatedAt"           timestamptz NOT NULL DEFAULT now()  -- trigger 更新
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,

    pub name: String,
    pub email: String,

    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,

    #[sqlx(rename = "resetTokenHash")]
    pub reset_token_hash: Option<Vec<u8>>,

    #[sqlx(rename = "resetTokenExpiresAt")]
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT
            "userId", name, email, "passwordHash",
            "resetTokenHash", "resetTokenExpiresAt", "createdAt", "updatedAt"
        FROM users
        WHERE email = LOWER($1)
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (name, email, "passwordHash")
        VALUES ($1, LOWER($2), $3)
        RETURNING
            "userId", name, email, "passwordHash",
            "resetTokenHash", "resetTokenExpiresAt", "createdAt", "updatedAt"
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT
            "userId", name, email, "passwordHash",
            "resetTokenHash", "resetTokenExpiresAt", "createdAt", "updatedAt"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// forgot-password: ダイジェストと有効期限を両方セットする。
pub async fn set_reset_token(
    pool: &PgPool,
    user_id: Uuid,
    token_hash: &[u8],
    expires_at: DateTime<Utc>,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET "resetTokenHash" = $2,
            "resetTokenExpiresAt" = $3
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Fetch a user by reset-token digest; expired tokens are treated as not-found.
pub async fn find_by_reset_token_hash(
    pool: &PgPool,
    token_hash: &[u8],
    now: DateTime<Utc>,
) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT
            "userId", name, email, "passwordHash",
            "resetTokenHash", "resetTokenExpiresAt", "createdAt", "updatedAt"
        FROM users
        WHERE "resetTokenHash" = $1
            AND "resetTokenExpiresAt" > $2
        LIMIT 1
        "#,
    )
    .bind(token_hash)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Set the new password hash and clear both reset fields in one statement.
///
/// 条件付き UPDATE: ダイジェストが一致し、かつ期限内の間だけ成功する。
/// 同じシークレットの並行リクエストはどちらか一方だけが rows_affected = 1 になる。
pub async fn consume_reset_token(
    pool: &PgPool,
    user_id: Uuid,
    token_hash: &[u8],
    new_password_hash: &str,
    now: DateTime<Utc>,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET "passwordHash" = $3,
            "resetTokenHash" = NULL,
            "resetTokenExpiresAt" = NULL
        WHERE "userId" = $1
            AND "resetTokenHash" = $2
            AND "resetTokenExpiresAt" > $4
        "#,
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(new_password_hash)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
