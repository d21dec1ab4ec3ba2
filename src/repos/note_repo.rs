/*
 * Responsibility
 * - notes CRUD
 * - "userId" の FK (CASCADE) 前提で削除挙動を意識
 * - 一覧は所有者のもののみ返す。単体取得は handler 側で所有者判定する
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NoteRow {
    #[sqlx(rename = "noteId")]
    pub note_id: i64,

    pub title: String,
    pub content: String,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<NoteRow>, RepoError> {
    let rows = sqlx::query_as::<_, NoteRow>(
        r#"
        SELECT
            "noteId", title, content, "userId", "createdAt", "updatedAt"
        FROM notes
        WHERE "userId" = $1
        ORDER BY "noteId" DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    content: &str,
    owner_id: Uuid,
) -> Result<NoteRow, RepoError> {
    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        INSERT INTO notes (title, content, "userId")
        VALUES ($1, $2, $3)
        RETURNING
            "noteId", title, content, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(pool: &PgPool, note_id: i64) -> Result<Option<NoteRow>, RepoError> {
    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        SELECT
            "noteId", title, content, "userId", "createdAt", "updatedAt"
        FROM notes
        WHERE "noteId" = $1
        "#,
    )
    .bind(note_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    note_id: i64,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<NoteRow>, RepoError> {
    let row = sqlx::query_as::<_, NoteRow>(
        r#"
        UPDATE notes
        SET
            title = COALESCE($2, title),
            content = COALESCE($3, content)
        WHERE "noteId" = $1
        RETURNING
            "noteId", title, content, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(note_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, note_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM notes
        WHERE "noteId" = $1
        "#,
    )
    .bind(note_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
