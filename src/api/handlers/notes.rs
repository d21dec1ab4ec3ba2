/*
 * Responsibility
 * - /api/notes 系 CRUD handler
 * - Path の id は公開 ID → extractor で復号して内部 ID として受け取る
 * - 取得してから所有者判定して read/update/delete する (create は常に自分が所有者)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::dto::notes::{CreateNoteRequest, NoteDeletedResponse, NoteResponse, UpdateNoteRequest},
    api::extractors::{AuthCtxExtractor, PublicNoteId},
    error::AppError,
    repos::note_repo,
    services::ownership,
    state::AppState,
};

fn row_to_response(state: &AppState, row: note_repo::NoteRow) -> Result<NoteResponse, AppError> {
    let public_id = state.id_codec.encode(row.note_id)?;

    Ok(NoteResponse {
        id: public_id,
        title: row.title,
        content: row.content,
        user_id: row.user_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_notes(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let rows = note_repo::list_by_owner(&state.db, auth.user_id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_note(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), AppError> {
    req.validate().map_err(AppError::Validation)?;

    let row = note_repo::create(&state.db, &req.title, &req.content, auth.user_id).await?;

    Ok((StatusCode::CREATED, Json(row_to_response(&state, row)?)))
}

pub async fn get_note(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    note_id: PublicNoteId,
) -> Result<Json<NoteResponse>, AppError> {
    let row = note_repo::get(&state.db, note_id.id)
        .await?
        .ok_or(AppError::NotFound { resource: "note" })?;

    ownership::ensure_owner(row.user_id, auth.user_id)?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_note(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    note_id: PublicNoteId,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<NoteResponse>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let row = note_repo::get(&state.db, note_id.id)
        .await?
        .ok_or(AppError::NotFound { resource: "note" })?;

    // 所有者判定を通ってから書き込む
    ownership::ensure_owner(row.user_id, auth.user_id)?;

    let row = note_repo::update(
        &state.db,
        note_id.id,
        req.title.as_deref(),
        req.content.as_deref(),
    )
    .await?
    .ok_or(AppError::NotFound { resource: "note" })?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_note(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    note_id: PublicNoteId,
) -> Result<Json<NoteDeletedResponse>, AppError> {
    let row = note_repo::get(&state.db, note_id.id)
        .await?
        .ok_or(AppError::NotFound { resource: "note" })?;

    ownership::ensure_owner(row.user_id, auth.user_id)?;

    let deleted = note_repo::delete(&state.db, note_id.id).await?;
    if !deleted {
        return Err(AppError::NotFound { resource: "note" });
    }

    Ok(Json(NoteDeletedResponse {
        message: "note deleted",
    }))
}
