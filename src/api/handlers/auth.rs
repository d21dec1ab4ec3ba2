/*
 * Responsibility
 * - /api/auth 系 handler (signup/login/profile/forgot/reset)
 * - DTO validation → repo/service 呼び出し → response DTO
 * - 資格情報の失敗は「email と password のどちらが悪いか」を漏らさない
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    api::dto::auth::{
        AuthResponse, ForgotPasswordRequest, LoginRequest, PasswordResetResponse,
        ResetPasswordRequest, ResetTokenResponse, SignupRequest, UserResponse,
    },
    api::extractors::AuthCtxExtractor,
    error::AppError,
    repos::user_repo,
    services::auth::{password, reset_token},
    state::AppState,
};

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate().map_err(AppError::Validation)?;

    let email = req.normalized_email();

    // 先に存在確認。競合して INSERT がすり抜けても unique index が 23505 で拾う
    if user_repo::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = password::Password::Plain(req.password)
        .into_hash()
        .map_err(AppError::internal)?;

    let user = user_repo::create(&state.db, req.name.trim(), &email, &password_hash).await?;
    let token = state.auth.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = user_repo::find_by_email(&state.db, &req.normalized_email())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth.issue(user.id)?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    // middleware 通過後に消えたユーザーは 401 扱い
    let user = user_repo::get(&state.db, auth.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<ResetTokenResponse>, AppError> {
    let user = user_repo::find_by_email(&state.db, &req.normalized_email())
        .await?
        .ok_or(AppError::NotFound { resource: "user" })?;

    let generated = reset_token::generate();

    user_repo::set_reset_token(
        &state.db,
        user.id,
        &generated.secret_hash,
        generated.expires_at,
    )
    .await?;

    // メール配信は持たないため、シークレットをそのまま返す
    Ok(Json(ResetTokenResponse {
        message: "password reset token generated",
        reset_token: generated.secret,
    }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(secret): Path<String>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<PasswordResetResponse>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let secret_hash = reset_token::hash_secret(&secret);
    let now = Utc::now();

    let user = user_repo::find_by_reset_token_hash(&state.db, &secret_hash, now)
        .await?
        .ok_or(AppError::InvalidOrExpiredToken)?;

    let new_password_hash = password::Password::Plain(req.password)
        .into_hash()
        .map_err(AppError::internal)?;

    // 条件付き UPDATE。同じシークレットの並行リクエストはここで一方だけが勝つ
    let consumed = user_repo::consume_reset_token(
        &state.db,
        user.id,
        &secret_hash,
        &new_password_hash,
        now,
    )
    .await?;

    if !consumed {
        return Err(AppError::InvalidOrExpiredToken);
    }

    let token = state.auth.issue(user.id)?;

    Ok(Json(PasswordResetResponse {
        message: "password reset successful",
        token,
    }))
}
