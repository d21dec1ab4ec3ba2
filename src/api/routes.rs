/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - Bearer が必要な範囲 (profile, notes) に middleware を適用する
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{
    auth::{forgot_password, login, profile, reset_password, signup},
    notes::{create_note, delete_note, get_note, list_notes, update_note},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password/{secret}", post(reset_password));

    let protected = Router::new()
        .route("/auth/profile", get(profile))
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{note_id}",
            get(get_note).put(update_note).delete(delete_note),
        );
    let protected = middleware::auth::access::apply(protected, state);

    public.merge(protected)
}
