//! access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を検証し、sub を user_id として AuthCtx に格納する
//! - 発行後に削除されたユーザーの token は拒否する (資格情報ストアで存在確認)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::user_repo;
use crate::state::AppState;

/// 認証が必要な Router に middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/notes", get(list_notes));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let user_id = match state.auth.verify(token) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::warn!(
                error = ?err,
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    // token は正しくても、発行後に削除されたユーザーは認証しない
    let user = user_repo::get(&state.db, user_id)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::Unauthorized)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user.id));

    Ok(next.run(req).await)
}
