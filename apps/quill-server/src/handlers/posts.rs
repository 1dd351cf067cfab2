//! Post handlers.

use actix_web::{HttpResponse, http::header, web};

use quill_core::domain::{Post, PostId, PostInput};
use quill_shared::ApiResponse;
use quill_shared::dto::{PostForm, PostListResponse, PostResponse, SearchParams, TokenParams};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Post body accepted as JSON or as an url-encoded form.
type PostPayload = web::Either<web::Json<PostForm>, web::Form<PostForm>>;

/// Token-only body for deletes.
type TokenPayload = web::Either<web::Json<TokenParams>, web::Form<TokenParams>>;

/// Authorize against the query token (or the body token), then require a body.
fn authorized_form(
    state: &AppState,
    params: &TokenParams,
    payload: Option<PostPayload>,
) -> AppResult<PostForm> {
    let form = payload.map(PostPayload::into_inner);
    let body_token = form.as_ref().and_then(|f| f.token.as_deref());
    state.gate.authorize(params.or_body(body_token).as_deref())?;

    form.ok_or_else(|| {
        AppError::BadRequest("Expected a JSON or form body with title and body".to_string())
    })
}

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/posts?q=
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> AppResult<HttpResponse> {
    let query = params
        .into_inner()
        .q
        .map(|q| q.trim().to_owned())
        .filter(|q| !q.is_empty());

    let posts = state.posts.list_posts(query.as_deref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostListResponse {
        count: posts.len(),
        posts: posts.into_iter().map(post_response).collect(),
        query,
    })))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/posts - requires editor token
pub async fn create_post(
    state: web::Data<AppState>,
    params: web::Query<TokenParams>,
    payload: Option<PostPayload>,
) -> AppResult<HttpResponse> {
    let form = authorized_form(&state, &params, payload)?;

    let post = state
        .posts
        .create_post(PostInput::new(form.title, form.body))
        .await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/posts/{}", post.id)))
        .json(ApiResponse::ok_with_message(post_response(post), "Post created.")))
}

/// PUT /api/posts/{id} - requires editor token
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    params: web::Query<TokenParams>,
    payload: Option<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = authorized_form(&state, &params, payload)?;

    let post = state
        .posts
        .update_post(id, PostInput::new(form.title, form.body))
        .await?;
    tracing::info!(post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post_response(post), "Post updated.")))
}

/// DELETE /api/posts/{id} - requires editor token
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    params: web::Query<TokenParams>,
    payload: Option<TokenPayload>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let body_token = payload.and_then(|p| p.into_inner().token);
    state
        .gate
        .authorize(params.or_body(body_token.as_deref()).as_deref())?;

    state.posts.delete_post(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(id, "Post deleted.")))
}
