//! Post resource handlers - create, list/search, get, update, delete.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters for list/search.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub term: Option<String>,
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /posts/
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    };

    let post = state.posts.insert(draft).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// GET /posts/
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.term.as_deref()).await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        content: req.content,
        category: req.category,
        tags: req.tags,
    };

    let post = state
        .posts
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{id}
///
/// Deleting an absent id is a success no-op, keeping deletes idempotent.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state.posts.delete(id).await?;
    if !removed {
        tracing::debug!(post_id = id, "Delete of absent post treated as no-op");
    }

    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use serde_json::json;

    use quill_infra::InMemoryPostRepository;
    use quill_shared::ErrorResponse;
    use quill_shared::dto::PostResponse;

    use crate::middleware::error::json_config;
    use crate::state::AppState;

    macro_rules! init_app {
        () => {{
            let state = AppState::with_repository(Arc::new(InMemoryPostRepository::new()));
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .app_data(json_config())
                    .configure(crate::handlers::configure_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn create_assigns_id_and_equal_timestamps() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({"title": "A", "content": "B", "category": "C"}))
            .to_request();
        let created: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(created.id, 1);
        assert!(created.tags.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let req = test::TestRequest::get().uri("/posts/1").to_request();
        let fetched: PostResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "A");
        assert_eq!(fetched.content, "B");
        assert_eq!(fetched.category, "C");
    }

    #[actix_web::test]
    async fn create_rejects_missing_required_field() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({"content": "B", "category": "C"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 422);
    }

    #[actix_web::test]
    async fn create_rejects_non_string_tag_elements() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({
                "title": "A", "content": "B", "category": "C",
                "tags": ["ok", 5]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 422);
    }

    #[actix_web::test]
    async fn update_is_partial_and_absent_id_is_404() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({"title": "A", "content": "B", "category": "C"}))
            .to_request();
        let created: PostResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/posts/1")
            .set_json(json!({"title": "A2"}))
            .to_request();
        let updated: PostResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(updated.title, "A2");
        assert_eq!(updated.content, "B");
        assert_eq!(updated.category, "C");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let req = test::TestRequest::patch()
            .uri("/posts/999")
            .set_json(json!({"title": "nope"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.status, 404);
        assert_eq!(body.detail.as_deref(), Some("Post not found"));
    }

    #[actix_web::test]
    async fn get_absent_id_is_404() {
        let app = init_app!();

        let req = test::TestRequest::get().uri("/posts/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn delete_is_idempotent() {
        let app = init_app!();

        let req = test::TestRequest::post()
            .uri("/posts/")
            .set_json(json!({"title": "A", "content": "B", "category": "C"}))
            .to_request();
        let _: PostResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::delete().uri("/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        // Second delete of the same id is a no-op, still a success.
        let req = test::TestRequest::delete().uri("/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let req = test::TestRequest::get().uri("/posts/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }

    #[actix_web::test]
    async fn list_filters_by_term() {
        let app = init_app!();

        for body in [
            json!({"title": "Hello World", "content": "foo", "category": "bar"}),
            json!({"title": "Other", "content": "body", "category": "misc"}),
        ] {
            let req = test::TestRequest::post()
                .uri("/posts/")
                .set_json(body)
                .to_request();
            let _: PostResponse = test::call_and_read_body_json(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/posts/").to_request();
        let all: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);

        let req = test::TestRequest::get()
            .uri("/posts/?term=hello")
            .to_request();
        let hits: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Hello World");

        let req = test::TestRequest::get().uri("/posts/?term=zzz").to_request();
        let none: Vec<PostResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(none.is_empty());
    }
}
