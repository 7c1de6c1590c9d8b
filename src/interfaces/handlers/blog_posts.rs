use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::blog_post::{NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    use_cases::extractors::AdminSession,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[instrument(skip(_admin, state, data))]
pub async fn create_blog_post(
    _admin: AdminSession,
    state: web::Data<AppState>,
    data: web::Json<NewBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.blog_handler
        .create_blog_post(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn get_all_blog_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(10);

    let posts = state.blog_handler.get_blog_posts(page, per_page).await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(state))]
pub async fn get_blog_post_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.blog_handler.get_blog_post_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(post.to_detail()))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_blog_post(
    _admin: AdminSession,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let updated_post = state.blog_handler
        .update_blog_post(&post_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated_post))
}

#[instrument(skip(_admin, state))]
pub async fn delete_blog_post(
    _admin: AdminSession,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.blog_handler.delete_blog_post(&post_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
