use actix_web::{http::header::ContentType, web, HttpResponse};
use askama::Template;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::{
        blog_post::{BlogPostDetail, BlogPostSummary},
        directory::{DirectoryType, SubmissionDifficulty},
        launch_week::LaunchWeekResponse,
        session::Session,
    },
    errors::AppError,
    use_cases::{
        directories::DirectoryFilter,
        extractors::{AdminSession, CurrentSession, MaybeSession},
        launch_weeks::LaunchWeekHandler,
    },
    AppState,
};

const BLOG_PAGE_SIZE: u32 = 20;

fn render<T: Template>(template: &T) -> Result<HttpResponse, AppError> {
    let html = template.render()?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Name shown in the navigation bar.
fn display_name(session: Option<&Session>) -> Option<String> {
    session.map(|s| {
        s.name
            .clone()
            .or_else(|| s.email.clone())
            .unwrap_or_else(|| s.id.clone())
    })
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
}

#[instrument(skip(session, state))]
pub async fn home(session: MaybeSession, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(&HomeTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(session.0.as_ref()),
        is_admin: session.0.as_ref().is_some_and(Session::is_admin),
    })
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    signin_url: String,
    callback_url: String,
}

#[instrument(skip(state))]
pub async fn login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(&LoginTemplate {
        site_name: state.config.name.clone(),
        user_name: None,
        is_admin: false,
        signin_url: state.config.auth_signin_url.clone(),
        callback_url: state.config.login_redirect.clone(),
    })
}

#[derive(Template)]
#[template(path = "tos.html")]
struct TermsTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
}

pub async fn terms_of_service(session: MaybeSession, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(&TermsTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(session.0.as_ref()),
        is_admin: session.0.as_ref().is_some_and(Session::is_admin),
    })
}

#[derive(Template)]
#[template(path = "privacy.html")]
struct PrivacyTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
}

pub async fn privacy_policy(session: MaybeSession, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    render(&PrivacyTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(session.0.as_ref()),
        is_admin: session.0.as_ref().is_some_and(Session::is_admin),
    })
}

#[derive(Template)]
#[template(path = "launch.html")]
struct LaunchTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    weeks: Vec<LaunchWeekResponse>,
    payments_enabled: bool,
}

#[instrument(skip(session, state), fields(user = %session.0.id))]
pub async fn launch(session: CurrentSession, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let today = LaunchWeekHandler::today();
    let weeks = state.launch_week_handler
        .list_launch_weeks()
        .await?
        .iter()
        .map(|week| week.to_response(today))
        .collect();

    render(&LaunchTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(Some(&session.0)),
        is_admin: session.0.is_admin(),
        weeks,
        payments_enabled: state.config.payments_enabled(),
    })
}

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub tag: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Template)]
#[template(path = "directories.html")]
struct DirectoriesTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    cards: Vec<DirectoryType>,
    tag: Option<String>,
    difficulty: String,
}

#[instrument(skip(session, state))]
pub async fn directories(
    session: CurrentSession,
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let difficulty = match query.difficulty.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => Some(raw.parse::<SubmissionDifficulty>().map_err(AppError::InvalidInput)?),
        None => None,
    };
    let filter = DirectoryFilter {
        tag: query.tag.filter(|t| !t.trim().is_empty()),
        difficulty,
    };

    let cards = state.directory_handler.directory_cards(&filter).await?;

    render(&DirectoriesTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(Some(&session.0)),
        is_admin: session.0.is_admin(),
        cards,
        difficulty: filter.difficulty
            .map(|d| d.to_string().to_ascii_lowercase())
            .unwrap_or_default(),
        tag: filter.tag,
    })
}

#[derive(Debug, Deserialize)]
pub struct BlogIndexQuery {
    pub page: Option<u32>,
}

#[derive(Template)]
#[template(path = "blog_index.html")]
struct BlogIndexTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    posts: Vec<BlogPostSummary>,
    page: u32,
    has_next: bool,
}

#[instrument(skip(session, state))]
pub async fn blog_index(
    session: CurrentSession,
    state: web::Data<AppState>,
    query: web::Query<BlogIndexQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state.blog_handler
        .get_blog_posts(query.page.unwrap_or(1), BLOG_PAGE_SIZE)
        .await?;
    let has_next = i64::from(page.page) * i64::from(page.per_page) < page.total;

    render(&BlogIndexTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(Some(&session.0)),
        is_admin: session.0.is_admin(),
        posts: page.posts,
        page: page.page,
        has_next,
    })
}

#[derive(Template)]
#[template(path = "blog_post.html")]
struct BlogPostTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    post: BlogPostDetail,
}

#[instrument(skip(session, state))]
pub async fn blog_post(
    session: CurrentSession,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = state.blog_handler.get_blog_post_by_slug(&slug).await?;

    render(&BlogPostTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(Some(&session.0)),
        is_admin: session.0.is_admin(),
        post: post.to_detail(),
    })
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
struct AdminDashboardTemplate {
    site_name: String,
    user_name: Option<String>,
    is_admin: bool,
    blog_posts: i64,
    launch_weeks: i64,
    directories: i64,
    users: i64,
}

#[instrument(skip(admin, state), fields(admin = %admin.0.id))]
pub async fn admin_dashboard(admin: AdminSession, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (blog_posts, launch_weeks, directories, users) = futures_util::try_join!(
        state.blog_handler.count_blog_posts(),
        state.launch_week_handler.count_launch_weeks(),
        state.directory_handler.count_directories(),
        state.user_handler.count_users(),
    )?;

    render(&AdminDashboardTemplate {
        site_name: state.config.name.clone(),
        user_name: display_name(Some(&admin.0)),
        is_admin: true,
        blog_posts,
        launch_weeks,
        directories,
        users,
    })
}
